mod lexicon_corrector_test;
mod retry_policy_test;
mod transcript_normalizer_test;
mod transcription_invoker_test;
