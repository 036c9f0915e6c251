mod azure_whisper_engine_test;
mod mock_server;
mod transcription_engine_factory_test;
