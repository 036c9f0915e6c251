mod lexicon_entry_test;
