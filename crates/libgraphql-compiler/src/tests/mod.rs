mod document_tests;
mod file_reader_tests;
