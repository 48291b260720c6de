mod code_generator_tests;
mod printer_tests;
