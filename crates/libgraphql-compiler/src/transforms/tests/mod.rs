mod apply_fragment_arguments_tests;
mod connection_tests;
