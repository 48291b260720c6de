mod compiler_tests;
