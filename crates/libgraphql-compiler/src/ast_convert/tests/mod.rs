mod lowering_tests;
