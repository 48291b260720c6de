mod schema_transforms_tests;
