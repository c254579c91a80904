mod row_set_builder_tests;
