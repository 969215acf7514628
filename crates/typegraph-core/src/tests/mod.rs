mod definition_path_tests;
