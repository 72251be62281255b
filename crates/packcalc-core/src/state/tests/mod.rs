mod configuration_tests;
