mod decorrelated_jitter_tests;
