mod memory_backend_tests;
