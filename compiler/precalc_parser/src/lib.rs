pub mod parser;


// Integration tests are in the tests/ directory
