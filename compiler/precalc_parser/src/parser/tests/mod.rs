//! Unit tests for the shift/reduce driver
