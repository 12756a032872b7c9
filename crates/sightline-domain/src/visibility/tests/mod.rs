//! Visibility engine test suite.

mod engine_tests;
