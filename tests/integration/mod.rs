//! Integration tests for wordpos.

pub mod binary_test;
pub mod fanout_test;
pub mod wordnet_test;
