//! wordpos - Part-of-speech lookups, definitions and random words from WordNet.
//!
//! This library exposes the core modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod lexicon;
pub mod logging;
pub mod output;
pub mod text;
