//! slidedeck - Markdown to corporate Marp slide decks
//!
//! Turns a plain Markdown document into a structured Marp deck (cover,
//! section dividers, content slides, closing slide) and renders it with a
//! theme generated from a TOML style configuration.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod preprocessor;
pub mod runner;
pub mod style_config;
pub mod templates;
pub mod theme;

pub use preprocessor::{preprocess, PreprocessOptions, PreprocessResult};
pub use style_config::{ConfigError, StyleConfig};
