//! Configuration loading and validation.

pub mod error;
mod settings;

pub use crate::settings::{Config, Settings};
