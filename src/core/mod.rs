//! Core engine types: values, paths, adapters, errors, configuration.
//!
//! This module contains the building blocks that know nothing about game
//! rules. Targets are plain [`Value`] trees; everything else in the crate
//! addresses them through [`Path`]s.

pub mod value;
pub mod path;
pub mod adapter;
pub mod error;
pub mod config;

pub use value::Value;
pub use path::{path_ref, Path, PathRef, Segment, ValueSource};
pub use error::EngineError;
pub use config::{EngineConfig, OperatorPolicy};
