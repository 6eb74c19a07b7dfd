#![doc = include_str!("../README.md")]

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
