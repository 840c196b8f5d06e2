//! Utility modules

pub mod memory_storage;
pub mod text;
pub mod validation;

pub use memory_storage::*;
pub use validation::*;
