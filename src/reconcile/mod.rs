//! Reconciliation workflows: decision policy, batch runner, manual API

pub mod batch;
pub mod decision;
pub mod engine;
pub mod manual;

pub use batch::*;
pub use decision::*;
pub use engine::*;
pub use manual::*;
