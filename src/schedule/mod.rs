//! Settlement schedule calculation for obligations

pub mod installments;

pub use installments::*;
