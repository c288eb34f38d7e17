//! # Utilities Module
//!
//! Grid search and line algorithms shared by generation and navigation.

pub mod math;
pub mod search;

pub use math::*;
pub use search::*;
