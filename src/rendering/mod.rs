//! # Rendering Module
//!
//! Presentation glue: a macroquad display for the binary and a plain-text
//! dump for logs and tests. Neither feeds anything back into the simulation.

pub mod ascii;
pub mod display;

pub use ascii::*;
pub use display::*;
