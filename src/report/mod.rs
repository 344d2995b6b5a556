//! Report rendering and delivery.

pub mod generator;

pub use generator::*;
