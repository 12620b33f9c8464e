//! Genome abstractions and implementations
//!
//! This module provides the core `Genome` trait, gene domains, and the
//! built-in bit string genome.

pub mod bit_string;
pub mod traits;

pub mod prelude {
    pub use super::bit_string::*;
    pub use super::traits::*;
}
