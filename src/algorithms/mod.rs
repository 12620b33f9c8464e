//! Evolutionary algorithms
//!
//! This module provides the elitist generational GA.

pub mod generational;

pub mod prelude {
    pub use super::generational::*;
}
