//! Welcome to `simcore`!
//!
//! This is the compute half of the simulator: three contiguous-fit
//! allocation strategies and a single-resource safety search. Nothing
//! in here draws or prints; the `simview` crate consumes the outcomes.

pub mod fit;
pub mod banker;
pub mod scenario;
pub mod utils;

/// Imports, type aliases, error types ... in general
/// useful stuff that shall be needed in many places.
pub use crate::utils::*;
