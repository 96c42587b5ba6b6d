//! Heuristics module.
//!
//! Polynomial-time tour construction, checked empirically against the
//! exact solver.

pub mod construction;

pub use construction::*;
