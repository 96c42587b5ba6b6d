//! Exact solvers module.

pub mod brute_force;
pub mod permutation;

pub use brute_force::*;
pub use permutation::next_permutation;
