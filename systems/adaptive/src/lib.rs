#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Adaptive letter selection and difficulty governance.
//!
//! The selector turns per-letter mastery into sampling weights and draws a
//! roster with a guaranteed share of review letters. The governor then keeps
//! that roster within pressure and wave-to-wave difficulty bounds.

pub mod governor;
pub mod selector;

pub use governor::{DifficultyConfig, DifficultyGovernor};
pub use selector::{compute_weights, pick_with_review, weighted_pick_n, PickOptions, WeightMap};
