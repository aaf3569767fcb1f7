//! # Haralick Parallel
//!
//! Execution strategies for per-window texture computations.
//!
//! Window origins are independent of each other, so a scan can run
//! sequentially, on the global Rayon pool, or on a dedicated pool.

pub mod strategy;

pub use strategy::{num_cpus, ParallelStrategy, ProcessingMode};
