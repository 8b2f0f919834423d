//! Benchmark utilities for the registry crate.
//!
//! - **Microbenchmarks**: individual registry operation performance (create, discard, pool
//!   add/remove, dense iteration)
//! - **Memory tracking**: heap allocation profiling via dhat
//! - **Frame timing**: update-cycle measurement, for scenarios that want to simulate a frame loop
//!   driving repeated registry operations
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_bench -- create
//!
//! # Run with memory profiling (slower)
//! cargo bench -p rusty_bench --features memory_profiling
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.
//! Memory profiling results are written to `dhat-heap.json` for viewing with
//! DHAT's viewer.

pub mod components;
pub mod frame_timer;
pub mod memory;
