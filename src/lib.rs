//! Purpose: Library crate behind the `goat` CLI, the C ABI, and the Node binding.
//! Exports: `core` (counter, tripler, errors), `abi` (C-callable surface).
//! Role: One Rust implementation shared by every language boundary.
//! Invariants: Core operations are total; only boundary layers produce errors.
pub mod abi;
pub mod core;

pub use crate::core::counter::Counter;
pub use crate::core::tripler::compute_triple;
