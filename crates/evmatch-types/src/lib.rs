//! Foundation types for evmatch.
//!
//! This crate provides the addressing and reporting types shared by the diff
//! engine, the tolerance policy, and the assertion facade. Every other evmatch
//! crate depends on `evmatch-types`.
//!
//! # Key Types
//!
//! - [`KeyPath`] -- Ordered sequence of mapping keys locating a nested value
//! - [`Discrepancy`] -- One reported difference between expected and actual
//! - [`StrictnessPredicate`] -- Decides where extra actual-only keys are reported

pub mod discrepancy;
pub mod path;
pub mod strictness;

pub use discrepancy::{Discrepancy, DiscrepancyKind};
pub use path::KeyPath;
pub use strictness::{AlwaysStrict, StrictnessPredicate};
