//! # Meridian Series Normalization
//!
//! This crate is the gatekeeper between raw caller input and the statistics
//! engine. Callers hand it whatever they have (price levels or period
//! returns, sorted or not, with gaps, with or without a benchmark) and it
//! produces canonical return series: date-sorted, gap-free, consistently
//! shaped, and aligned.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate with no knowledge of external
//!   systems. It depends only on `core-types` (Layer 0).
//! - **Pure Transforms:** Every function takes a series by reference and
//!   returns a new one. Empty input produces empty output, never an error.
//! - **NaN over exceptions:** Out-of-domain values (a log of a total loss,
//!   an infinite percent change) surface as NaN in the output, so a single
//!   bad observation never aborts a computation.
//!
//! ## Public API
//!
//! - `prepare_returns` / `prepare_prices` / `infer_kind`: classification and
//!   canonicalization of raw input.
//! - `to_prices`, `to_returns`, `log_returns`, `rebase`, `comp`, `compsum`,
//!   `to_excess_returns`: compounding transforms.
//! - `align`: strategy/benchmark date alignment.
//! - `group_returns` / `aggregate_returns`: calendar resampling.
//! - `exponential_stdev` / `multi_shift`: windowed and lagged views.

pub mod align;
pub mod error;
pub mod prepare;
pub mod resample;
pub mod rolling;
pub mod transform;

// Re-export the key components to create a clean, public-facing API.
pub use align::align;
pub use error::NormalizeError;
pub use prepare::{infer_kind, prepare_prices, prepare_returns};
pub use resample::{aggregate_returns, group_returns};
pub use rolling::{exponential_stdev, multi_shift};
pub use transform::{
    comp, compsum, log_returns, rebase, to_excess_returns, to_prices, to_returns,
};
