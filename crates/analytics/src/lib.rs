//! # Operating Leverage Engine
//!
//! This crate computes how a company's cost structure determines the sensitivity of
//! operating profit to small changes in price, volume and costs, and the volume change
//! needed to offset a price change.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `LeverageEngine` is a stateless calculator. Every result
//!   is recomputed from scratch from the current inputs, so redundant recomputation is
//!   always safe.
//! - **Invalidity is a value:** Cost structures whose costs reach or exceed sales are normal
//!   input while exploring. They are flagged with `is_valid = false` and `None` fields,
//!   never with errors or panics.
//!
//! ## Public API
//!
//! - `LeverageEngine`: The calculation logic.
//! - `CostStructure`, `LeverSensitivities`, `PriceVolumeTradeoff`, `OperatingLeverage`:
//!   The derived results, bundled per recomputation in a `LeverageReport`.
//! - `PriceSweep` / `TradeoffCurve`: The trade-off sampled over a range of price changes.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod curve;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use curve::{MAX_SWEEP_POINTS, PriceSweep, TradeoffCurve};
pub use engine::LeverageEngine;
pub use error::AnalyticsError;
pub use report::{
    CostBreakdown, CostStructure, LeverSensitivities, LeverageReport, OperatingLeverage,
    PriceVolumeTradeoff,
};
