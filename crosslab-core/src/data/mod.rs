//! Price-series ingestion: the provider seam, gap filling, and validation.
//!
//! Providers return raw closes that may have gaps. `prepare` applies exactly
//! one `FillPolicy` and hands the core a clean, strictly ascending series.

pub mod prepare;
pub mod provider;
pub mod summary;

pub use prepare::{prepare, validate_series, FillPolicy};
pub use provider::{DataError, PriceProvider, RawPrice};
pub use summary::DataSummary;
