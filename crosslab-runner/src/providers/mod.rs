//! Concrete price providers.
//!
//! - `CsvProvider`: one `date,close` file per symbol on local disk
//! - `SyntheticProvider`: deterministic random walk for demos and tests
//!
//! Both return raw closes with gaps intact; the runner applies the configured
//! fill policy.

pub mod csv;
pub mod synthetic;

pub use self::csv::CsvProvider;
pub use self::synthetic::SyntheticProvider;
