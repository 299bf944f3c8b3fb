//! Core business logic abstractions

pub mod currency;
pub mod log;
pub mod metrics;

// Re-export main types for cleaner imports
pub use currency::{CURRENCIES, Currency};
pub use metrics::{DerivedMetrics, derive};
