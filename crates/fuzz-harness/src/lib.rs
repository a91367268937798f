//! Pointing Fuzz Harness
//!
//! Shared property-based testing strategies for the grid decoder, the orbit
//! propagator and the visibility engine, plus fixture builders that emit
//! column-exact two-line element sets.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_fuzz_test(e in eccentricity_elliptic(), m in mean_anomaly_rad()) {
//!         prop_assert!(e < 0.9 && m >= 0.0);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub mod prelude {
    pub use crate::fixtures::{tle_lines, ElementSet};
    pub use crate::generators::*;
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;
