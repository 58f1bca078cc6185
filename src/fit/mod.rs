//! Estimators run over the empirical table.
//!
//! Responsibilities:
//!
//! - classify cells against the scaled binomial prediction (`degeneracy`)
//! - estimate the outlier-trimmed scale factor (`supremum`)
//! - test goodness of fit on well-populated cells (`goodness`)

pub mod degeneracy;
pub mod goodness;
pub mod supremum;

pub use degeneracy::*;
pub use goodness::*;
pub use supremum::*;
