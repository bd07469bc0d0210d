//! Shared `Result` alias for lecture-bot crates.
//!
//! Crates own their error enums; this alias only fixes the report type so
//! that every layer hands `rootcause` reports upward in the same shape.
//! Storage failures never travel through here: they are converted to empty
//! result lists at the data-access boundary.

use rootcause::Report;

/// A `Result` whose error is a rootcause [`Report`] carrying context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
