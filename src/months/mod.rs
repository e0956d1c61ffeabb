//! Month-pattern matching
//!
//! Decides whether a URL refers to one of the target months, either through a
//! dated path segment (`2024/03/`, `2024-12-`) or through a localized month
//! name, and tallies matches per month.

mod matcher;
mod spec;

pub use matcher::{FilterResult, MonthMatcher, MonthStatistics};
pub use spec::{MonthSpec, TargetMonth};
