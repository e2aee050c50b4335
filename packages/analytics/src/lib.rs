#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Type filtering and per-region aggregation over conflict events.
//!
//! Everything here is a pure function of its inputs. The event lists are
//! small (one capped upstream page), so every operation is a single
//! linear pass with no indexing or caching.

pub mod aggregate;
pub mod filter;

pub use aggregate::{aggregate_by_region, aggregate_by_type, events_in_region, top_actors};
pub use filter::{TypeFilter, apply_filter, available_types};
