//! Core types for the Australia wildfire dashboard.
//!
//! - `region`: the seven state/territory codes the dashboard filters on
//! - `observation`: a single fire-detection record and the two chart metrics
//! - `filter`: the (region, year) pair driving every derived output
//! - `dataset`: CSV normalization and, with the `api` feature, remote fetch
//! - `error`: load and parse errors

pub mod dataset;
pub mod error;
pub mod filter;
pub mod observation;
pub mod region;
