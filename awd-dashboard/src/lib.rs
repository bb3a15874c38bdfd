//! Reactive filter-to-view pipeline for the Australia wildfire dashboard.
//!
//! This crate provides:
//! - `controller`: the [`Dashboard`] that reacts to filter changes
//! - `state`: display slots, the output dependency table and the view state
//! - `chart`: Plotly-compatible chart specs for the two monthly charts
//! - `options`: the filter control choices derived from the dataset
//! - `config`: dashboard configuration with JSON file support
//! - `page`: static HTML export of the current view

pub mod chart;
pub mod config;
pub mod controller;
pub mod options;
pub mod page;
pub mod state;

pub use controller::{Dashboard, Reaction};
pub use state::{DashboardState, MapSlot, Output, Slot, WeatherPanel};
