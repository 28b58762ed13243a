//! Roadmap planner: departmental features on a quarterly Gantt timeline,
//! aligned to strategic metrics and key results.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod store;
pub mod timeline;
pub mod ui;

pub use error::{Result, RoadmapError};
