//! dispatch-router core
//!
//! Order grouping and precedence-constrained route sequencing for
//! multi-store delivery workloads.

pub mod traits;
pub mod group;
pub mod waypoint;
pub mod matrix;
pub mod sequencer;
pub mod maps_link;
pub mod gmaps;
pub mod plan;
