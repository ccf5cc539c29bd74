//! Core module for the tempo curve data model and pure computation.

pub mod bounds;
pub mod config;
pub mod curve;
pub mod duration;
pub mod timemap;
pub mod transform;
