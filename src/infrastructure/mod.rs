//! Infrastructure layer.
//!
//! Configuration loading, validation and logging setup. Nothing here
//! contains projection logic; it only wires settings into the solvers.

pub mod config;
