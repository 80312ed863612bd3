//! World Module
//!
//! Ground-level reference geometry shared by both views.

pub mod grid;

pub use grid::{generate_axes, generate_grid, GridConfig, GridPlane};
