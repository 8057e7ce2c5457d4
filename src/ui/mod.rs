//! UI rendering module for hubgrid
//!
//! This module contains the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod user_grid;

pub use user_grid::render_user_grid;
