//! Render module - turning the scene into pixels
//!
//! This module provides:
//! - Orbit camera and perspective projection
//! - Parametric surface tessellation
//! - The interactive 3D plot widget

mod camera;
mod mesh;
mod plot;

pub use camera::Camera;
pub use mesh::{shape_bounds, tessellate, SurfaceGrid, DEFAULT_RESOLUTION};
pub use plot::{PlotSettings, ScenePlot};
