//! Scene module - shape data model and scene store
//!
//! This module provides:
//! - `ShapeModel` and its tagged `ShapeKind` geometry
//! - `ShapeUpdate` for single-field edits from the control panel
//! - `SceneStore`, the ordered shape list with a selection cursor

mod shape;
mod store;

pub use shape::{PrimitiveKind, ShapeKind, ShapeModel, ShapeUpdate, DEFAULT_CYLINDER_HEIGHT};
pub use store::{SceneError, SceneStore};
