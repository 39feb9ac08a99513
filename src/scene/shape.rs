//! Shape model - the data record for one drawable primitive
//!
//! A shape is a tagged variant over the three supported primitives,
//! each carrying only the size fields it actually uses, plus the
//! appearance fields shared by all of them (position, color,
//! transparency).

use eframe::egui::Color32;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Default cylinder height, also used when switching another kind
/// into a cylinder (the other kinds carry no height of their own).
pub const DEFAULT_CYLINDER_HEIGHT: f32 = 2.0;

/// Opacity used for shapes with the transparency flag set.
pub const TRANSPARENT_ALPHA: f32 = 0.6;

/// The primitive kinds a shape can have
///
/// This is the fieldless discriminant used by the UI dropdown and the
/// settings file; the geometry itself lives in [`ShapeKind`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Sphere,
    Cube,
    Cylinder,
}

impl PrimitiveKind {
    /// All kinds, in dropdown order
    pub fn all() -> &'static [PrimitiveKind] {
        &[
            PrimitiveKind::Sphere,
            PrimitiveKind::Cube,
            PrimitiveKind::Cylinder,
        ]
    }

    /// Display name for the UI
    pub fn label(&self) -> &'static str {
        match self {
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Cylinder => "Cylinder",
        }
    }
}

/// Shape geometry as a tagged variant
///
/// The radius/edge field is the primary size of a shape; the cylinder
/// additionally has a height. Sizes are kept non-negative.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ShapeKind {
    /// A sphere of the given radius around the shape position
    Sphere { radius: f32 },
    /// An axis-aligned cube with the given edge length, centered at
    /// the shape position
    Cube { edge: f32 },
    /// A cylinder with the given radius and height; the shape
    /// position is the center of the base circle, the axis points
    /// along world Z
    Cylinder { radius: f32, height: f32 },
}

impl ShapeKind {
    /// The discriminant of this variant
    pub fn primitive(&self) -> PrimitiveKind {
        match self {
            ShapeKind::Sphere { .. } => PrimitiveKind::Sphere,
            ShapeKind::Cube { .. } => PrimitiveKind::Cube,
            ShapeKind::Cylinder { .. } => PrimitiveKind::Cylinder,
        }
    }

    /// Radius (sphere, cylinder) or edge length (cube)
    pub fn primary_size(&self) -> f32 {
        match self {
            ShapeKind::Sphere { radius } => *radius,
            ShapeKind::Cube { edge } => *edge,
            ShapeKind::Cylinder { radius, .. } => *radius,
        }
    }

    /// Height for cylinders; the other kinds have none
    pub fn secondary_size(&self) -> Option<f32> {
        match self {
            ShapeKind::Cylinder { height, .. } => Some(*height),
            _ => None,
        }
    }

    /// Build a variant from a discriminant and the slider values
    ///
    /// The primary size always carries over; the height is only used
    /// for cylinders and falls back to [`DEFAULT_CYLINDER_HEIGHT`]
    /// when the previous kind had none. Negative inputs are clamped
    /// to zero.
    pub fn from_sizes(kind: PrimitiveKind, primary: f32, secondary: Option<f32>) -> Self {
        let primary = primary.max(0.0);
        match kind {
            PrimitiveKind::Sphere => ShapeKind::Sphere { radius: primary },
            PrimitiveKind::Cube => ShapeKind::Cube { edge: primary },
            PrimitiveKind::Cylinder => ShapeKind::Cylinder {
                radius: primary,
                height: secondary.unwrap_or(DEFAULT_CYLINDER_HEIGHT).max(0.0),
            },
        }
    }

    /// Default geometry for a kind: unit sphere, edge-2 cube,
    /// unit-radius cylinder of height 2
    pub fn default_for(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Sphere => ShapeKind::Sphere { radius: 1.0 },
            PrimitiveKind::Cube => ShapeKind::Cube { edge: 2.0 },
            PrimitiveKind::Cylinder => ShapeKind::Cylinder {
                radius: 1.0,
                height: DEFAULT_CYLINDER_HEIGHT,
            },
        }
    }
}

/// One drawable shape in the scene
#[derive(Clone, PartialEq, Debug)]
pub struct ShapeModel {
    /// Geometry (kind + sizes)
    pub kind: ShapeKind,
    /// Center (sphere, cube) or base-circle center (cylinder)
    pub position: Point3<f32>,
    /// Surface color; opacity comes from `transparent`, not from the
    /// color's alpha channel
    pub color: Color32,
    /// Render at 0.6 opacity instead of fully opaque
    pub transparent: bool,
}

impl ShapeModel {
    /// A new shape at the origin with the kind's default size and color
    pub fn default_for(kind: PrimitiveKind) -> Self {
        Self {
            kind: ShapeKind::default_for(kind),
            position: Point3::origin(),
            color: default_color(kind),
            transparent: true,
        }
    }

    /// Display name of this shape's kind
    pub fn label(&self) -> &'static str {
        self.kind.primitive().label()
    }

    /// Opacity used at render time: 0.6 when transparent, else 1.0
    pub fn opacity(&self) -> f32 {
        if self.transparent {
            TRANSPARENT_ALPHA
        } else {
            1.0
        }
    }

    /// Apply a single field update
    ///
    /// Updates that do not apply to the current kind (a height on a
    /// sphere or cube) leave the shape unchanged.
    pub fn apply(&mut self, update: ShapeUpdate) {
        match update {
            ShapeUpdate::Kind(kind) => {
                self.kind = ShapeKind::from_sizes(
                    kind,
                    self.kind.primary_size(),
                    self.kind.secondary_size(),
                );
            }
            ShapeUpdate::PrimarySize(size) => {
                self.kind = ShapeKind::from_sizes(
                    self.kind.primitive(),
                    size,
                    self.kind.secondary_size(),
                );
            }
            ShapeUpdate::SecondarySize(height) => {
                if let ShapeKind::Cylinder { radius, .. } = self.kind {
                    self.kind = ShapeKind::Cylinder {
                        radius,
                        height: height.max(0.0),
                    };
                }
            }
            ShapeUpdate::PositionX(x) => self.position.x = x,
            ShapeUpdate::PositionY(y) => self.position.y = y,
            ShapeUpdate::PositionZ(z) => self.position.z = z,
            ShapeUpdate::Color(color) => self.color = color,
            ShapeUpdate::Transparent(transparent) => self.transparent = transparent,
        }
    }
}

impl Default for ShapeModel {
    /// The startup shape: a blue unit sphere at the origin
    fn default() -> Self {
        Self::default_for(PrimitiveKind::Sphere)
    }
}

/// A single field edit, as produced by the control panel widgets
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ShapeUpdate {
    /// Switch the primitive kind, keeping the current sizes where
    /// the new kind has a matching field
    Kind(PrimitiveKind),
    /// Radius (sphere, cylinder) or edge length (cube)
    PrimarySize(f32),
    /// Cylinder height; inert for the other kinds
    SecondarySize(f32),
    PositionX(f32),
    PositionY(f32),
    PositionZ(f32),
    Color(Color32),
    Transparent(bool),
}

/// Default surface color per kind (blue sphere, red cube, green
/// cylinder)
fn default_color(kind: PrimitiveKind) -> Color32 {
    match kind {
        PrimitiveKind::Sphere => Color32::from_rgb(0, 0, 255),
        PrimitiveKind::Cube => Color32::from_rgb(255, 0, 0),
        PrimitiveKind::Cylinder => Color32::from_rgb(0, 128, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sphere() {
        let shape = ShapeModel::default();
        assert_eq!(shape.kind, ShapeKind::Sphere { radius: 1.0 });
        assert_eq!(shape.position, Point3::origin());
        assert_eq!(shape.color, Color32::from_rgb(0, 0, 255));
        assert!(shape.transparent);
    }

    #[test]
    fn test_opacity_follows_transparency_flag() {
        let mut shape = ShapeModel::default();
        assert!((shape.opacity() - 0.6).abs() < f32::EPSILON);
        shape.apply(ShapeUpdate::Transparent(false));
        assert!((shape.opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_kind_switch_keeps_primary_size() {
        let mut shape = ShapeModel::default_for(PrimitiveKind::Cylinder);
        shape.apply(ShapeUpdate::PrimarySize(1.5));
        shape.apply(ShapeUpdate::SecondarySize(3.0));

        shape.apply(ShapeUpdate::Kind(PrimitiveKind::Cube));
        assert_eq!(shape.kind, ShapeKind::Cube { edge: 1.5 });

        // The cube has no height, so switching back to a cylinder
        // starts from the default height again.
        shape.apply(ShapeUpdate::Kind(PrimitiveKind::Cylinder));
        assert_eq!(
            shape.kind,
            ShapeKind::Cylinder {
                radius: 1.5,
                height: DEFAULT_CYLINDER_HEIGHT,
            }
        );
    }

    #[test]
    fn test_secondary_size_inert_on_sphere() {
        let mut shape = ShapeModel::default();
        shape.apply(ShapeUpdate::SecondarySize(4.0));
        assert_eq!(shape.kind, ShapeKind::Sphere { radius: 1.0 });
    }

    #[test]
    fn test_negative_sizes_clamp_to_zero() {
        let kind = ShapeKind::from_sizes(PrimitiveKind::Cylinder, -1.0, Some(-2.0));
        assert_eq!(
            kind,
            ShapeKind::Cylinder {
                radius: 0.0,
                height: 0.0,
            }
        );
    }

    #[test]
    fn test_position_updates() {
        let mut shape = ShapeModel::default();
        shape.apply(ShapeUpdate::PositionX(1.0));
        shape.apply(ShapeUpdate::PositionY(-2.0));
        shape.apply(ShapeUpdate::PositionZ(0.5));
        assert_eq!(shape.position, Point3::new(1.0, -2.0, 0.5));
    }
}
