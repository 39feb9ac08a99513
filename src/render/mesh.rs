//! Surface tessellation - turning shapes into parametric meshes
//!
//! Every shape is converted into one or more [`SurfaceGrid`]s: a
//! rectangular grid of sample points in parameter space whose cells
//! become the quads the plot paints. Spheres and cylinders become a
//! single densely sampled grid, a cube becomes six flat 2x2 patches
//! (one per face).

use std::f32::consts::{PI, TAU};

use nalgebra::Point3;

use crate::scene::{ShapeKind, ShapeModel};

/// Default samples per parameter direction
pub const DEFAULT_RESOLUTION: usize = 100;

/// A parametric surface patch stored as a row-major point grid
///
/// A grid of `rows x cols` sample points yields
/// `(rows - 1) * (cols - 1)` quads; neighbouring samples share their
/// edge, so the surface is watertight in parameter space.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceGrid {
    points: Vec<Point3<f32>>,
    rows: usize,
    cols: usize,
}

impl SurfaceGrid {
    /// Build a grid by sampling `f(row, col)` over the full grid
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> Point3<f32>,
    {
        let mut points = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                points.push(f(r, c));
            }
        }
        Self { points, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of sample points
    pub fn point_count(&self) -> usize {
        self.points().len()
    }

    /// All sample points, row-major
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    /// Sample point at grid coordinates
    pub fn point(&self, row: usize, col: usize) -> Point3<f32> {
        self.points[row * self.cols + col]
    }

    /// Number of quads this grid produces
    pub fn quad_count(&self) -> usize {
        self.rows.saturating_sub(1) * self.cols.saturating_sub(1)
    }

    /// Iterate over the grid cells as corner quadruples
    ///
    /// Corners are ordered around the cell perimeter, so each item is
    /// a planar-or-nearly-planar polygon ready for painting.
    pub fn quads(&self) -> impl Iterator<Item = [Point3<f32>; 4]> + '_ {
        let rows = self.rows();
        let cols = self.cols();
        (0..rows.saturating_sub(1)).flat_map(move |r| {
            (0..cols.saturating_sub(1)).map(move |c| {
                [
                    self.point(r, c),
                    self.point(r, c + 1),
                    self.point(r + 1, c + 1),
                    self.point(r + 1, c),
                ]
            })
        })
    }
}

/// Tessellate a shape into its surface patches
///
/// `resolution` is the number of samples per parameter direction for
/// the curved surfaces (at least 2); cube faces are flat and always
/// use a 2x2 patch each. Geometry depends only on the shape's kind,
/// sizes and position - color and transparency never move a vertex.
pub fn tessellate(shape: &ShapeModel, resolution: usize) -> Vec<SurfaceGrid> {
    let center = shape.position;
    match shape.kind {
        ShapeKind::Sphere { radius } => vec![uv_sphere(center, radius, resolution)],
        ShapeKind::Cube { edge } => cube_faces(center, edge),
        ShapeKind::Cylinder { radius, height } => {
            vec![cylinder_lateral(center, radius, height, resolution)]
        }
    }
}

/// Axis-aligned bounding box of a shape, without tessellating it
pub fn shape_bounds(shape: &ShapeModel) -> (Point3<f32>, Point3<f32>) {
    let p = shape.position;
    match shape.kind {
        ShapeKind::Sphere { radius } => (
            Point3::new(p.x - radius, p.y - radius, p.z - radius),
            Point3::new(p.x + radius, p.y + radius, p.z + radius),
        ),
        ShapeKind::Cube { edge } => {
            let h = edge / 2.0;
            (
                Point3::new(p.x - h, p.y - h, p.z - h),
                Point3::new(p.x + h, p.y + h, p.z + h),
            )
        }
        ShapeKind::Cylinder { radius, height } => (
            Point3::new(p.x - radius, p.y - radius, p.z),
            Point3::new(p.x + radius, p.y + radius, p.z + height),
        ),
    }
}

/// UV sphere around `center`
///
/// ## Parametric Equation
/// ```text
/// u ∈ [0, 2π]  (longitude), v ∈ [0, π]  (colatitude)
/// x = cx + r · cos(u) · sin(v)
/// y = cy + r · sin(u) · sin(v)
/// z = cz + r · cos(v)
/// ```
fn uv_sphere(center: Point3<f32>, radius: f32, resolution: usize) -> SurfaceGrid {
    let n = resolution.max(2);
    let step = 1.0 / (n - 1) as f32;
    SurfaceGrid::from_fn(n, n, |row, col| {
        let u = col as f32 * step * TAU;
        let v = row as f32 * step * PI;
        Point3::new(
            center.x + radius * u.cos() * v.sin(),
            center.y + radius * u.sin() * v.sin(),
            center.z + radius * v.cos(),
        )
    })
}

/// The six faces of an axis-aligned cube centered at `center`
///
/// Each face is a flat 2x2 patch at the fixed coordinate
/// `center ± edge/2` on its axis.
fn cube_faces(center: Point3<f32>, edge: f32) -> Vec<SurfaceGrid> {
    let h = edge / 2.0;
    let (cx, cy, cz) = (center.x, center.y, center.z);
    let x = [cx - h, cx + h];
    let y = [cy - h, cy + h];
    let z = [cz - h, cz + h];

    vec![
        // Bottom (z-) and top (z+)
        SurfaceGrid::from_fn(2, 2, |r, c| Point3::new(x[c], y[r], z[0])),
        SurfaceGrid::from_fn(2, 2, |r, c| Point3::new(x[c], y[r], z[1])),
        // Left (x-) and right (x+)
        SurfaceGrid::from_fn(2, 2, |r, c| Point3::new(x[0], y[c], z[r])),
        SurfaceGrid::from_fn(2, 2, |r, c| Point3::new(x[1], y[c], z[r])),
        // Front (y-) and back (y+)
        SurfaceGrid::from_fn(2, 2, |r, c| Point3::new(x[c], y[0], z[r])),
        SurfaceGrid::from_fn(2, 2, |r, c| Point3::new(x[c], y[1], z[r])),
    ]
}

/// Lateral surface of a Z-aligned cylinder
///
/// ## Parametric Equation
/// ```text
/// θ ∈ [0, 2π], z ∈ [base.z, base.z + height]
/// x = cx + r · cos(θ)
/// y = cy + r · sin(θ)
/// ```
fn cylinder_lateral(base: Point3<f32>, radius: f32, height: f32, resolution: usize) -> SurfaceGrid {
    let n = resolution.max(2);
    let step = 1.0 / (n - 1) as f32;
    SurfaceGrid::from_fn(n, n, |row, col| {
        let theta = col as f32 * step * TAU;
        let z = base.z + height * row as f32 * step;
        Point3::new(
            base.x + radius * theta.cos(),
            base.y + radius * theta.sin(),
            z,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{PrimitiveKind, ShapeUpdate};

    fn total_points(grids: &[SurfaceGrid]) -> usize {
        grids.iter().map(|g| g.point_count()).sum()
    }

    #[test]
    fn test_all_kinds_produce_points() {
        for &kind in PrimitiveKind::all() {
            let shape = ShapeModel::default_for(kind);
            let grids = tessellate(&shape, DEFAULT_RESOLUTION);
            assert!(total_points(&grids) > 0, "{} produced no mesh", kind.label());
        }
    }

    #[test]
    fn test_sphere_sample_counts() {
        let shape = ShapeModel::default_for(PrimitiveKind::Sphere);
        let grids = tessellate(&shape, DEFAULT_RESOLUTION);
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].point_count(), DEFAULT_RESOLUTION * DEFAULT_RESOLUTION);
        assert_eq!(
            grids[0].quad_count(),
            (DEFAULT_RESOLUTION - 1) * (DEFAULT_RESOLUTION - 1)
        );
    }

    #[test]
    fn test_cube_is_six_flat_patches() {
        let shape = ShapeModel::default_for(PrimitiveKind::Cube);
        let grids = tessellate(&shape, DEFAULT_RESOLUTION);
        assert_eq!(grids.len(), 6);
        for grid in &grids {
            assert_eq!(grid.point_count(), 4);
            assert_eq!(grid.quad_count(), 1);
        }
    }

    #[test]
    fn test_sphere_samples_lie_on_the_sphere() {
        let mut shape = ShapeModel::default_for(PrimitiveKind::Sphere);
        shape.apply(ShapeUpdate::PositionX(1.0));
        shape.apply(ShapeUpdate::PositionZ(-2.0));
        shape.apply(ShapeUpdate::PrimarySize(1.5));

        let grids = tessellate(&shape, 24);
        for p in grids[0].points() {
            let d = (p - shape.position).magnitude();
            assert!((d - 1.5).abs() < 1.0e-4, "sample at distance {d}");
        }
    }

    #[test]
    fn test_cube_faces_sit_at_half_edge_offsets() {
        let shape = ShapeModel::default_for(PrimitiveKind::Cube); // Edge 2.0 at the origin
        let grids = tessellate(&shape, 2);

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        for grid in &grids {
            for p in grid.points() {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                min.z = min.z.min(p.z);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
                max.z = max.z.max(p.z);
            }
        }
        assert_eq!(min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_cylinder_spans_base_to_height() {
        let mut shape = ShapeModel::default_for(PrimitiveKind::Cylinder);
        shape.apply(ShapeUpdate::PositionZ(1.0));
        shape.apply(ShapeUpdate::SecondarySize(3.0));

        let grids = tessellate(&shape, 16);
        let grid = &grids[0];

        let min_z = grid.points().iter().map(|p| p.z).fold(f32::MAX, f32::min);
        let max_z = grid.points().iter().map(|p| p.z).fold(f32::MIN, f32::max);
        assert!((min_z - 1.0).abs() < 1.0e-4);
        assert!((max_z - 4.0).abs() < 1.0e-4);

        // Every sample sits on the base circle in X/Y.
        for p in grid.points() {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 1.0).abs() < 1.0e-4);
        }
    }

    #[test]
    fn test_geometry_ignores_appearance() {
        let mut shape = ShapeModel::default_for(PrimitiveKind::Sphere);
        let before = tessellate(&shape, 12);

        shape.apply(ShapeUpdate::Transparent(false));
        shape.apply(ShapeUpdate::Color(eframe::egui::Color32::GOLD));
        let after = tessellate(&shape, 12);

        assert_eq!(before, after);
    }

    #[test]
    fn test_quads_trace_grid_cells() {
        let grid = SurfaceGrid::from_fn(2, 3, |r, c| Point3::new(c as f32, r as f32, 0.0));
        let quads: Vec<_> = grid.quads().collect();
        assert_eq!(quads.len(), 2);
        assert_eq!(
            quads[0],
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_shape_bounds() {
        let mut cylinder = ShapeModel::default_for(PrimitiveKind::Cylinder);
        cylinder.apply(ShapeUpdate::PositionX(2.0));
        let (min, max) = shape_bounds(&cylinder);
        assert_eq!(min, Point3::new(1.0, -1.0, 0.0));
        assert_eq!(max, Point3::new(3.0, 1.0, 2.0));

        let sphere = ShapeModel::default_for(PrimitiveKind::Sphere);
        let (min, max) = shape_bounds(&sphere);
        assert_eq!(min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 1.0));
    }
}
