//! Interactive 3D plot widget
//!
//! Paints the whole scene into an egui canvas each frame:
//! - tessellates every shape and projects the resulting quads
//! - depth-sorts them so farther surfaces are painted first
//! - draws the bounding axis box, floor grid and axis labels
//!
//! Dragging the canvas orbits the camera, scrolling zooms.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::render::camera::Camera;
use crate::render::mesh::{shape_bounds, tessellate, DEFAULT_RESOLUTION};
use crate::scene::SceneStore;

/// Radians of orbit per pixel of drag
const ORBIT_SPEED: f32 = 0.01;
/// Zoom factor exponent per scroll unit
const ZOOM_SPEED: f32 = 0.002;
/// Cells per side of the floor grid
const GRID_DIVISIONS: usize = 10;
/// Extra room around the scene when bounds follow the shapes
const BOUNDS_MARGIN: f32 = 1.1;
/// Pixels to push axis labels away from the box
const LABEL_OFFSET: f32 = 16.0;

/// Appearance settings for the plot
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSettings {
    /// Canvas fill color
    pub background: Color32,
    /// Draw the floor grid at the bottom of the axis box
    pub show_grid: bool,
    /// Modulate face brightness by orientation
    pub shade: bool,
    /// Keep the axis box at `±axis_limit` instead of following the scene
    pub fixed_bounds: bool,
    /// Half-extent of the axis box in fixed mode
    pub axis_limit: f32,
    /// Samples per parameter direction for curved surfaces
    pub resolution: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 248),
            show_grid: true,
            shade: true,
            fixed_bounds: true,
            axis_limit: 5.0,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

/// A projected quad waiting to be painted
struct PaintQuad {
    corners: [Pos2; 4],
    /// View-space depth, more negative is farther away
    depth: f32,
    fill: Color32,
}

/// Box, grid and label colors picked to contrast with the background
struct FrameColors {
    frame: Color32,
    grid: Color32,
    label: Color32,
}

impl FrameColors {
    fn for_background(background: Color32) -> Self {
        let luminance = 0.299 * background.r() as f32
            + 0.587 * background.g() as f32
            + 0.114 * background.b() as f32;
        if luminance > 128.0 {
            Self {
                frame: Color32::from_gray(95),
                grid: Color32::from_gray(205),
                label: Color32::from_gray(60),
            }
        } else {
            Self {
                frame: Color32::from_gray(165),
                grid: Color32::from_gray(70),
                label: Color32::from_gray(210),
            }
        }
    }
}

/// The scene viewport
pub struct ScenePlot {
    pub settings: PlotSettings,
    pub camera: Camera,
    point_count: usize,
    quad_count: usize,
}

impl Default for ScenePlot {
    fn default() -> Self {
        Self {
            settings: PlotSettings::default(),
            camera: Camera::default(),
            point_count: 0,
            quad_count: 0,
        }
    }
}

impl ScenePlot {
    /// Mesh points sampled during the last frame
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Quads painted during the last frame
    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    /// Put the camera back to its starting orbit
    pub fn reset_view(&mut self) {
        self.camera = Camera::default();
    }

    /// Draw the scene into the remaining space of `ui`
    pub fn show(&mut self, ui: &mut egui::Ui, store: &SceneStore) -> egui::Response {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        if response.dragged() {
            let delta = response.drag_delta();
            self.camera.orbit(-delta.x * ORBIT_SPEED, delta.y * ORBIT_SPEED);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom((-scroll * ZOOM_SPEED).exp());
            }
        }

        painter.rect_filled(rect, 0.0, self.settings.background);
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return response;
        }

        let view = self.camera.view_matrix();
        let vp = self.camera.projection_matrix(rect.aspect_ratio()) * view;
        let (min, max) = self.scene_bounds(store);
        let colors = FrameColors::for_background(self.settings.background);

        if self.settings.show_grid {
            self.paint_floor_grid(&painter, rect, &vp, min, max, colors.grid);
        }
        self.paint_axis_box(&painter, rect, &vp, min, max, colors.frame);

        for quad in self.collect_quads(store, rect, &view, &vp) {
            painter.add(egui::Shape::convex_polygon(
                quad.corners.to_vec(),
                quad.fill,
                Stroke::NONE,
            ));
        }

        self.paint_axis_labels(&painter, rect, &vp, min, max, colors.label);

        response
    }

    /// World-space extent of the axis box
    fn scene_bounds(&self, store: &SceneStore) -> (Point3<f32>, Point3<f32>) {
        if !self.settings.fixed_bounds && !store.is_empty() {
            let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
            let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
            for shape in store.iter() {
                let (lo, hi) = shape_bounds(shape);
                min.x = min.x.min(lo.x);
                min.y = min.y.min(lo.y);
                min.z = min.z.min(lo.z);
                max.x = max.x.max(hi.x);
                max.y = max.y.max(hi.y);
                max.z = max.z.max(hi.z);
            }
            // Equal extents on all axes keep the box a cube, like the
            // fixed mode, so shapes never look squashed.
            let center = Point3::new(
                (min.x + max.x) / 2.0,
                (min.y + max.y) / 2.0,
                (min.z + max.z) / 2.0,
            );
            let extent = (max.x - min.x).max(max.y - min.y).max(max.z - min.z);
            let half = (extent * 0.5 * BOUNDS_MARGIN).max(1.0);
            let h = Vector3::new(half, half, half);
            return (center - h, center + h);
        }
        let l = self.settings.axis_limit;
        (Point3::new(-l, -l, -l), Point3::new(l, l, l))
    }

    /// Tessellate, project and depth-sort every visible quad
    fn collect_quads(
        &mut self,
        store: &SceneStore,
        rect: Rect,
        view: &Matrix4<f32>,
        vp: &Matrix4<f32>,
    ) -> Vec<PaintQuad> {
        self.point_count = 0;
        let mut quads = Vec::new();

        for shape in store.iter() {
            let alpha = (shape.opacity() * 255.0).round() as u8;
            for grid in tessellate(shape, self.settings.resolution) {
                self.point_count += grid.point_count();
                for corners in grid.quads() {
                    let projected = [
                        project(vp, rect, corners[0]),
                        project(vp, rect, corners[1]),
                        project(vp, rect, corners[2]),
                        project(vp, rect, corners[3]),
                    ];
                    let (Some(a), Some(b), Some(c), Some(d)) =
                        (projected[0], projected[1], projected[2], projected[3])
                    else {
                        continue;
                    };
                    let depth = corners
                        .iter()
                        .map(|p| view.transform_point(p).z)
                        .sum::<f32>()
                        / 4.0;
                    quads.push(PaintQuad {
                        corners: [a, b, c, d],
                        depth,
                        fill: shaded_fill(
                            shape.color,
                            alpha,
                            quad_normal(&corners),
                            self.settings.shade,
                        ),
                    });
                }
            }
        }

        // Painter's algorithm: farthest quads first.
        quads.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        self.quad_count = quads.len();
        quads
    }

    /// Grid lines on the bottom face of the axis box
    fn paint_floor_grid(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        vp: &Matrix4<f32>,
        min: Point3<f32>,
        max: Point3<f32>,
        color: Color32,
    ) {
        let stroke = Stroke::new(0.5, color);
        for i in 0..=GRID_DIVISIONS {
            let t = i as f32 / GRID_DIVISIONS as f32;
            let x = min.x + t * (max.x - min.x);
            let y = min.y + t * (max.y - min.y);
            self.paint_world_line(
                painter,
                rect,
                vp,
                Point3::new(x, min.y, min.z),
                Point3::new(x, max.y, min.z),
                stroke,
            );
            self.paint_world_line(
                painter,
                rect,
                vp,
                Point3::new(min.x, y, min.z),
                Point3::new(max.x, y, min.z),
                stroke,
            );
        }
    }

    /// The twelve edges of the bounding box
    fn paint_axis_box(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        vp: &Matrix4<f32>,
        min: Point3<f32>,
        max: Point3<f32>,
        color: Color32,
    ) {
        const EDGES: [(usize, usize); 12] = [
            (0, 1), (2, 3), (4, 5), (6, 7), // X-parallel
            (0, 2), (1, 3), (4, 6), (5, 7), // Y-parallel
            (0, 4), (1, 5), (2, 6), (3, 7), // Z-parallel
        ];
        let xs = [min.x, max.x];
        let ys = [min.y, max.y];
        let zs = [min.z, max.z];
        let corner = |i: usize| Point3::new(xs[i & 1], ys[(i >> 1) & 1], zs[(i >> 2) & 1]);

        let stroke = Stroke::new(1.0, color);
        for (a, b) in EDGES {
            self.paint_world_line(painter, rect, vp, corner(a), corner(b), stroke);
        }
    }

    fn paint_world_line(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        vp: &Matrix4<f32>,
        a: Point3<f32>,
        b: Point3<f32>,
        stroke: Stroke,
    ) {
        if let (Some(pa), Some(pb)) = (project(vp, rect, a), project(vp, rect, b)) {
            painter.line_segment([pa, pb], stroke);
        }
    }

    /// Axis names next to their box edges, pushed outward from the box
    fn paint_axis_labels(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        vp: &Matrix4<f32>,
        min: Point3<f32>,
        max: Point3<f32>,
        color: Color32,
    ) {
        let mid = |a: f32, b: f32| (a + b) / 2.0;
        let anchors = [
            (Point3::new(mid(min.x, max.x), min.y, min.z), "X Axis"),
            (Point3::new(max.x, mid(min.y, max.y), min.z), "Y Axis"),
            (Point3::new(min.x, min.y, mid(min.z, max.z)), "Z Axis"),
        ];
        let center = Point3::new(mid(min.x, max.x), mid(min.y, max.y), mid(min.z, max.z));
        let Some(center_px) = project(vp, rect, center) else {
            return;
        };

        for (anchor, text) in anchors {
            if let Some(pos) = project(vp, rect, anchor) {
                let away = pos - center_px;
                let offset = if away.length() > 1.0 {
                    away / away.length() * LABEL_OFFSET
                } else {
                    Vec2::new(0.0, LABEL_OFFSET)
                };
                painter.text(
                    pos + offset,
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(12.0),
                    color,
                );
            }
        }
    }
}

/// Project a world point into viewport pixels
///
/// Returns `None` for points behind the camera or outside the depth
/// range, so callers can simply drop geometry that left the frustum.
fn project(vp: &Matrix4<f32>, rect: Rect, p: Point3<f32>) -> Option<Pos2> {
    let clip = vp * Vector4::new(p.x, p.y, p.z, 1.0);
    if clip.w.abs() <= 1.0e-6 {
        return None;
    }
    let ndc = clip.xyz() / clip.w;
    if !(-1.0..=1.0).contains(&ndc.z) {
        return None;
    }
    Some(Pos2::new(
        rect.left() + (ndc.x * 0.5 + 0.5) * rect.width(),
        rect.top() + (1.0 - (ndc.y * 0.5 + 0.5)) * rect.height(),
    ))
}

/// Face normal of a quad, with a fallback for cells that collapse to
/// a triangle (sphere poles)
fn quad_normal(corners: &[Point3<f32>; 4]) -> Vector3<f32> {
    let n = (corners[1] - corners[0]).cross(&(corners[3] - corners[0]));
    if n.magnitude() > 1.0e-9 {
        n
    } else {
        (corners[2] - corners[0]).cross(&(corners[3] - corners[1]))
    }
}

/// Fill color for a quad: base color scaled by orientation, alpha from
/// the shape's transparency
fn shaded_fill(color: Color32, alpha: u8, normal: Vector3<f32>, lit: bool) -> Color32 {
    let mut brightness = 1.0;
    let len = normal.magnitude();
    if lit && len > 1.0e-9 {
        let light = Vector3::new(0.35, 0.3, 0.9).normalize();
        brightness = 0.55 + 0.45 * (normal.dot(&light) / len).abs();
    }
    let scale = |v: u8| (v as f32 * brightness).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(scale(color.r()), scale(color.g()), scale(color.b()), alpha)
}
