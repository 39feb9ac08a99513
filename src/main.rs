//! shapelab - Interactive 3D shape scene editor
//!
//! Compose a scene out of spheres, cubes and cylinders, adjust their
//! size, position, color and transparency from the control panel and
//! inspect the result in a live, orbitable 3D plot.
//!
//! ## Layout
//! - Top bar: title and control panel toggle
//! - Left panel: shape list, add/remove, selected shape editor,
//!   display preferences
//! - Central panel: the 3D plot (drag to orbit, scroll to zoom)

use eframe::egui;

mod render;
mod scene;
mod settings;

use render::ScenePlot;
use scene::{PrimitiveKind, SceneStore, ShapeUpdate};
use settings::AppSettings;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting shapelab");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("shapelab"),
        ..Default::default()
    };

    eframe::run_native(
        "shapelab",
        options,
        Box::new(|cc| Ok(Box::new(ShapeLabApp::new(cc)))),
    )
}

/// Main application state
struct ShapeLabApp {
    store: SceneStore,
    plot: ScenePlot,
    show_settings: bool,

    // Kind picked in the "Add" dropdown
    add_kind: PrimitiveKind,
}

impl ShapeLabApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            store: SceneStore::with_default_shape(),
            plot: ScenePlot::default(),
            show_settings: true,
            add_kind: PrimitiveKind::Sphere,
        };
        AppSettings::load().apply(&mut app);
        app
    }

    /// Shape list with add and remove controls
    fn scene_section(&mut self, ui: &mut egui::Ui) {
        for i in 0..self.store.len() {
            let label = self.store.shapes()[i].label();
            let selected = self.store.selected_index() == Some(i);
            if ui.selectable_label(selected, format!("{i}: {label}")).clicked() {
                if let Err(e) = self.store.select(i) {
                    log::warn!("Select failed: {}", e);
                }
            }
        }
        if self.store.is_empty() {
            ui.label("Scene is empty");
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("add_kind")
                .selected_text(self.add_kind.label())
                .width(90.0)
                .show_ui(ui, |ui| {
                    for kind in PrimitiveKind::all() {
                        ui.selectable_value(&mut self.add_kind, *kind, kind.label());
                    }
                });
            if ui.button("Add").clicked() {
                self.store.add_default(self.add_kind);
            }
            let can_remove = self.store.selected_index().is_some();
            if ui.add_enabled(can_remove, egui::Button::new("Remove")).clicked() {
                self.store.remove_current();
            }
        });
    }

    /// Controls for the currently selected shape
    fn editor_section(&mut self, ui: &mut egui::Ui) {
        // Snapshot the selection so the widgets can push updates back
        // through the store.
        let Some(shape) = self.store.selected().cloned() else {
            ui.label("No shape selected");
            return;
        };

        let kind = shape.kind.primitive();
        let mut picked = kind;
        egui::ComboBox::from_label("Kind")
            .selected_text(picked.label())
            .show_ui(ui, |ui| {
                for k in PrimitiveKind::all() {
                    ui.selectable_value(&mut picked, *k, k.label());
                }
            });
        if picked != kind {
            self.store.update_current(ShapeUpdate::Kind(picked));
        }

        let primary_label = match kind {
            PrimitiveKind::Cube => "Edge",
            _ => "Radius",
        };
        let mut primary = shape.kind.primary_size();
        if ui
            .add(egui::Slider::new(&mut primary, 0.1..=3.0).text(primary_label))
            .changed()
        {
            self.store.update_current(ShapeUpdate::PrimarySize(primary));
        }
        if let Some(mut height) = shape.kind.secondary_size() {
            if ui
                .add(egui::Slider::new(&mut height, 0.1..=4.0).text("Height"))
                .changed()
            {
                self.store.update_current(ShapeUpdate::SecondarySize(height));
            }
        }

        ui.add_space(4.0);
        let mut position = shape.position;
        if ui
            .add(egui::Slider::new(&mut position.x, -5.0..=5.0).text("X"))
            .changed()
        {
            self.store.update_current(ShapeUpdate::PositionX(position.x));
        }
        if ui
            .add(egui::Slider::new(&mut position.y, -5.0..=5.0).text("Y"))
            .changed()
        {
            self.store.update_current(ShapeUpdate::PositionY(position.y));
        }
        if ui
            .add(egui::Slider::new(&mut position.z, -5.0..=5.0).text("Z"))
            .changed()
        {
            self.store.update_current(ShapeUpdate::PositionZ(position.z));
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Color");
            let mut color = shape.color;
            if ui.color_edit_button_srgba(&mut color).changed() {
                self.store.update_current(ShapeUpdate::Color(color));
            }
        });
        let mut transparent = shape.transparent;
        if ui.checkbox(&mut transparent, "Transparent").changed() {
            self.store.update_current(ShapeUpdate::Transparent(transparent));
        }
    }

    /// Plot appearance and camera preferences
    fn display_section(&mut self, ui: &mut egui::Ui) {
        ui.checkbox(&mut self.plot.settings.fixed_bounds, "Fixed axis range");
        ui.checkbox(&mut self.plot.settings.show_grid, "Show floor grid");
        ui.checkbox(&mut self.plot.settings.shade, "Shade faces");
        ui.add(
            egui::Slider::new(&mut self.plot.settings.resolution, 16..=120)
                .text("Mesh resolution"),
        );
        ui.horizontal(|ui| {
            ui.label("Background");
            ui.color_edit_button_srgba(&mut self.plot.settings.background);
        });
        if ui.button("Reset view").clicked() {
            self.plot.reset_view();
        }
    }
}

impl eframe::App for ShapeLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("shapelab");
                ui.separator();
                ui.toggle_value(&mut self.show_settings, "⚙ Controls");
            });
        });

        // Control panel
        if self.show_settings {
            egui::SidePanel::left("control_panel")
                .min_width(230.0)
                .show(ctx, |ui| {
                    ui.heading("Scene");
                    ui.separator();
                    self.scene_section(ui);

                    ui.separator();
                    ui.heading("Shape");
                    ui.separator();
                    self.editor_section(ui);

                    ui.separator();
                    ui.collapsing("Display", |ui| {
                        self.display_section(ui);
                    });
                });
        }

        // Main plot
        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot.show(ui, &self.store);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                ui.horizontal(|ui| {
                    ui.small(format!("Shapes: {}", self.store.len()));
                    ui.separator();
                    let selected = match self.store.selected() {
                        Some(shape) => shape.label(),
                        None => "none",
                    };
                    ui.small(format!("Selected: {selected}"));
                    ui.separator();
                    ui.small(format!(
                        "Mesh: {} points, {} quads",
                        self.plot.point_count(),
                        self.plot.quad_count()
                    ));
                });
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        AppSettings::from_app(self).save();
        log::info!("Settings saved");
    }
}
