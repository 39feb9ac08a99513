use std::path::PathBuf;

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::render::PlotSettings;
use crate::scene::PrimitiveKind;
use crate::ShapeLabApp;

/// Returns the path to the settings file: `~/.config/shapelab/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("shapelab");
    path.push("settings.json");
    path
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
///
/// Only preferences are persisted; the shape list itself always
/// starts fresh.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Editor
    pub show_settings: bool,
    pub add_kind: PrimitiveKind,

    // Plot
    pub show_grid: bool,
    pub shade: bool,
    pub fixed_bounds: bool,
    pub resolution: usize,

    // Color (stored as a u8 triple since Color32 isn't serde-friendly)
    pub background_r: u8,
    pub background_g: u8,
    pub background_b: u8,

    // Camera
    pub camera_distance: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        let plot = PlotSettings::default();
        Self {
            show_settings: true,
            add_kind: PrimitiveKind::Sphere,

            show_grid: plot.show_grid,
            shade: plot.shade,
            fixed_bounds: plot.fixed_bounds,
            resolution: plot.resolution,

            background_r: plot.background.r(),
            background_g: plot.background.g(),
            background_b: plot.background.b(),

            camera_distance: crate::render::Camera::default().distance(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Extract current settings from the running application.
    pub fn from_app(app: &ShapeLabApp) -> Self {
        Self {
            show_settings: app.show_settings,
            add_kind: app.add_kind,

            show_grid: app.plot.settings.show_grid,
            shade: app.plot.settings.shade,
            fixed_bounds: app.plot.settings.fixed_bounds,
            resolution: app.plot.settings.resolution,

            background_r: app.plot.settings.background.r(),
            background_g: app.plot.settings.background.g(),
            background_b: app.plot.settings.background.b(),

            camera_distance: app.plot.camera.distance(),
        }
    }

    /// Apply loaded settings to the running application.
    pub fn apply(&self, app: &mut ShapeLabApp) {
        app.show_settings = self.show_settings;
        app.add_kind = self.add_kind;

        app.plot.settings.show_grid = self.show_grid;
        app.plot.settings.shade = self.shade;
        app.plot.settings.fixed_bounds = self.fixed_bounds;
        app.plot.settings.resolution = self.resolution;

        app.plot.settings.background =
            egui::Color32::from_rgb(self.background_r, self.background_g, self.background_b);

        app.plot.camera.set_distance(self.camera_distance);
    }
}
