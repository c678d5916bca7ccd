//! Viewer configuration

use pointview_core::UnitScale;
use pointview_gpu::RenderConfig;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::input::InputConfig;

/// Everything a host can tune about the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub background: Color,
    pub point_radius: f64,
    pub axis_length: f64,
    pub axis_marker_radius: f64,
    /// Unit scale used until the host sets one
    pub unit_scale: UnitScale,
    pub input: InputConfig,
    /// Forget category colors at every data load
    pub clear_colors_on_load: bool,
}

impl ViewerConfig {
    /// GPU-side settings derived from this configuration
    pub fn render_config(&self) -> RenderConfig {
        let [r, g, b] = self.background.to_linear_f32();
        RenderConfig {
            background_color: [r as f64, g as f64, b as f64, 1.0],
            ..RenderConfig::default()
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "pointview".to_string(),
            window_width: 1200,
            window_height: 800,
            background: Color::LIGHT_GRAY,
            point_radius: 0.3,
            axis_length: 50.0,
            axis_marker_radius: 1.0,
            unit_scale: UnitScale::default(),
            input: InputConfig::default(),
            clear_colors_on_load: false,
        }
    }
}
