//! Interactive viewer for labeled 3D point data
//!
//! Points are normalized into a fixed viewing volume, colored by category
//! and drawn as shaded markers next to reference axes:
//! - Isotropic X/Y scaling with exaggerated Z
//! - Auto-fit perspective camera
//! - Rotate, pan and zoom from pointer, wheel and keyboard
//! - Thread-safe handle for loading data from any thread
//!
//! ```rust,no_run
//! use pointview_core::{LabeledPoint, UnitScale};
//! use pointview_visualization::{InteractiveViewer, ViewerConfig};
//!
//! let viewer = InteractiveViewer::new(ViewerConfig::default());
//! let handle = viewer.handle();
//! handle.set_unit_scales(UnitScale::new(1.0, 1.0, 3.0)).unwrap();
//! handle.visualize_data(vec![LabeledPoint::new(0.0, 0.0, 0.0, "wall")]).unwrap();
//! viewer.run().unwrap();
//! ```

pub mod camera;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod frame;
pub mod input;
pub mod interactive_viewer;
pub mod normalize;
pub mod pipeline;
pub mod scene;
pub mod viewer;

pub use camera::CameraState;
pub use color::{Color, ColorRegistry, PALETTE};
pub use config::ViewerConfig;
pub use dispatch::{CommandQueue, ViewerCommand, ViewerHandle};
pub use frame::FrameBuilder;
pub use input::{
    ContextMenuItem, InputConfig, InputController, InputEvent, InputResponse, ViewKey,
};
pub use interactive_viewer::InteractiveViewer;
pub use normalize::Normalization;
pub use pipeline::{TransformPipeline, TransformState, ViewAction};
pub use scene::{Scene, SceneState};
pub use viewer::{ViewSnapshot, ViewerCore};

use pointview_core::{LabeledPoint, Result, UnitScale};

/// Show `points` in a new window and block until it is closed
pub fn show_points(points: Vec<LabeledPoint>, unit_scale: UnitScale) -> Result<()> {
    let viewer = InteractiveViewer::new(ViewerConfig {
        unit_scale,
        ..ViewerConfig::default()
    });
    viewer.handle().visualize_data(points)?;
    viewer.run()
}
