//! Building Viewer Demo
//!
//! Generates a synthetic multi-storey building survey and shows it in the
//! interactive viewer. The data is handed over from a background thread, the
//! way a host application would load it after the window is already open.
//!
//! ```text
//! RUST_LOG=info cargo run --bin building_viewer -- --storeys 3 --z-scale 2
//! ```

mod building;

use std::thread;

use anyhow::Context;
use clap::Parser;
use pointview_core::UnitScale;
use pointview_visualization::{InteractiveViewer, ViewerConfig};
use rand::thread_rng;

#[derive(Parser, Debug)]
#[command(name = "building_viewer", about = "Show a synthetic building in the pointview viewer")]
struct Args {
    /// Number of full storeys below the roof
    #[arg(long, default_value_t = 2)]
    storeys: usize,

    /// Meters per unit along X
    #[arg(long, default_value_t = 1.0)]
    x_scale: f64,

    /// Meters per unit along Y
    #[arg(long, default_value_t = 1.0)]
    y_scale: f64,

    /// Meters per unit along Z
    #[arg(long, default_value_t = 1.0)]
    z_scale: f64,

    /// Random offset added to every coordinate, in data units
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    /// Forget category colors whenever new data is loaded
    #[arg(long)]
    fresh_colors: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let unit_scale = UnitScale::try_new(args.x_scale, args.y_scale, args.z_scale)
        .context("invalid unit scale")?;

    let viewer = InteractiveViewer::new(ViewerConfig {
        window_title: "pointview - building".to_string(),
        clear_colors_on_load: args.fresh_colors,
        ..ViewerConfig::default()
    });
    let handle = viewer.handle();

    let loader = thread::spawn(move || -> pointview_core::Result<()> {
        let mut cloud = building::building(args.storeys);
        building::jitter(&mut cloud.points, args.jitter, &mut thread_rng());
        log::info!(
            "Generated {} building points in categories {:?}",
            cloud.len(),
            cloud.categories()
        );

        handle.set_unit_scales(unit_scale)?;
        handle.visualize_data(cloud.points)
    });

    viewer.run().context("viewer failed")?;

    match loader.join() {
        Ok(result) => result.context("failed to hand data to the viewer")?,
        Err(_) => anyhow::bail!("data loader thread panicked"),
    }
    Ok(())
}
