//! Application entry point for the lightning bolt viewer.
//!
//! This binary sets up logging and eframe/egui, and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod export;
mod playback;
mod style;
mod viewer;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

/// Starts the native eframe application.
///
/// Log filtering follows `RUST_LOG`, defaulting to info for the viewer
/// and the growth core.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bolt_view=info,bolt_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting lightning bolt viewer");

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Lightning Bolt",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
