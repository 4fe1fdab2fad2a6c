mod app;
mod settings;

use anyhow::Context;
use einkdraw_core::time::MonotonicClock;
use einkdraw_engine::device::GpuInit;
use einkdraw_engine::logging::{init_logging, LoggingConfig};
use einkdraw_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::OverlayApp;
use crate::settings::OverlaySettings;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  einkdraw overlay");
    println!("  ────────────────────────────────────────────");
    println!("  U / Ctrl+Z  undo        C  clear");
    println!("  E  toggle drawing       K  toggle predictor");
    println!("  [ ]  lookahead -/+      1-4  stroke width");
    println!("  P  ink color            A  anti-aliasing");
    println!("  Esc  quit");
    println!();

    let settings = OverlaySettings::from_env();
    log::info!(
        "predictor={} lookahead={}ms multiplier={} width={}",
        settings.surface.predictor_kind,
        settings.surface.predictor.lookahead_ms,
        settings.surface.predictor.speed_multiplier,
        settings.surface.style.width
    );

    // The runtime stamps input with this clock; the surface reads the same one.
    let clock = MonotonicClock::new();
    let app = OverlayApp::new(&settings, clock).context("invalid overlay settings")?;

    let config = RuntimeConfig {
        title: "einkdraw".to_string(),
        initial_size: LogicalSize::new(1024.0, 768.0),
        transparent: settings.transparent,
        always_on_top: settings.always_on_top,
        decorations: !settings.transparent,
    };
    let gpu_init = if settings.transparent {
        GpuInit::overlay()
    } else {
        GpuInit::default()
    };

    Runtime::run(config, gpu_init, clock, app)
}
