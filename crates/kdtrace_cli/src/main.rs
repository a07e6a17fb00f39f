use anyhow::{Context, Result};
use clap::Parser;
use kdtrace_renderer::{render, save_png, ProgressSink, RenderConfig};
use std::sync::atomic::{AtomicUsize, Ordering};

mod cli;
mod logger;
mod scene;

use cli::Args;
use logger::init_logger;

/// Logs render progress in ten percent steps.
struct LogProgress {
    last_decile: AtomicUsize,
}

impl ProgressSink for LogProgress {
    fn bucket_done(&self, completed: usize, total: usize) {
        let decile = completed * 10 / total.max(1);
        if self.last_decile.fetch_max(decile, Ordering::Relaxed) < decile {
            log::info!("Rendered {}/{} buckets ({}%)", completed, total, decile * 10);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    log::info!("Starting kdtrace");

    let mesh = scene::load_mesh(args.obj.as_deref())?;
    let scene = scene::build_scene(&mesh)?;
    let camera = scene::camera(args.width, args.height);

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        bucket_size: args.bucket_size,
        threads: args.threads,
    };

    let progress = LogProgress {
        last_decile: AtomicUsize::new(0),
    };
    let image = render(&scene, &camera, &config, &progress).context("render failed")?;

    save_png(&image, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
