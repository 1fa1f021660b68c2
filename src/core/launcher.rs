use anyhow::{Context, Result};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::capture::{FrameSource, JpegWriter, OpenCvCamera};
use crate::core::layout::DirectoryLayout;
use crate::core::normalizer;
use crate::core::session::CaptureSession;
use crate::shared::config::CollectorConfig;
use crate::shared::constants;
use crate::shared::error::CollectorError;
use crate::ui::HighGuiFeed;

pub fn run_collect(config: &CollectorConfig) -> Result<()> {
    println!("\nControls:");
    for line in constants::CONTROLS_LEGEND {
        println!("{}", line);
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let layout = DirectoryLayout::new(config.base_dir.clone(), config.categories.clone());
    let feed = HighGuiFeed::new(config.poll_interval_ms, interrupted);
    let writer = JpegWriter::new(config.jpeg_quality);

    crate::utils::logger::info(&format!(
        "collect: camera={} base_dir={} categories({})={}",
        config.camera_index,
        config.base_dir.display(),
        config.categories.len(),
        config
            .categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",")
    ));

    let camera_index = config.camera_index;
    let mut session = match CaptureSession::initialize(
        layout,
        || OpenCvCamera::open(camera_index),
        feed,
        writer,
    ) {
        Ok(session) => session,
        Err(err @ CollectorError::DeviceUnavailable { .. }) => {
            eprintln!("❌ Error: Could not open webcam");
            return Err(err.into());
        }
        Err(err) => return Err(err).context("failed to prepare capture session"),
    };

    println!("\nWebcam Data Collection App");
    println!("-------------------------");

    let summary = session.run().context("capture session aborted")?;
    crate::utils::logger::debug(&format!("final phase: {:?}", session.state().phase()));

    println!(
        "\n✅ Session finished: {} image(s) captured{}",
        summary.images_captured,
        summary
            .last_category
            .map(|c| format!(" (last category: {})", c))
            .unwrap_or_default()
    );
    crate::utils::logger::info(&format!("session finished: {} image(s)", summary.images_captured));

    Ok(())
}

pub fn run_setup(config: &CollectorConfig) -> Result<()> {
    let layout = DirectoryLayout::new(config.base_dir.clone(), config.categories.clone());
    let created = layout
        .initialize()
        .with_context(|| format!("failed to prepare {}", config.base_dir.display()))?;

    println!("{}/", layout.base_dir().display());
    for category in layout.categories().iter() {
        let dir = layout.category_dir(category);
        let marker = if created.contains(&dir) { "created" } else { "exists" };
        println!("  {}/  [{}]", category, marker);
    }
    Ok(())
}

pub fn run_probe(camera_index: i32) -> Result<()> {
    let mut camera = OpenCvCamera::open(camera_index)?;
    let report = camera.report();
    if let Err(err) = camera.release() {
        crate::utils::logger::error(&format!("camera {} release failed: {}", camera.index(), err));
    }

    println!("{}", serde_json::to_string_pretty(&report?)?);
    Ok(())
}

pub fn run_normalize(dir: &Path, marker: &str, json: bool) -> Result<()> {
    let names = normalizer::normalize_dir(dir, marker)?;

    if json {
        println!("{}", serde_json::to_string(&names)?);
    } else {
        println!("{:?}", names);
    }
    Ok(())
}
