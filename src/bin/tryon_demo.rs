use garment_tryon::compositor::PerspectiveCompositor;
use garment_tryon::config::tryon;
use garment_tryon::diagnostics::{OverlayStatus, TimingBreakdown};
use garment_tryon::garment::{GarmentLandmarkMapper, GarmentSummary};
use garment_tryon::image::io::{load_rgba_image, read_json_file, save_rgba_png, write_json_file};
use garment_tryon::pose::PoseExtractor;
use garment_tryon::runtime::{prepare_from_response, LandmarkResponse};
use garment_tryon::types::{BodyQuad, PoseResult};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
struct TryOnReport {
    garment: GarmentSummary,
    body_quad: BodyQuad,
    frame_size: [usize; 2],
    overlay: OverlayStatus,
    timings: TimingBreakdown,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: tryon_demo <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = tryon::load_config(Path::new(&config_path))?;

    let garment = load_rgba_image(&config.input.garment_image)?;
    let segmented = match &config.input.segmented_image {
        Some(path) => Some(load_rgba_image(path)?),
        None => None,
    };
    let response = LandmarkResponse {
        landmarks: config.input.landmarks.resolve(garment.w, garment.h),
        segmented,
    };
    let mapper = GarmentLandmarkMapper::new(config.garment.clone());
    let profile = prepare_from_response(&mapper, config.garment_source, &garment, &response)
        .map_err(|e| format!("Garment rejected: {e}"))?;

    let frame = load_rgba_image(&config.input.frame_image)?;
    let pose: PoseResult = read_json_file(&config.input.pose_json)?;
    let body = PoseExtractor::new(config.pose.clone()).extract(&pose);

    let compositor = PerspectiveCompositor::new(config.compositor.clone());
    let outcome = compositor.composite_profile(&profile, &body, frame.as_view());

    save_rgba_png(&outcome.frame, &config.output.composite_png)?;
    println!("Composite written to {}", config.output.composite_png.display());
    if let Some(path) = &config.output.canvas_png {
        save_rgba_png(profile.canvas(), path)?;
        println!("Canonical canvas written to {}", path.display());
    }

    let report = TryOnReport {
        garment: profile.summary(),
        body_quad: body,
        frame_size: [frame.w, frame.h],
        overlay: outcome.overlay,
        timings: outcome.timings,
    };
    print_text_summary(&report);
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_text_summary(report: &TryOnReport) {
    let g = &report.garment;
    println!(
        "Garment {}x{} -> canvas {}x{} (draw {:.1}x{:.1} at x={:.1})",
        g.source_size[0],
        g.source_size[1],
        g.canvas_size[0],
        g.canvas_size[1],
        g.placement.draw_width,
        g.placement.draw_height,
        g.placement.offset_x
    );
    for (name, p) in ["topLeft", "bottomLeft", "bottomRight", "topRight"]
        .iter()
        .zip(g.quad.corners.iter())
    {
        println!("  garment {name:<12} ({:.1}, {:.1})", p.x, p.y);
    }
    for (name, p) in ["leftShoulder", "leftHip", "rightHip", "rightShoulder"]
        .iter()
        .zip(report.body_quad.corners.iter())
    {
        println!("  body    {name:<12} ({:.1}, {:.1})", p.x, p.y);
    }
    match &report.overlay {
        OverlayStatus::Drawn => println!("Overlay drawn"),
        OverlayStatus::Skipped { reason } => println!("Overlay skipped: {reason}"),
        other => println!("Overlay: {other:?}"),
    }
    for stage in &report.timings.stages {
        println!("  {:<10} {:>8.3} ms", stage.label, stage.elapsed_ms);
    }
    println!("  {:<10} {:>8.3} ms", "total", report.timings.total_ms);
}
