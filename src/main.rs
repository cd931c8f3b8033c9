use async_trait::async_trait;
use garment_tryon::compositor::{CompositedFrame, PerspectiveCompositor};
use garment_tryon::config::live::{self, LiveDemoConfig};
use garment_tryon::diagnostics::{FrameReport, LoopStats};
use garment_tryon::garment::{GarmentLandmarkMapper, GarmentSource};
use garment_tryon::image::io::{decode_rgba_image, encode_png, save_rgba_png, write_json_file};
use garment_tryon::image::Rgba8Image;
use garment_tryon::pose::PoseExtractor;
use garment_tryon::runtime::{
    FrameLoop, FrameSink, FrameSource, GarmentLandmarkProvider, GarmentSlot, GarmentUploader,
    LandmarkResponse, PoseProvider, PoseProviderConfig,
};
use garment_tryon::types::{NamedKeypoint, Point2D, PoseResult, RawLandmarkSet};
use log::{info, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const GARMENT_W: usize = 300;
const GARMENT_H: usize = 400;
/// Shirt corners `(index, x, y)` in garment pixels.
const GARMENT_CORNERS: [(usize, f32, f32); 4] = [
    (6, 60.0, 90.0),
    (14, 60.0, 380.0),
    (16, 240.0, 380.0),
    (24, 240.0, 90.0),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = match env::args().nth(1) {
        Some(path) => live::load_config(Path::new(&path))?,
        None => LiveDemoConfig::default(),
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    runtime.block_on(run_live(config))
}

async fn run_live(config: LiveDemoConfig) -> Result<(), String> {
    let slot = GarmentSlot::new();
    let uploader = GarmentUploader::new(
        SyntheticLandmarks,
        GarmentLandmarkMapper::new(config.garment.clone()),
        GarmentSource::Original,
    );
    let first = encode_png(&synthetic_garment([200, 40, 40, 255]))?;
    uploader
        .upload(&first, &slot)
        .await
        .map_err(|e| e.to_string())?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received, stopping");
                cancel.cancel();
            }
        });
    }

    let (w, h) = (config.frame_width, config.frame_height);
    let mut frame_loop = FrameLoop::new(
        SyntheticCamera::new(w, h, config.frame_count),
        SwayingTorso::new(w, h),
        DemoSink {
            output_dir: config.output_dir.clone(),
        },
        slot.subscribe(),
        config.loop_params.clone(),
    )
    .with_extractor(PoseExtractor::new(config.pose.clone()))
    .with_compositor(PerspectiveCompositor::new(config.compositor.clone()));

    let fps = config.loop_params.target_fps.max(1.0);
    let swap = async {
        let Some(at) = config.swap_garment_at else {
            return Ok::<(), String>(());
        };
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = tokio::time::sleep(Duration::from_secs_f64(at as f64 / fps)) => {}
        }
        let second = encode_png(&synthetic_garment([40, 80, 200, 255]))?;
        uploader
            .upload(&second, &slot)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    };
    let live = async {
        let stats = frame_loop.run(cancel.clone()).await;
        cancel.cancel();
        stats
    };
    let (stats, swapped): (LoopStats, Result<(), String>) = tokio::join!(live, swap);
    swapped?;

    print_summary(&stats);
    if let Some(path) = &config.stats_json {
        write_json_file(path, &stats)?;
        println!("Stats written to {}", path.display());
    }
    Ok(())
}

fn print_summary(stats: &LoopStats) {
    println!("frames presented : {}", stats.frames_presented);
    println!("  with overlay   : {}", stats.overlays_drawn);
    println!("  overlay skipped: {}", stats.overlays_skipped);
    println!("  no garment     : {}", stats.frames_without_garment);
    println!("  pose failures  : {}", stats.inference_failures);
    println!("triggers dropped : {}", stats.triggers_dropped);
}

/// Shirt-shaped block on a transparent background.
fn synthetic_garment(colour: [u8; 4]) -> Rgba8Image {
    let mut img = Rgba8Image::new(GARMENT_W, GARMENT_H);
    for y in 80..390 {
        for x in 50..250 {
            img.set(x, y, colour);
        }
    }
    img
}

/// Landmark service stand-in: normalised landmarks, as a model would emit.
struct SyntheticLandmarks;

#[async_trait]
impl GarmentLandmarkProvider for SyntheticLandmarks {
    async fn detect(&self, encoded: &[u8]) -> Result<LandmarkResponse, String> {
        let upload = decode_rgba_image(encoded)?;
        let mut values = vec![0.5f32; 52];
        for &(index, x, y) in &GARMENT_CORNERS {
            values[2 * index] = x / GARMENT_W as f32;
            values[2 * index + 1] = y / GARMENT_H as f32;
        }
        Ok(LandmarkResponse {
            landmarks: RawLandmarkSet::from_normalized(&values, upload.w as u32, upload.h as u32),
            segmented: None,
        })
    }

    fn name(&self) -> &'static str {
        "synthetic-landmarks"
    }
}

struct SyntheticCamera {
    w: usize,
    h: usize,
    remaining: u64,
}

impl SyntheticCamera {
    fn new(w: usize, h: usize, frames: u64) -> Self {
        Self {
            w,
            h,
            remaining: frames,
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Option<Rgba8Image> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let mut frame = Rgba8Image::new(self.w, self.h);
        for y in 0..self.h {
            let shade = (40 + y * 120 / self.h.max(1)) as u8;
            for x in 0..self.w {
                frame.set(x, y, [shade, shade, shade / 2 + 60, 255]);
            }
        }
        Some(frame)
    }
}

/// Torso that sways left and right; every 20th frame loses the hips.
struct SwayingTorso {
    w: f32,
    h: f32,
    calls: AtomicU64,
}

impl SwayingTorso {
    fn new(w: usize, h: usize) -> Self {
        Self {
            w: w as f32,
            h: h as f32,
            calls: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl PoseProvider for SwayingTorso {
    async fn estimate(
        &self,
        _frame: &Rgba8Image,
        _config: &PoseProviderConfig,
    ) -> Result<PoseResult, String> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(5)).await;

        let t = n as f32 / 15.0;
        let cx = self.w * (0.5 + 0.12 * t.sin());
        let half = self.w * 0.15;
        let tilt = self.h * 0.03 * t.cos();
        let (top, bottom) = (self.h * 0.28, self.h * 0.85);
        let kp = |part: &str, x: f32, y: f32| NamedKeypoint::new(part, Point2D::new(x, y), 0.9);

        let mut keypoints = vec![
            kp("leftShoulder", cx - half, top + tilt),
            kp("rightShoulder", cx + half, top - tilt),
        ];
        if n % 20 != 19 {
            keypoints.push(kp("leftHip", cx - half * 0.9, bottom + tilt));
            keypoints.push(kp("rightHip", cx + half * 0.9, bottom - tilt));
        }
        Ok(PoseResult::single(keypoints))
    }

    fn name(&self) -> &'static str {
        "swaying-torso"
    }
}

struct DemoSink {
    output_dir: Option<PathBuf>,
}

impl FrameSink for DemoSink {
    fn present(&mut self, frame: CompositedFrame, report: &FrameReport) {
        if let Some(dir) = &self.output_dir {
            let path = dir.join(format!("frame_{:04}.png", report.frame_index));
            if let Err(err) = save_rgba_png(&frame, &path) {
                warn!("{err}");
            }
        }
    }
}
