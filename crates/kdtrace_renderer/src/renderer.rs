//! Bucket-parallel renderer.
//!
//! Buckets are shaded on a dedicated rayon pool. The scene and camera are
//! shared read-only, every bucket owns its own pixel storage, and the final
//! image is assembled on the calling thread once all buckets are done.

use crate::{
    bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE},
    output::color_to_rgba,
    Color, RayGenerator, RenderError, RenderResult, Scene,
};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Edge length of a square bucket in pixels
    pub bucket_size: u32,
    /// Worker thread count; `None` uses twice the available parallelism
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            bucket_size: DEFAULT_BUCKET_SIZE,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Number of worker threads a render will use.
    pub fn worker_count(&self) -> usize {
        match self.threads {
            Some(n) => n.max(1),
            None => {
                let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
                cores * 2
            }
        }
    }

    fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidBucketSize);
        }
        Ok(())
    }
}

/// Observer notified once per finished bucket.
///
/// Calls arrive from worker threads in completion order, which is not the
/// order buckets were queued in.
pub trait ProgressSink: Sync {
    fn bucket_done(&self, completed: usize, total: usize);
}

/// Progress sink that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn bucket_done(&self, _completed: usize, _total: usize) {}
}

/// Shade a single pixel.
pub fn render_pixel(scene: &Scene, camera: &dyn RayGenerator, x: u32, y: u32) -> Color {
    scene.trace(&camera.ray_for_pixel(x, y))
}

/// Linear-light image, row-major, origin at the top left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        for ((x, y), color) in result.bucket.pixels().zip(&result.pixels) {
            self.set(x, y, *color);
        }
    }

    /// Convert to sRGB-encoded RGBA bytes (for saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgba(*color))
            .collect()
    }
}

/// Render the scene on a pool of worker threads.
///
/// Blocks until every bucket is finished. A panic on any worker aborts the
/// whole render and resumes on the caller.
pub fn render(
    scene: &Scene,
    camera: &dyn RayGenerator,
    config: &RenderConfig,
    progress: &dyn ProgressSink,
) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let threads = config.worker_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("kdtrace-worker-{i}"))
        .build()?;

    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    let total = buckets.len();
    let completed = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} in {} buckets on {} threads",
        config.width,
        config.height,
        total,
        threads
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = pool.install(|| {
        buckets
            .par_iter()
            .map(|bucket| {
                let result = render_bucket(bucket, scene, camera);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                log::debug!("Bucket {} done ({}/{})", bucket.index, done, total);
                progress.bucket_done(done, total);
                result
            })
            .collect()
    });

    let image = assemble(config, &results);
    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

/// Render on the calling thread, bucket by bucket.
pub fn render_serial(
    scene: &Scene,
    camera: &dyn RayGenerator,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let results: Vec<BucketResult> =
        generate_buckets(config.width, config.height, config.bucket_size)
            .iter()
            .map(|bucket| render_bucket(bucket, scene, camera))
            .collect();

    Ok(assemble(config, &results))
}

fn assemble(config: &RenderConfig, results: &[BucketResult]) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    for result in results {
        image.write_bucket(result);
    }
    image
}
