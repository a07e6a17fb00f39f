//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::renderer::render_pixel;
use crate::{Color, RayGenerator, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Image coordinates of every pixel, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 16;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Edge buckets are clipped to the image, so the buckets tile it exactly
/// with no overlap.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    // Sort by distance from center (spiral order)
    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
///
/// The sort is stable, so buckets at equal distance keep their grid order
/// and the sequence is the same on every run.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let dx = b.x as f32 + b.width as f32 / 2.0 - center_x;
        let dy = b.y as f32 + b.height as f32 / 2.0 - center_y;
        dx * dx + dy * dy
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket.
///
/// Pixels come back in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, camera: &dyn RayGenerator) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());
    pixels.extend(
        bucket
            .pixels()
            .map(|(x, y)| render_pixel(scene, camera, x, y)),
    );
    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Light, Vec3};

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 32);
        assert_eq!(buckets.len(), 12); // 4x3 grid with clipped edges

        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
    }

    #[test]
    fn test_pixel_count_past_u32() {
        let bucket = Bucket::new(0, 0, 70_000, 70_000, 0);
        assert_eq!(bucket.pixel_count(), 4_900_000_000);
    }

    #[test]
    fn test_every_pixel_covered_once() {
        let (width, height) = (37, 23);
        let mut covered = vec![0u8; (width * height) as usize];

        for bucket in generate_buckets(width, height, 8) {
            for (x, y) in bucket.pixels() {
                covered[(y * width + x) as usize] += 1;
            }
        }

        assert!(covered.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(48, 48, 16);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!((first.x, first.y), (16, 16));

        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
    }

    #[test]
    fn test_render_bucket_row_major() {
        let scene = Scene::new(Light::new(Vec3::NEG_Y, 1.0));
        let camera = Camera::new(8, 8);
        let bucket = Bucket::new(2, 4, 3, 2, 0);

        let result = render_bucket(&bucket, &scene, &camera);
        assert_eq!(result.bucket, bucket);
        assert_eq!(result.pixels.len(), 6);
        assert!(result.pixels.iter().all(|&c| c == scene.background));

        let coords: Vec<_> = bucket.pixels().collect();
        assert_eq!(coords[0], (2, 4));
        assert_eq!(coords[2], (4, 4));
        assert_eq!(coords[3], (2, 5));
    }
}
