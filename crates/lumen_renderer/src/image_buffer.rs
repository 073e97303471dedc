//! Pixel sinks: where rendered colors go.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::material::Color;

/// Destination for rendered pixels.
///
/// Render workers call `write_pixel` concurrently, each for a different
/// pixel, so implementations must tolerate concurrent writes to distinct
/// coordinates.
pub trait PixelSink: Send + Sync {
    /// Image size as `(columns, rows)`.
    fn resolution(&self) -> (u32, u32);

    /// Store the color of pixel (`col`, `row`).
    fn write_pixel(&self, col: u32, row: u32, color: Color);
}

/// In-memory linear color image.
///
/// Each channel is stored as the bit pattern of an `f64` in an atomic, so
/// writes need only a shared reference.
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[AtomicU64; 3]>,
}

impl ImageBuffer {
    /// Create a black image.
    pub fn new(width: u32, height: u32) -> Self {
        let zero = 0f64.to_bits();
        let pixels = (0..width as usize * height as usize)
            .map(|_| [AtomicU64::new(zero), AtomicU64::new(zero), AtomicU64::new(zero)])
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Get the color of a pixel, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = &self.pixels[self.index(x, y)?];
        Some(Color::new(
            f64::from_bits(pixel[0].load(Ordering::Relaxed)),
            f64::from_bits(pixel[1].load(Ordering::Relaxed)),
            f64::from_bits(pixel[2].load(Ordering::Relaxed)),
        ))
    }

    /// Set the color of a pixel. Writes outside the image are dropped.
    pub fn set(&self, x: u32, y: u32, color: Color) {
        let Some(index) = self.index(x, y) else {
            log::warn!(
                "Pixel ({}, {}) outside {}x{} image, dropped",
                x,
                y,
                self.width,
                self.height
            );
            return;
        };
        let pixel = &self.pixels[index];
        pixel[0].store(color.x.to_bits(), Ordering::Relaxed);
        pixel[1].store(color.y.to_bits(), Ordering::Relaxed);
        pixel[2].store(color.z.to_bits(), Ordering::Relaxed);
    }

    /// Snapshot of all pixels in row-major order.
    pub fn pixels(&self) -> Vec<Color> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter_map(|(x, y)| self.get(x, y))
            .collect()
    }

    /// Paint every pixel whose row or column is a multiple of `interval`.
    pub fn print_grid(&self, interval: u32, color: Color) {
        if interval == 0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                if x % interval == 0 || y % interval == 0 {
                    self.set(x, y, color);
                }
            }
        }
    }

    /// Convert to 8-bit RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels().into_iter().flat_map(color_to_rgba).collect()
    }
}

impl PixelSink for ImageBuffer {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn write_pixel(&self, col: u32, row: u32, color: Color) {
        self.set(col, row, color);
    }
}

/// Convert a linear color to opaque 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}
