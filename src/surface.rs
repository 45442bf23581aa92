use crate::color::Color;
use crate::error::ExportError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

const CHANNELS: usize = 4;

/// Immutable full copy of a surface's pixels.
///
/// Snapshots are owned copies, never views into a live surface, so a stored
/// snapshot cannot change after it is taken.
#[derive(Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    width: u32,
    height: u32,
    pixels: Box<[u8]>,
}

impl SurfaceSnapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

// Pixel data is too large to be useful in debug output
impl std::fmt::Debug for SurfaceSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceSnapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Opaque RGBA pixel buffer the drawing tools paint onto.
///
/// Pixels are stored row-major with 4 channels each. Every write forces
/// alpha to 255.
#[derive(Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    background: Color,
    revision: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .field("revision", &self.revision)
            .finish()
    }
}

impl RasterSurface {
    /// Creates a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: Self::filled_buffer(width, height, background),
            background,
            revision: 0,
        }
    }

    fn filled_buffer(width: u32, height: u32, color: Color) -> Vec<u8> {
        let rgba = color.to_rgba();
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `[width, height]`, the shape egui uses for images.
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Increases on every mutation. Used to detect when the display is stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Color> {
        let i = self.index(x, y)?;
        Some(Color::rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Writes an opaque pixel. Returns false (and does nothing) outside the surface.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        self.pixels[i..i + CHANNELS].copy_from_slice(&color.to_rgba());
        self.revision += 1;
        true
    }

    /// Fills the whole surface with the background color.
    pub fn clear(&mut self) {
        self.pixels = Self::filled_buffer(self.width, self.height, self.background);
        self.revision += 1;
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone().into_boxed_slice(),
        }
    }

    /// Replaces the surface contents with `snapshot`.
    ///
    /// A snapshot taken before a resize is drawn at the origin over the
    /// background, clipped to the current size.
    pub fn restore(&mut self, snapshot: &SurfaceSnapshot) {
        if snapshot.width == self.width && snapshot.height == self.height {
            self.pixels.copy_from_slice(&snapshot.pixels);
        } else {
            log::debug!(
                "Restoring {}x{} snapshot onto {}x{} surface",
                snapshot.width,
                snapshot.height,
                self.width,
                self.height
            );
            let mut pixels = Self::filled_buffer(self.width, self.height, self.background);
            Self::blit(&snapshot.pixels, snapshot.width, snapshot.height, &mut pixels, self.width, self.height);
            self.pixels = pixels;
        }
        self.revision += 1;
    }

    /// Changes the dimensions, keeping existing content anchored at the origin.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        let mut pixels = Self::filled_buffer(width, height, self.background);
        Self::blit(&self.pixels, self.width, self.height, &mut pixels, width, height);
        self.pixels = pixels;
        self.width = width;
        self.height = height;
        self.revision += 1;
    }

    fn blit(src: &[u8], src_width: u32, src_height: u32, dst: &mut [u8], dst_width: u32, dst_height: u32) {
        let row_bytes = src_width.min(dst_width) as usize * CHANNELS;
        let rows = src_height.min(dst_height) as usize;
        let src_stride = src_width as usize * CHANNELS;
        let dst_stride = dst_width as usize * CHANNELS;
        for row in 0..rows {
            let from = row * src_stride;
            let to = row * dst_stride;
            dst[to..to + row_bytes].copy_from_slice(&src[from..from + row_bytes]);
        }
    }

    /// Swaps in a fully computed pixel buffer of the same dimensions.
    pub(crate) fn commit(&mut self, working: SurfaceSnapshot) {
        debug_assert_eq!(working.width, self.width);
        debug_assert_eq!(working.height, self.height);
        self.pixels = working.pixels.into_vec();
        self.revision += 1;
    }

    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Encodes the surface as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }
        let image = self.to_rgba_image().ok_or(ExportError::EmptySurface {
            width: self.width,
            height: self.height,
        })?;
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

impl SurfaceSnapshot {
    pub(crate) fn get_pixel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some(Color::rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    pub(crate) fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.pixels[i..i + CHANNELS].copy_from_slice(&color.to_rgba());
    }
}
