// Core pixel types shared by the resampler, the pre-pass and the driver.

use crate::error::{Error, Result};

/// Bytes per RGBA8 sample.
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned RGBA8 frame, row-major, top-left origin.
/// Visual: one camera frame or one rendered output, exactly as it would be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,      // how wide the frame is (pixels)
    height: u32,     // how tall the frame is (pixels)
    data: Vec<u8>,   // width * height * 4 bytes, R G B A per pixel
}

impl PixelBuffer {
    /// A fully transparent buffer (all zero bytes).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; byte_len(width, height)],
        }
    }

    /// A buffer filled with one RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self { width, height, data }
    }

    /// Wrap raw RGBA8 bytes; the length must match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != byte_len(width, height) {
            return Err(Error::BufferLength { width, height, len: data.len() });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of (x, y). Caller guarantees bounds.
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL
    }

    /// RGBA at (x, y), or None outside the buffer.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some([self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]])
    }

    /// Set RGBA at (x, y). No-op outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Zero every byte (transparent black).
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Bulk copy from a same-sized buffer.
    pub fn copy_from(&mut self, src: &PixelBuffer) -> Result<()> {
        ensure_same_size(src, self)?;
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    /// Reallocate to new dimensions, dropping the old contents.
    /// Returns true when the size actually changed.
    pub fn reallocate(&mut self, width: u32, height: u32) -> bool {
        if self.dimensions() == (width, height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.data = vec![0u8; byte_len(width, height)];
        true
    }

    /// Pack into 0x00RRGGBB words for a window (alpha dropped).
    /// Visual: what minifb shows for this frame; transparent pixels show as black.
    pub fn pack_0rgb_into(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.data.chunks_exact(BYTES_PER_PIXEL).map(|p| {
            ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | (p[2] as u32)
        }));
    }

    /// Convert into an `image` buffer for encoding by the caller.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        // Length is guaranteed by construction, so from_raw cannot fail here.
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height, data: img.into_raw() }
    }
}

/// Fail fast when two buffers disagree on size.
pub fn ensure_same_size(src: &PixelBuffer, dst: &PixelBuffer) -> Result<()> {
    if src.dimensions() != dst.dimensions() {
        return Err(Error::dimension_mismatch(dst.dimensions(), src.dimensions()));
    }
    Ok(())
}

#[inline]
fn byte_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * BYTES_PER_PIXEL
}
