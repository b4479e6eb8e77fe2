// Brightness / skin-tone pre-pass, run in place before distortion.
// Replaces per-pixel float math with table lookups.
// Visual: a slightly brighter frame with warmer skin.

use crate::types::{BYTES_PER_PIXEL, PixelBuffer};

/// Channel gain applied to R, G and B, in percent (1.05x).
pub const GAIN_PERCENT: u32 = 105;
/// Extra red added to skin pixels after the gain.
pub const SKIN_RED_OFFSET: u8 = 10;
/// Extra green added to skin pixels after the gain.
pub const SKIN_GREEN_OFFSET: u8 = 5;

pub struct Beautify {
    // 0..255 -> min(255, round_half_up(v * 1.05))
    gain: [u8; 256],
}

impl Default for Beautify {
    fn default() -> Self {
        Self::new()
    }
}

impl Beautify {
    /// Build the gain table once at startup.
    pub fn new() -> Self {
        let mut gain = [0u8; 256];
        for (v, out) in gain.iter_mut().enumerate() {
            *out = ((v as u32 * GAIN_PERCENT + 50) / 100).min(255) as u8;
        }
        Self { gain }
    }

    /// Brighten every pixel and warm up the ones classified as skin.
    /// Alpha is left alone. Per-pixel and order-independent.
    pub fn apply_in_place(&self, frame: &mut PixelBuffer) {
        for px in frame.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            let (r, g, b) = (px[0], px[1], px[2]);
            let skin = is_skin(r, g, b);

            px[0] = self.gain[r as usize];
            px[1] = self.gain[g as usize];
            px[2] = self.gain[b as usize];

            if skin {
                px[0] = px[0].saturating_add(SKIN_RED_OFFSET);
                px[1] = px[1].saturating_add(SKIN_GREEN_OFFSET);
            }
        }
    }
}

/// Fixed RGB skin heuristic, evaluated on the incoming (pre-gain) values.
#[inline]
pub fn is_skin(r: u8, g: u8, b: u8) -> bool {
    r > 60 && g > 40 && b > 20 && r > g && r > b && r.saturating_sub(g) > 15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_table_clamps() {
        let b = Beautify::new();
        assert_eq!(b.gain[0], 0);
        assert_eq!(b.gain[100], 105);
        assert_eq!(b.gain[250], 255);
        assert_eq!(b.gain[255], 255);
    }

    #[test]
    fn skin_heuristic() {
        assert!(is_skin(200, 150, 120));
        assert!(!is_skin(200, 190, 120)); // R - G too small
        assert!(!is_skin(50, 30, 25)); // too dark
        assert!(!is_skin(100, 60, 110)); // blue dominates
    }

    #[test]
    fn skin_gets_extra_red_and_green() {
        let mut fb = PixelBuffer::solid(1, 1, [200, 150, 120, 255]);
        Beautify::new().apply_in_place(&mut fb);
        assert_eq!(fb.get_pixel(0, 0), Some([220, 163, 126, 255]));
    }

    #[test]
    fn non_skin_only_brightens_and_keeps_alpha() {
        let mut fb = PixelBuffer::solid(2, 1, [20, 40, 200, 77]);
        Beautify::new().apply_in_place(&mut fb);
        assert_eq!(fb.get_pixel(1, 0), Some([21, 42, 210, 77]));
    }

    #[test]
    fn saturates_at_white() {
        let mut fb = PixelBuffer::solid(1, 1, [250, 200, 100, 255]);
        Beautify::new().apply_in_place(&mut fb);
        assert_eq!(fb.get_pixel(0, 0), Some([255, 215, 105, 255]));
    }

    #[test]
    fn zero_sized_is_noop() {
        let mut fb = PixelBuffer::new(0, 0);
        Beautify::new().apply_in_place(&mut fb);
        assert!(fb.is_empty());
    }
}
