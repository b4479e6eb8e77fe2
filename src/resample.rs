// Distortion resampler: inverse-map every (strided) output pixel to a camera pixel.
// Visual: the warped frame. Pixels whose source falls outside the camera frame stay
// transparent, which shows up as dark fringes under strong effects.

use serde::{Deserialize, Serialize};

use crate::effect::EffectDescriptor;
use crate::error::{Error, Result};
use crate::types::{BYTES_PER_PIXEL, PixelBuffer, ensure_same_size};

/// Largest supported stride.
pub const MAX_SAMPLING_STEP: u8 = 3;

/// Side of the square each sample is replicated into, at every stride.
/// Strides above 2 leave the rest of each cell transparent.
pub const DILATION: u32 = 2;

/// Pixels between resampled lookups, `1..=3`. Picked once per device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplingStep(u8);

impl SamplingStep {
    pub const DENSE: SamplingStep = SamplingStep(1);

    pub fn new(step: u8) -> Result<Self> {
        if (1..=MAX_SAMPLING_STEP).contains(&step) {
            Ok(SamplingStep(step))
        } else {
            Err(Error::invalid_config(format!(
                "sampling step must be in 1..={MAX_SAMPLING_STEP}, got {step}"
            )))
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0 as u32
    }
}

impl Default for SamplingStep {
    fn default() -> Self {
        Self::DENSE
    }
}

impl TryFrom<u8> for SamplingStep {
    type Error = Error;

    fn try_from(step: u8) -> Result<Self> {
        SamplingStep::new(step)
    }
}

/// Coarse hardware tiers; each maps to a fixed stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Constrained,
    Low,
}

impl DeviceClass {
    pub fn sampling_step(self) -> SamplingStep {
        match self {
            DeviceClass::Desktop => SamplingStep(1),
            DeviceClass::Constrained => SamplingStep(2),
            DeviceClass::Low => SamplingStep(3),
        }
    }
}

/// Allocate a target and resample into it.
pub fn resample(
    source: &PixelBuffer,
    effect: &EffectDescriptor,
    step: SamplingStep,
    time: f64,
) -> PixelBuffer {
    let mut target = PixelBuffer::new(source.width(), source.height());
    let res = resample_into(source, &mut target, effect, step, time);
    debug_assert!(res.is_ok(), "target is allocated at the source size");
    target
}

/// Clear `target`, then fill it with `source` warped by `effect`.
///
/// Sampled coordinates run in raster order at `step`; each in-bounds lookup is
/// written to its own pixel and replicated right, down and diagonally (a
/// [`DILATION`] square). Source indices are floored, never rounded.
/// Where blocks overlap the later sample in scan order wins.
#[tracing::instrument(level = "trace", skip_all, fields(effect = %effect.kind, step = step.get()))]
pub fn resample_into(
    source: &PixelBuffer,
    target: &mut PixelBuffer,
    effect: &EffectDescriptor,
    step: SamplingStep,
    time: f64,
) -> Result<()> {
    ensure_same_size(source, target)?;
    target.clear();
    if source.is_empty() {
        return Ok(());
    }

    let (w, h) = source.dimensions();
    let stride = step.get() as usize;
    let src = source.as_bytes();
    let row_bytes = w as usize * BYTES_PER_PIXEL;

    for y in (0..h).step_by(stride) {
        for x in (0..w).step_by(stride) {
            let (fx, fy) = effect.map(x as f64, y as f64, w, h, time);
            let (sx, sy) = (fx.floor(), fy.floor());
            // NaN fails both comparisons and is skipped too.
            if !(sx >= 0.0 && sx < w as f64 && sy >= 0.0 && sy < h as f64) {
                continue; // visual: stays transparent
            }
            let so = sy as usize * row_bytes + sx as usize * BYTES_PER_PIXEL;
            let mut rgba = [0u8; 4];
            rgba.copy_from_slice(&src[so..so + BYTES_PER_PIXEL]);

            // Self, right, down, diagonal; clipped to the frame.
            let x_end = (x + DILATION).min(w);
            let y_end = (y + DILATION).min(h);
            for ty in y..y_end {
                for tx in x..x_end {
                    target.set_pixel(tx, ty, rgba);
                }
            }
        }
    }

    Ok(())
}
