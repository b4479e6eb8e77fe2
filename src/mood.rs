// Mood presets: what each button in the booth bundles together.
// Visual: a mood picks the warp, the tinted wash over the captured photo,
// and the emoji used to label it.

use std::fmt;
use std::str::FromStr;

use crate::effect::{EffectDescriptor, EffectKind};
use crate::error::Error;
use crate::types::{BYTES_PER_PIXEL, PixelBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Surprised,
    Cool,
    Love,
}

/// Straight-alpha overlay color; alpha in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub rgb: [u8; 3],
    pub alpha: u8,
}

/// Every tint is a 20% wash.
const TINT_ALPHA: u8 = 51;

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Surprised,
        Mood::Cool,
        Mood::Love,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Surprised => "surprised",
            Mood::Cool => "cool",
            Mood::Love => "love",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Angry => "😠",
            Mood::Surprised => "😲",
            Mood::Cool => "😎",
            Mood::Love => "❤️",
        }
    }

    pub fn tint(&self) -> Tint {
        let rgb = match self {
            Mood::Happy => [255, 255, 0],
            Mood::Sad => [0, 0, 255],
            Mood::Angry => [255, 0, 0],
            Mood::Surprised => [128, 0, 128],
            Mood::Cool => [0, 255, 255],
            Mood::Love => [255, 105, 180],
        };
        Tint { rgb, alpha: TINT_ALPHA }
    }

    /// The warp this mood applies, with its tuned strength.
    pub fn effect(&self) -> EffectDescriptor {
        match self {
            Mood::Happy => EffectKind::Bulge.descriptor(),
            Mood::Sad => EffectKind::Wave.descriptor(),
            Mood::Angry => EffectKind::Pinch.descriptor(),
            Mood::Surprised => EffectKind::Fisheye.descriptor(),
            Mood::Cool => EffectKind::Twist.descriptor(),
            Mood::Love => EffectKind::Heart.descriptor(),
        }
    }

    /// Suggested file name for the `n`th captured still.
    pub fn file_name(&self, n: u32) -> String {
        format!("mood-{}-{n}.png", self.id())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::UnknownMood(s.to_string()))
    }
}

/// Source-over a solid tint across the whole frame.
/// Visual: the captured photo gets a faint wash of the mood color.
pub fn apply_tint(frame: &mut PixelBuffer, tint: Tint) {
    let a = tint.alpha as u32;
    let inv = 255 - a;
    for px in frame.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        let da = px[3] as u32;
        let out_a = a + (da * inv + 127) / 255;
        if out_a == 0 {
            continue;
        }
        for c in 0..3 {
            // straight alpha: weight each side by its coverage, then un-premultiply
            let premul = tint.rgb[c] as u32 * a * 255 + px[c] as u32 * da * inv;
            px[c] = ((premul + out_a * 255 / 2) / (out_a * 255)).min(255) as u8;
        }
        px[3] = out_a.min(255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_moods() {
        assert_eq!("Love".parse::<Mood>().unwrap(), Mood::Love);
        assert!(matches!("meh".parse::<Mood>(), Err(Error::UnknownMood(_))));
    }

    #[test]
    fn moods_map_to_distinct_effects() {
        let kinds: std::collections::HashSet<_> =
            Mood::ALL.iter().map(|m| m.effect().kind).collect();
        assert_eq!(kinds.len(), Mood::ALL.len());
        assert!(Mood::ALL.iter().all(|m| !m.effect().is_identity()));
    }

    #[test]
    fn capture_names() {
        assert_eq!(Mood::Surprised.file_name(3), "mood-surprised-3.png");
    }

    #[test]
    fn tint_over_opaque_black() {
        let mut fb = PixelBuffer::solid(1, 1, [0, 0, 0, 255]);
        apply_tint(&mut fb, Mood::Angry.tint());
        // 255 * 51 / 255 = 51
        assert_eq!(fb.get_pixel(0, 0), Some([51, 0, 0, 255]));
    }

    #[test]
    fn tint_over_transparent_is_the_tint() {
        let mut fb = PixelBuffer::new(1, 1);
        apply_tint(&mut fb, Mood::Sad.tint());
        assert_eq!(fb.get_pixel(0, 0), Some([0, 0, 255, 51]));
    }

    #[test]
    fn tint_keeps_opaque_pixels_opaque() {
        let mut fb = PixelBuffer::solid(3, 3, [120, 90, 60, 255]);
        apply_tint(&mut fb, Mood::Cool.tint());
        assert!(fb.as_bytes().chunks_exact(4).all(|p| p[3] == 255));
    }
}
