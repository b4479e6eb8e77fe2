// Effect catalogue: named inverse coordinate maps plus their default parameters.
// Visual: each effect decides, for every output pixel, which camera pixel shows up there.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Animation speed of the wave phase, per millisecond.
const WAVE_TIME_SCALE: f64 = 0.002;
/// Animation speed of the twist angle, per millisecond.
const TWIST_TIME_SCALE: f64 = 0.0005;
/// Ghost split offset in pixels per unit of strength.
const GHOST_OFFSET_SCALE: f64 = 5.0;

/// Closed set of geometric effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    None,
    Bulge,
    Pinch,
    Wave,
    Fisheye,
    Twist,
    Ghost,
    Heart,
}

impl EffectKind {
    pub const ALL: [EffectKind; 8] = [
        EffectKind::None,
        EffectKind::Bulge,
        EffectKind::Pinch,
        EffectKind::Wave,
        EffectKind::Fisheye,
        EffectKind::Twist,
        EffectKind::Ghost,
        EffectKind::Heart,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            EffectKind::None => "none",
            EffectKind::Bulge => "bulge",
            EffectKind::Pinch => "pinch",
            EffectKind::Wave => "wave",
            EffectKind::Fisheye => "fisheye",
            EffectKind::Twist => "twist",
            EffectKind::Ghost => "ghost",
            EffectKind::Heart => "heart",
        }
    }

    /// Whether the map reads the animation clock.
    pub fn is_animated(&self) -> bool {
        matches!(self, EffectKind::Wave | EffectKind::Twist)
    }

    /// Default descriptor for this kind.
    pub fn descriptor(self) -> EffectDescriptor {
        let (strength, frequency) = match self {
            EffectKind::None => (0.0, 0.0),
            EffectKind::Bulge => (0.3, 0.0),
            EffectKind::Pinch => (0.3, 0.0),
            EffectKind::Wave => (5.0, 0.05),
            EffectKind::Fisheye => (1.2, 0.0),
            EffectKind::Twist => (0.04, 0.0),
            EffectKind::Ghost => (1.0, 0.0),
            EffectKind::Heart => (0.3, 0.0),
        };
        EffectDescriptor { kind: self, strength, frequency }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EffectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        EffectKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::UnknownEffect(s.to_string()))
    }
}

/// A selected effect with its tuning. Copy-sized, so swapping it is a plain assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    pub strength: f64,
    /// Only read by `wave`.
    pub frequency: f64,
}

impl Default for EffectDescriptor {
    fn default() -> Self {
        Self::identity()
    }
}

impl EffectDescriptor {
    pub const fn identity() -> Self {
        Self { kind: EffectKind::None, strength: 0.0, frequency: 0.0 }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn is_identity(&self) -> bool {
        self.kind == EffectKind::None
    }

    /// Inverse map: output pixel (x, y) -> source coordinate, before flooring.
    /// `time` is the animation clock in milliseconds (0 when animation is off).
    pub fn map(&self, x: f64, y: f64, width: u32, height: u32, time: f64) -> (f64, f64) {
        let s = self.strength;
        match self.kind {
            EffectKind::None => (x, y),
            EffectKind::Bulge => bulge(x, y, width, height, s),
            EffectKind::Pinch => bulge(x, y, width, height, -s),
            EffectKind::Wave => {
                let phase = time * WAVE_TIME_SCALE;
                let f = self.frequency;
                (x + (y * f + phase).sin() * s, y + (x * f + phase).sin() * s)
            }
            EffectKind::Fisheye => {
                let g = Geometry::new(x, y, width, height);
                if g.r == 0.0 {
                    // 0^s is inf for negative s; the center maps to itself
                    return (g.cx, g.cy);
                }
                let theta = g.dy.atan2(g.dx);
                let r2 = (g.r / g.rmax).powf(s) * g.r;
                (g.cx + r2 * theta.cos(), g.cy + r2 * theta.sin())
            }
            EffectKind::Twist => {
                let g = Geometry::new(x, y, width, height);
                let angle = s * g.r + time * TWIST_TIME_SCALE;
                let (sin, cos) = angle.sin_cos();
                (
                    g.cx + g.dx * cos - g.dy * sin,
                    g.cy + g.dx * sin + g.dy * cos,
                )
            }
            EffectKind::Ghost => {
                let cx = width as f64 / 2.0;
                let shift = s * GHOST_OFFSET_SCALE;
                if x < cx { (x - shift, y) } else { (x + shift, y) }
            }
            EffectKind::Heart => radial_scale(x, y, width, height, |r, rmax| {
                if r < rmax { 1.0 - (PI * r / rmax).sin() * s } else { 1.0 }
            }),
        }
    }
}

/// Centered polar quantities for one output coordinate.
struct Geometry {
    cx: f64,
    cy: f64,
    dx: f64,
    dy: f64,
    r: f64,
    rmax: f64,
}

impl Geometry {
    #[inline]
    fn new(x: f64, y: f64, width: u32, height: u32) -> Self {
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let dx = x - cx;
        let dy = y - cy;
        Self { cx, cy, dx, dy, r: dx.hypot(dy), rmax: cx.hypot(cy) }
    }
}

#[inline]
fn bulge(x: f64, y: f64, width: u32, height: u32, s: f64) -> (f64, f64) {
    radial_scale(x, y, width, height, |r, rmax| 1.0 - (r / rmax) * s)
}

/// Scale the offset from center by `factor(r, rmax)`.
#[inline]
fn radial_scale(
    x: f64,
    y: f64,
    width: u32,
    height: u32,
    factor: impl Fn(f64, f64) -> f64,
) -> (f64, f64) {
    let g = Geometry::new(x, y, width, height);
    let f = factor(g.r, g.rmax);
    (g.cx + g.dx * f, g.cy + g.dy * f)
}

// ----------------------------- registry -----------------------------------------------

/// Lookup by identifier. Stateless; ids are the `EffectKind` names.
#[derive(Debug, Default, Clone, Copy)]
pub struct EffectRegistry;

impl EffectRegistry {
    /// Default descriptor for `id`, or `UnknownEffect`.
    pub fn resolve(&self, id: &str) -> Result<EffectDescriptor, Error> {
        id.parse::<EffectKind>().map(EffectKind::descriptor)
    }

    /// Like `resolve`, but an unknown id becomes the identity effect.
    pub fn resolve_or_identity(&self, id: &str) -> EffectDescriptor {
        match self.resolve(id) {
            Ok(d) => d,
            Err(_) => {
                tracing::warn!(effect = id, "unknown effect id, falling back to none");
                EffectDescriptor::identity()
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        EffectKind::ALL.into_iter().map(|k| k.id())
    }
}
