//! Mood booth distortion engine.
//!
//! Takes an RGBA8 camera frame and a selected effect and produces a warped frame of
//! the same size. The pieces:
//!
//! - [`effect`]: the catalogue of inverse coordinate maps (bulge, pinch, wave, ...).
//! - [`resample`]: strided nearest-neighbour resampling with forward dilation.
//! - [`beautify`]: the optional brightness / skin-tone pre-pass.
//! - [`driver`]: the throttled per-tick loop between a [`FrameSource`] and a [`FrameSink`].
//! - [`mood`]: presets bundling an effect with the tint used on captured stills.
//!
//! The engine does no I/O; camera capture, display and encoding belong to the host.

pub mod beautify;
pub mod clock;
pub mod config;
pub mod driver;
pub mod effect;
pub mod error;
pub mod mood;
pub mod resample;
pub mod types;

pub use beautify::Beautify;
pub use clock::AnimationClock;
pub use config::BoothConfig;
pub use driver::{Controls, DriverStats, FrameDriver, FrameSink, FrameSource, TickOutcome};
pub use effect::{EffectDescriptor, EffectKind, EffectRegistry};
pub use error::{Error, Result};
pub use mood::{Mood, Tint, apply_tint};
pub use resample::{DeviceClass, SamplingStep, resample, resample_into};
pub use types::PixelBuffer;
