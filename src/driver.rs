// Frame driver: the throttled per-frame loop tying camera, pre-pass, warp and display.
// The host calls `tick(now)` once per refresh; the driver never sleeps or spawns.

use crate::beautify::Beautify;
use crate::clock::AnimationClock;
use crate::config::BoothConfig;
use crate::effect::{EffectDescriptor, EffectRegistry};
use crate::error::Result;
use crate::mood::{Mood, apply_tint};
use crate::resample::{SamplingStep, resample_into};
use crate::types::PixelBuffer;

/// Yields one frame per active tick (conceptually the camera).
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<PixelBuffer>;
}

/// Receives the finished frame. The borrow ends when `present` returns;
/// a sink that wants to keep the pixels must copy them.
pub trait FrameSink {
    fn present(&mut self, frame: &PixelBuffer) -> Result<()>;
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Too soon after the last active tick; nothing ran.
    Throttled,
    /// A frame was rendered and handed to the sink.
    Presented { frame: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub active_ticks: u64,
    pub throttled_ticks: u64,
    pub reallocations: u64,
}

/// Settings the host may change between ticks. Snapshotted at tick start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub effect: EffectDescriptor,
    pub animation: bool,
    pub prepass: bool,
}

pub struct FrameDriver<S, K> {
    source: S,
    sink: K,
    interval_ms: f64,
    step: SamplingStep,
    pending: Controls,
    clock: AnimationClock,
    beautify: Beautify,
    output: PixelBuffer, // current rendered output; reused across ticks
    last_time: Option<f64>,
    stats: DriverStats,
}

impl<S: FrameSource, K: FrameSink> FrameDriver<S, K> {
    pub fn new(config: &BoothConfig, source: S, sink: K) -> Result<Self> {
        config.validate()?;
        let pending = Controls {
            effect: config.effect_descriptor(),
            animation: config.animation,
            prepass: config.prepass,
        };
        tracing::debug!(
            fps = config.fps,
            step = config.step()?.get(),
            effect = %pending.effect.kind,
            "frame driver ready"
        );
        Ok(Self {
            source,
            sink,
            interval_ms: config.frame_interval_ms(),
            step: config.step()?,
            pending,
            clock: AnimationClock::new(config.animation),
            beautify: Beautify::new(),
            output: PixelBuffer::new(0, 0),
            last_time: None,
            stats: DriverStats::default(),
        })
    }

    /// Run one iteration of the loop at host time `now_ms`.
    ///
    /// Within an active tick the pre-pass finishes before resampling, and the
    /// resampler finishes before the sink sees the buffer.
    pub fn tick(&mut self, now_ms: f64) -> Result<TickOutcome> {
        if let Some(last) = self.last_time {
            if now_ms - last < self.interval_ms {
                self.stats.throttled_ticks += 1;
                return Ok(TickOutcome::Throttled);
            }
        }

        // Snapshot: anything changed from here on waits for the next tick.
        let controls = self.pending;

        // A failed pull does not count as a tick; the host may retry right away.
        let mut frame = self.source.next_frame()?;
        self.last_time = Some(now_ms);
        self.clock.set_enabled(controls.animation);
        self.clock.advance(now_ms);

        let (w, h) = frame.dimensions();
        if self.output.reallocate(w, h) {
            self.stats.reallocations += 1;
            tracing::debug!(width = w, height = h, "source size changed, reallocated output");
        }

        if controls.prepass {
            self.beautify.apply_in_place(&mut frame);
        }

        if controls.effect.is_identity() {
            // `none` must reproduce the source exactly
            self.output.copy_from(&frame)?;
        } else {
            let time = self.clock.read();
            resample_into(&frame, &mut self.output, &controls.effect, self.step, time)?;
        }

        self.sink.present(&self.output)?;

        self.stats.active_ticks += 1;
        tracing::trace!(frame = self.stats.active_ticks, effect = %controls.effect.kind, "presented");
        Ok(TickOutcome::Presented { frame: self.stats.active_ticks })
    }

    /// Select an effect by id; unknown ids select `none`.
    pub fn set_effect(&mut self, id: &str) {
        self.set_effect_descriptor(EffectRegistry.resolve_or_identity(id));
    }

    pub fn set_effect_descriptor(&mut self, effect: EffectDescriptor) {
        tracing::debug!(effect = %effect.kind, strength = effect.strength, "effect selected");
        self.pending.effect = effect;
    }

    pub fn set_mood(&mut self, mood: Option<Mood>) {
        let effect = mood.map(|m| m.effect()).unwrap_or_default();
        self.set_effect_descriptor(effect);
    }

    pub fn set_animation(&mut self, enabled: bool) {
        tracing::debug!(enabled, "animation toggled");
        self.pending.animation = enabled;
    }

    pub fn set_prepass(&mut self, enabled: bool) {
        tracing::debug!(enabled, "pre-pass toggled");
        self.pending.prepass = enabled;
    }

    /// Controls that the next tick will use.
    pub fn controls(&self) -> Controls {
        self.pending
    }

    pub fn step(&self) -> SamplingStep {
        self.step
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Copy of the last presented frame with the mood tint composited,
    /// ready for an encoder. None before the first active tick.
    pub fn capture(&self, mood: Mood) -> Option<PixelBuffer> {
        if self.stats.active_ticks == 0 {
            return None;
        }
        let mut still = self.output.clone();
        apply_tint(&mut still, mood.tint());
        tracing::debug!(%mood, "captured still");
        Some(still)
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }
}
