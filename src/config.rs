// Booth configuration: the knobs the driver reads at the start of every tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effect::{EffectDescriptor, EffectRegistry};
use crate::error::{Error, Result};
use crate::resample::{DeviceClass, SamplingStep};

/// Upper bound on the frame-rate cap.
pub const MAX_FPS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoothConfig {
    /// Frame-rate cap; ticks closer than `1000 / fps` ms apart are skipped.
    pub fps: u32,
    /// Explicit stride. When absent, derived from `device_class`.
    pub sampling_step: Option<u8>,
    pub device_class: DeviceClass,
    /// Feed the live clock to animated effects.
    pub animation: bool,
    /// Run the brightness / skin-tone pre-pass.
    pub prepass: bool,
    /// Initial effect id.
    pub effect: String,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            fps: 24,
            sampling_step: None,
            device_class: DeviceClass::Desktop,
            animation: false,
            prepass: false,
            effect: "none".to_string(),
        }
    }
}

impl BoothConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BoothConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(Error::invalid_config(format!(
                "fps must be in 1..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        self.step()?;
        Ok(())
    }

    pub fn step(&self) -> Result<SamplingStep> {
        match self.sampling_step {
            Some(step) => SamplingStep::new(step),
            None => Ok(self.device_class.sampling_step()),
        }
    }

    /// Minimum spacing between active ticks.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps.max(1) as f64
    }

    /// Initial effect; unknown ids become `none`.
    pub fn effect_descriptor(&self) -> EffectDescriptor {
        EffectRegistry.resolve_or_identity(&self.effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;

    #[test]
    fn defaults_are_valid() {
        let c = BoothConfig::default();
        c.validate().unwrap();
        assert_eq!(c.step().unwrap(), SamplingStep::DENSE);
        assert!((c.frame_interval_ms() - 41.666).abs() < 0.01);
    }

    #[test]
    fn parse_partial_toml() {
        let c = BoothConfig::from_toml_str(
            r#"
            fps = 30
            device_class = "constrained"
            effect = "twist"
            animation = true
            "#,
        )
        .unwrap();
        assert_eq!(c.fps, 30);
        assert_eq!(c.step().unwrap().get(), 2);
        assert!(c.animation);
        assert!(!c.prepass);
        assert_eq!(c.effect_descriptor().kind, EffectKind::Twist);
    }

    #[test]
    fn explicit_step_wins_over_device_class() {
        let c = BoothConfig::from_toml_str("sampling_step = 3\ndevice_class = \"desktop\"").unwrap();
        assert_eq!(c.step().unwrap().get(), 3);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            BoothConfig::from_toml_str("fps = 0"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            BoothConfig::from_toml_str("sampling_step = 4"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            BoothConfig::from_toml_str("fps = \"fast\""),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn unknown_effect_becomes_identity() {
        let c = BoothConfig { effect: "glitter".into(), ..Default::default() };
        assert!(c.effect_descriptor().is_identity());
    }
}
