//! Pile configuration.
//!
//! Hosts either build a `PileConfig` in code or load one from TOML:
//!
//! ```
//! use table_pile::core::PileConfig;
//!
//! let config = PileConfig::from_toml_str(
//!     r#"
//!     clearance_delay_ticks = 5
//!     card_width = 110.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.clearance_delay_ticks, 5);
//! assert_eq!(config.fade_out_ms, 1000); // unspecified keys keep defaults
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{PileError, PileResult};

/// Tunables for a table pile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PileConfig {
    /// Ticks a card lingers (disabled) after its clearance stamp before it
    /// is faded out.
    pub clearance_delay_ticks: u64,

    /// Wall-clock interval between scheduler ticks, used by `ClearanceTimer`.
    pub tick_interval_ms: u64,

    /// Width of one card visual.
    pub card_width: f64,

    /// Duration of the fade-out animation.
    pub fade_out_ms: u32,

    /// Duration of the re-layout glide. 0 lets the scene pick.
    pub layout_ms: u32,

    /// Skills whose moves are hidden from the pile, like swaps.
    pub hidden_skills: Vec<String>,

    /// Overlay effect for a judgment that took effect.
    pub judge_good_effect: String,

    /// Overlay effect for a judgment that did not take effect.
    pub judge_bad_effect: String,
}

impl Default for PileConfig {
    fn default() -> Self {
        Self {
            clearance_delay_ticks: 3,
            tick_interval_ms: 1000,
            card_width: 93.0,
            fade_out_ms: 1000,
            layout_ms: 0,
            hidden_skills: vec!["luck_card".to_string()],
            judge_good_effect: "judgegood".to_string(),
            judge_bad_effect: "judgebad".to_string(),
        }
    }
}

impl PileConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> PileResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> PileResult<()> {
        if !(self.card_width.is_finite() && self.card_width > 0.0) {
            return Err(PileError::InvalidConfig(format!(
                "card_width must be positive, got {}",
                self.card_width
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(PileError::InvalidConfig(
                "tick_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.judge_good_effect.is_empty() || self.judge_bad_effect.is_empty() {
            return Err(PileError::InvalidConfig(
                "judgment effect names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Scheduler cadence as a `Duration`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check if moves caused by `skill` are hidden from the pile.
    #[must_use]
    pub fn hides_skill(&self, skill: &str) -> bool {
        self.hidden_skills.iter().any(|s| s == skill)
    }

    /// Overlay effect name for a judgment outcome.
    #[must_use]
    pub fn judge_effect(&self, took_effect: bool) -> &str {
        if took_effect {
            &self.judge_good_effect
        } else {
            &self.judge_bad_effect
        }
    }

    /// Set the clearance delay.
    #[must_use]
    pub fn with_clearance_delay(mut self, ticks: u64) -> Self {
        self.clearance_delay_ticks = ticks;
        self
    }

    /// Set the scheduler cadence.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the card width used for spacing and the visible count.
    #[must_use]
    pub fn with_card_width(mut self, width: f64) -> Self {
        self.card_width = width;
        self
    }

    /// Set the fade-out duration.
    #[must_use]
    pub fn with_fade_out_ms(mut self, ms: u32) -> Self {
        self.fade_out_ms = ms;
        self
    }

    /// Add a skill whose moves are hidden from the pile.
    #[must_use]
    pub fn with_hidden_skill(mut self, skill: impl Into<String>) -> Self {
        self.hidden_skills.push(skill.into());
        self
    }
}
