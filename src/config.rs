//! Tunables for the site and the hunt mini-game.
//!
//! `Default` reproduces the values the site shipped with. With the `serde_json`
//! feature a partial JSON document can override any field; missing fields keep
//! their defaults.

use log::LevelFilter;

use crate::error::{SiteError, SiteResult};

/// Hunt mini-game parameters. Distances are CSS pixels, periods milliseconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HuntConfig {
    pub round_seconds: u32,
    pub max_catches: u32,
    pub countdown_period_ms: f64,
    pub spawn_period_ms: f64,
    pub motion_period_ms: f64,
    /// Delay between a catch and the sprite's removal (also delays the win).
    pub catch_feedback_ms: f64,
    /// Fish that travel this far past either side edge have escaped.
    pub escape_margin: f64,
    /// Left spawn x (negative = off-field).
    pub spawn_left_x: f64,
    /// Right spawn x is `field width + spawn_right_offset`.
    pub spawn_right_offset: f64,
    /// Horizontal speed range in px per motion tick (inclusive).
    pub speed_min: i32,
    pub speed_max: i32,
    /// Vertical drift range in px per motion tick (inclusive, signed).
    pub drift_min: i32,
    pub drift_max: i32,
    pub sprite_size: f64,
    /// Distance from the top edge at which fish bounce.
    pub bounce_margin: f64,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            round_seconds: 30,
            max_catches: 5,
            countdown_period_ms: 1000.0,
            spawn_period_ms: 2000.0,
            motion_period_ms: 50.0,
            catch_feedback_ms: 500.0,
            escape_margin: 60.0,
            spawn_left_x: -50.0,
            spawn_right_offset: 10.0,
            speed_min: 2,
            speed_max: 5,
            drift_min: -1,
            drift_max: 1,
            sprite_size: 40.0,
            bounce_margin: 10.0,
        }
    }
}

impl HuntConfig {
    pub fn validate(&self) -> SiteResult<()> {
        if self.round_seconds == 0 {
            return Err(invalid("round_seconds must be positive"));
        }
        if self.max_catches == 0 {
            return Err(invalid("max_catches must be positive"));
        }
        for (name, period) in [
            ("countdown_period_ms", self.countdown_period_ms),
            ("spawn_period_ms", self.spawn_period_ms),
            ("motion_period_ms", self.motion_period_ms),
        ] {
            if period.is_nan() || period <= 0.0 {
                return Err(invalid(&format!("{name} must be positive")));
            }
        }
        if self.catch_feedback_ms < 0.0 {
            return Err(invalid("catch_feedback_ms must not be negative"));
        }
        if self.speed_min <= 0 || self.speed_min > self.speed_max {
            return Err(invalid("speed range must be positive and ordered"));
        }
        if self.drift_min > self.drift_max {
            return Err(invalid("drift range must be ordered"));
        }
        Ok(())
    }
}

/// Whole-site configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiteConfig {
    pub hunt: HuntConfig,
    pub overlay_auto_close_ms: u32,
    /// Fallback for clearing a sound button's `playing` class if `ended` never fires.
    pub playing_fallback_ms: u32,
    /// Viewport width at or below which navigation collapses the hamburger menu.
    pub menu_breakpoint_px: f64,
    pub log_level: LevelFilter,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hunt: HuntConfig::default(),
            overlay_auto_close_ms: 5000,
            playing_fallback_ms: 3000,
            menu_breakpoint_px: 800.0,
            log_level: LevelFilter::Info,
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> SiteResult<()> {
        self.hunt.validate()?;
        if self.overlay_auto_close_ms == 0 {
            return Err(invalid("overlay_auto_close_ms must be positive"));
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> SiteResult<Self> {
        let cfg: SiteConfig =
            serde_json::from_str(json).map_err(|e| SiteError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn invalid(reason: &str) -> SiteError {
    SiteError::InvalidConfig(reason.to_string())
}
