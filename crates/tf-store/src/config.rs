//! Persisted session configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Highest volume level.
pub const MAX_VOLUME: u8 = 10;

/// How fast rendered text is revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSpeed {
    /// No animation.
    Instant,
    /// 10 ms per character.
    Quick,
    /// 30 ms per character.
    #[default]
    Normal,
    /// 60 ms per character.
    Slow,
}

impl TextSpeed {
    /// Every tier, fastest first.
    pub const ALL: [TextSpeed; 4] = [Self::Instant, Self::Quick, Self::Normal, Self::Slow];

    /// Delay between two revealed characters.
    pub fn char_delay(self) -> Duration {
        match self {
            Self::Instant => Duration::ZERO,
            Self::Quick => Duration::from_millis(10),
            Self::Normal => Duration::from_millis(30),
            Self::Slow => Duration::from_millis(60),
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Quick => "quick",
            Self::Normal => "normal",
            Self::Slow => "slow",
        }
    }
}

impl fmt::Display for TextSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instant" | "none" | "off" => Ok(Self::Instant),
            "quick" | "fast" => Ok(Self::Quick),
            "normal" | "default" => Ok(Self::Normal),
            "slow" => Ok(Self::Slow),
            other => Err(format!("unknown text speed: {other}")),
        }
    }
}

/// Settings and save bookkeeping that outlive a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Music volume, 0 to [`MAX_VOLUME`].
    pub music_volume: u8,
    /// Sound effect volume, 0 to [`MAX_VOLUME`].
    pub effects_volume: u8,
    /// Text animation tier.
    pub text_speed: TextSpeed,
    /// Whether the welcome message is shown at startup.
    pub show_welcome: bool,
    /// Save name to a one-line summary.
    pub saves: BTreeMap<String, String>,
    /// Most recently played save.
    pub last_save: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            music_volume: 5,
            effects_volume: 5,
            text_speed: TextSpeed::default(),
            show_welcome: true,
            saves: BTreeMap::new(),
            last_save: None,
        }
    }
}

impl SessionConfig {
    /// Set the music volume (clamped to 0-10).
    pub fn with_music_volume(mut self, volume: u8) -> Self {
        self.music_volume = volume.min(MAX_VOLUME);
        self
    }

    /// Set the effects volume (clamped to 0-10).
    pub fn with_effects_volume(mut self, volume: u8) -> Self {
        self.effects_volume = volume.min(MAX_VOLUME);
        self
    }

    /// Set the text speed.
    pub fn with_text_speed(mut self, speed: TextSpeed) -> Self {
        self.text_speed = speed;
        self
    }

    /// Enable or disable the welcome message.
    pub fn with_welcome(mut self, show: bool) -> Self {
        self.show_welcome = show;
        self
    }

    /// Record a save and make it the most recent one.
    pub fn record_save(&mut self, name: impl Into<String>, summary: impl Into<String>) {
        let name = name.into();
        self.saves.insert(name.clone(), summary.into());
        self.last_save = Some(name);
    }

    /// Forget a save. Clears the recent-save pointer if it pointed there.
    pub fn forget_save(&mut self, name: &str) -> bool {
        let removed = self.saves.remove(name).is_some();
        if self.last_save.as_deref() == Some(name) {
            self.last_save = None;
        }
        removed
    }

    /// Human-readable listing of the current settings.
    pub fn describe(&self) -> String {
        format!(
            "Music volume: {}/{MAX_VOLUME}\n\
             Effects volume: {}/{MAX_VOLUME}\n\
             Text speed: {}\n\
             Welcome message: {}",
            self.music_volume,
            self.effects_volume,
            self.text_speed,
            if self.show_welcome { "on" } else { "off" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.music_volume, 5);
        assert_eq!(cfg.text_speed, TextSpeed::Normal);
        assert!(cfg.show_welcome);
        assert!(cfg.saves.is_empty());
        assert_eq!(cfg.last_save, None);
    }

    #[test]
    fn volumes_clamped() {
        let cfg = SessionConfig::default()
            .with_music_volume(99)
            .with_effects_volume(3);
        assert_eq!(cfg.music_volume, MAX_VOLUME);
        assert_eq!(cfg.effects_volume, 3);
    }

    #[test]
    fn serde_roundtrip() {
        let mut cfg = SessionConfig::default()
            .with_text_speed(TextSpeed::Slow)
            .with_welcome(false);
        cfg.record_save("bob", "Player bob is... doing things...");

        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, cfg2);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SessionConfig = serde_json::from_str(r#"{"text_speed":"quick"}"#).unwrap();
        assert_eq!(cfg.text_speed, TextSpeed::Quick);
        assert_eq!(cfg.music_volume, 5);
        assert!(cfg.show_welcome);
    }

    #[test]
    fn forget_save_clears_pointer() {
        let mut cfg = SessionConfig::default();
        cfg.record_save("a", "first");
        cfg.record_save("b", "second");
        assert_eq!(cfg.last_save.as_deref(), Some("b"));

        assert!(cfg.forget_save("a"));
        assert_eq!(cfg.last_save.as_deref(), Some("b"));
        assert!(cfg.forget_save("b"));
        assert_eq!(cfg.last_save, None);
        assert!(!cfg.forget_save("b"));
    }

    #[test]
    fn text_speed_parsing() {
        assert_eq!("Fast".parse::<TextSpeed>(), Ok(TextSpeed::Quick));
        assert_eq!("off".parse::<TextSpeed>(), Ok(TextSpeed::Instant));
        assert!("ludicrous".parse::<TextSpeed>().is_err());
        assert!(TextSpeed::Slow.char_delay() > TextSpeed::Quick.char_delay());
        assert_eq!(TextSpeed::Instant.char_delay(), Duration::ZERO);
    }
}
