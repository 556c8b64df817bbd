use std::time::Duration;

use serde::Deserialize;

/// Artificial delays used to simulate processing, in milliseconds.
///
/// Deserializable so front ends can load them from configuration; missing fields
/// keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Mock AI generation.
    pub generation_ms: u64,
    /// Chat bot reply after a user turn.
    pub chat_reply_ms: u64,
    /// IVR transition prompt after a key press.
    pub ivr_follow_up_ms: u64,
    /// Playback of a spoken IVR prompt.
    pub voice_playback_ms: u64,
    /// Lifetime of a transient notice.
    pub notice_ttl_ms: u64,
    /// Lookup of pre-population data for a respondent identifier.
    pub prepopulate_ms: u64,
    /// Interval between simulated dashboard metric updates.
    pub metrics_refresh_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            generation_ms: 2000,
            chat_reply_ms: 1000,
            ivr_follow_up_ms: 1500,
            voice_playback_ms: 3000,
            notice_ttl_ms: 7000,
            prepopulate_ms: 1500,
            metrics_refresh_ms: 5000,
        }
    }
}

impl Timings {
    /// All delays zero; used by tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            generation_ms: 0,
            chat_reply_ms: 0,
            ivr_follow_up_ms: 0,
            voice_playback_ms: 0,
            notice_ttl_ms: 0,
            prepopulate_ms: 0,
            metrics_refresh_ms: 0,
        }
    }

    pub fn generation(&self) -> Duration {
        Duration::from_millis(self.generation_ms)
    }

    pub fn chat_reply(&self) -> Duration {
        Duration::from_millis(self.chat_reply_ms)
    }

    pub fn ivr_follow_up(&self) -> Duration {
        Duration::from_millis(self.ivr_follow_up_ms)
    }

    pub fn voice_playback(&self) -> Duration {
        Duration::from_millis(self.voice_playback_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    pub fn prepopulate(&self) -> Duration {
        Duration::from_millis(self.prepopulate_ms)
    }

    pub fn metrics_refresh(&self) -> Duration {
        Duration::from_millis(self.metrics_refresh_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let timings: Timings = toml::from_str("chat_reply_ms = 10").unwrap();
        assert_eq!(timings.chat_reply(), Duration::from_millis(10));
        assert_eq!(timings.ivr_follow_up(), Duration::from_millis(1500));
        assert_eq!(timings.prepopulate(), Duration::from_millis(1500));
        assert_eq!(timings.metrics_refresh(), Duration::from_secs(5));
    }
}
