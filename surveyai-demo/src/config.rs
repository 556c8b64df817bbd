use std::{fs, path::Path};

use anyhow::{Context, bail};
use serde::Deserialize;
use surveyai::{Language, Timings};

pub const CONFIG_FILE: &str = "surveyai.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
    /// Language code the avatar starts in.
    pub language: String,
    /// Plain prompts without colors.
    pub plain: bool,
    pub timings: Timings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".into(),
            language: Language::default().code().into(),
            plain: false,
            timings: Timings::default(),
        }
    }
}

impl DemoConfig {
    pub fn language(&self) -> anyhow::Result<Language> {
        match Language::from_code(&self.language) {
            Some(language) => Ok(language),
            None => bail!("unsupported language code '{}'", self.language),
        }
    }
}

/// Load `surveyai.toml` from the working directory, then apply `SURVEYAI_*` overrides.
pub fn load_config() -> anyhow::Result<DemoConfig> {
    let config = load_file(Path::new(CONFIG_FILE))?;
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub fn load_file(path: &Path) -> anyhow::Result<DemoConfig> {
    if !path.exists() {
        return Ok(DemoConfig::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

/// Apply overrides looked up by variable name.
pub fn apply_overrides(
    mut config: DemoConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<DemoConfig> {
    if let Some(v) = lookup("SURVEYAI_LOG") {
        config.log_filter = v;
    }
    if let Some(v) = lookup("SURVEYAI_LANGUAGE") {
        config.language = v;
    }
    if let Some(v) = lookup("SURVEYAI_PLAIN") {
        config.plain = matches!(v.trim(), "1" | "true" | "yes");
    }

    let timings = &mut config.timings;
    for (key, field) in [
        ("SURVEYAI_GENERATION_MS", &mut timings.generation_ms),
        ("SURVEYAI_CHAT_REPLY_MS", &mut timings.chat_reply_ms),
        ("SURVEYAI_IVR_FOLLOW_UP_MS", &mut timings.ivr_follow_up_ms),
        ("SURVEYAI_VOICE_PLAYBACK_MS", &mut timings.voice_playback_ms),
        ("SURVEYAI_NOTICE_TTL_MS", &mut timings.notice_ttl_ms),
        ("SURVEYAI_PREPOPULATE_MS", &mut timings.prepopulate_ms),
        ("SURVEYAI_METRICS_REFRESH_MS", &mut timings.metrics_refresh_ms),
    ] {
        if let Some(v) = lookup(key) {
            *field = v
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a number of milliseconds, got '{v}'"))?;
        }
    }

    config.language()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_file(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: DemoConfig = toml::from_str(
            r#"
            language = "hi"

            [timings]
            chat_reply_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.language().unwrap(), Language::Hindi);
        assert_eq!(config.timings.chat_reply_ms, 250);
        assert_eq!(config.timings.ivr_follow_up_ms, 1500);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn env_overrides_win() {
        let config = apply_overrides(
            DemoConfig::default(),
            lookup(&[
                ("SURVEYAI_LOG", "surveyai=debug"),
                ("SURVEYAI_LANGUAGE", "gu"),
                ("SURVEYAI_VOICE_PLAYBACK_MS", "0"),
                ("SURVEYAI_PREPOPULATE_MS", "250"),
            ]),
        )
        .unwrap();
        assert_eq!(config.log_filter, "surveyai=debug");
        assert_eq!(config.language().unwrap(), Language::Gujarati);
        assert_eq!(config.timings.voice_playback_ms, 0);
        assert_eq!(config.timings.prepopulate_ms, 250);
        assert_eq!(config.timings.metrics_refresh_ms, 5000);
        assert_eq!(config.timings.chat_reply_ms, 1000);
    }

    #[test]
    fn bad_overrides_are_errors() {
        assert!(
            apply_overrides(
                DemoConfig::default(),
                lookup(&[("SURVEYAI_CHAT_REPLY_MS", "soon")])
            )
            .is_err()
        );
        assert!(
            apply_overrides(DemoConfig::default(), lookup(&[("SURVEYAI_LANGUAGE", "fr")])).is_err()
        );
    }
}
