//! Settings read from the environment (`.env` is loaded in `main`).

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::{BotError, BotResult};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://bot/db/school_data.db";
pub const DEFAULT_IMG_DIR: &str = "bot/assets/img";
pub const DEFAULT_AUDIO_DIR: &str = "bot/assets/audio";
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Name of the voice sample sent by /sendvoice
pub const VOICE_SAMPLE_FILENAME: &str = "sample.ogg";

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub database_url: String,
    pub img_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub translate_api_url: String,
}

impl Config {
    pub fn from_env() -> BotResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup, empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BotResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = get("TELEGRAM_BOT_TOKEN").ok_or_else(|| {
            BotError::config_error("TELEGRAM_BOT_TOKEN must be set in the environment or .env")
        })?;

        Ok(Self {
            bot_token,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            img_dir: get("IMG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMG_DIR)),
            audio_dir: get("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIO_DIR)),
            translate_api_url: get("TRANSLATE_API_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.to_string()),
        })
    }

    pub fn voice_sample_path(&self) -> PathBuf {
        self.audio_dir.join(VOICE_SAMPLE_FILENAME)
    }

    /// Create asset folders and the folder holding the sqlite file
    pub async fn ensure_dirs(&self) -> BotResult<()> {
        fs::create_dir_all(&self.img_dir).await?;
        fs::create_dir_all(&self.audio_dir).await?;

        if let Some(db_dir) = sqlite_file_dir(&self.database_url) {
            fs::create_dir_all(db_dir).await?;
        }

        Ok(())
    }
}

/// Parent folder of a file-backed sqlite url, `None` for in-memory databases
fn sqlite_file_dir(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }

    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn token_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, BotError::ConfigError(_)));

        let err = Config::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, BotError::ConfigError(_)));
    }

    #[test]
    fn defaults_fill_missing_values() {
        let config = Config::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.img_dir, PathBuf::from(DEFAULT_IMG_DIR));
        assert_eq!(
            config.voice_sample_path(),
            PathBuf::from(DEFAULT_AUDIO_DIR).join("sample.ogg")
        );
        assert_eq!(config.translate_api_url, DEFAULT_TRANSLATE_API_URL);
    }

    #[test]
    fn overrides_are_respected() {
        let config = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("IMG_DIR", "/tmp/img"),
            ("TRANSLATE_API_URL", "http://localhost:9000/translate"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.img_dir, PathBuf::from("/tmp/img"));
        assert_eq!(config.translate_api_url, "http://localhost:9000/translate");
    }

    #[test]
    fn sqlite_dir_is_derived_from_url() {
        assert_eq!(
            sqlite_file_dir("sqlite://bot/db/school_data.db"),
            Some(Path::new("bot/db"))
        );
        assert_eq!(
            sqlite_file_dir("sqlite:data/school.db?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_file_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_file_dir("sqlite://school.db"), None);
        assert_eq!(sqlite_file_dir("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn ensure_dirs_creates_all_folders() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let root = dir.path().to_str().unwrap();
        let database_url = format!("sqlite://{}/db/school.db", root);
        let img_dir = format!("{}/assets/img", root);
        let audio_dir = format!("{}/assets/audio", root);
        let config = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("DATABASE_URL", database_url.as_str()),
            ("IMG_DIR", img_dir.as_str()),
            ("AUDIO_DIR", audio_dir.as_str()),
        ]))
        .unwrap();

        config.ensure_dirs().await.unwrap();

        assert!(dir.path().join("db").is_dir());
        assert!(dir.path().join("assets/img").is_dir());
        assert!(dir.path().join("assets/audio").is_dir());
    }
}
