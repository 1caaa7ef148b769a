use std::fs;
use std::path::PathBuf;

pub mod user;

pub use user::UserConfig;

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("tarang");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = std::fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn load() -> UserConfig {
        let config_path = Self::get_config_path();

        if config_path.exists() {
            if let Ok(content) = fs::read_to_string(&config_path) {
                toml::from_str(&content).unwrap_or_else(|_| UserConfig::default())
            } else {
                UserConfig::default()
            }
        } else {
            // Create default config.toml if missing
            let c = UserConfig::default();
            let _ = fs::write(&config_path, default_config_toml());
            c
        }
    }
}

/// Resolve the YouTube API key: the environment variable wins over the file.
pub fn youtube_api_key(config: &UserConfig) -> Option<String> {
    if let Ok(key) = std::env::var("YOUTUBE_API_KEY") {
        if !key.trim().is_empty() {
            return Some(key);
        }
    }
    config
        .youtube_api_key
        .as_ref()
        .filter(|k| !k.trim().is_empty())
        .cloned()
}

/// Default config.toml text, with the API key left as a commented hint.
pub fn default_config_toml() -> String {
    let c = UserConfig::default();
    let mut content = toml::to_string_pretty(&c).unwrap_or_default();
    if c.youtube_api_key.is_none() {
        let hint = "# youtube_api_key = \"...\"  # enables YouTube search and trending\n";
        match content.find("region") {
            Some(idx) => content.insert_str(idx, hint),
            None => content.push_str(hint),
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrips() {
        let text = default_config_toml();
        let parsed: UserConfig = toml::from_str(&text).expect("default config must parse");
        assert_eq!(parsed.region, "PK");
        assert!(parsed.youtube_api_key.is_none());
        assert!(!parsed.music_directory.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let parsed: UserConfig = toml::from_str("region = \"US\"\n").unwrap();
        assert_eq!(parsed.region, "US");
        assert!(parsed.youtube_api_key.is_none());
        assert!(!parsed.music_directory.is_empty());
    }
}
