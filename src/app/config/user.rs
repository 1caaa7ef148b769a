use serde::{Deserialize, Serialize};

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_music_dir")]
    pub music_directory: String,
    /// YouTube Data API v3 key. Also settable via the YOUTUBE_API_KEY env var.
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    /// Region code for trending music (ISO 3166-1 alpha-2)
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub keys: crate::app::keys::KeyConfig,
}

fn default_music_dir() -> String {
    if let Some(dir) = dirs::audio_dir() {
        return dir.to_string_lossy().to_string();
    }
    let home = dirs::home_dir()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string());
    format!("{}/Music", home)
}

fn default_region() -> String {
    "PK".to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            music_directory: default_music_dir(),
            youtube_api_key: None,
            region: default_region(),
            keys: crate::app::keys::KeyConfig::default(),
        }
    }
}
