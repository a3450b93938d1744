use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration of the server process.
///
/// Built from CLI arguments in `main`; tests construct it (or the app state
/// directly) by hand.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the fixed sample media, also served under `/public`.
    pub media_dir: PathBuf,
    /// Wait between remote-file state polls on the video path.
    pub poll_interval: Duration,
    pub model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7001,
            media_dir: PathBuf::from("public"),
            poll_interval: Duration::from_secs(10),
            model: promptgate::provider::DEFAULT_MODEL.to_string(),
        }
    }
}
