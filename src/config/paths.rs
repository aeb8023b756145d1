//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\sign-to-voice\
//!   macOS:   ~/Library/Application Support/sign-to-voice/
//!   Linux:   ~/.config/sign-to-voice/
//!
//! Data dir (replay recordings):
//!   Windows: %LOCALAPPDATA%\sign-to-voice\
//!   macOS:   ~/Library/Application Support/sign-to-voice/
//!   Linux:   ~/.local/share/sign-to-voice/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Default directory searched for relative replay recording paths.
    pub recordings_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "sign-to-voice";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let recordings_dir = data_dir.join("recordings");

        Self {
            config_dir,
            settings_file,
            recordings_dir,
        }
    }

    /// Resolve a recording path given on the command line.
    ///
    /// Paths that exist as given are returned unchanged; otherwise a bare
    /// relative name is looked up in [`recordings_dir`](Self::recordings_dir).
    pub fn resolve_recording(&self, arg: &str) -> PathBuf {
        let direct = PathBuf::from(arg);
        if direct.exists() || direct.is_absolute() {
            return direct;
        }
        let fallback = self.recordings_dir.join(arg);
        if fallback.exists() {
            fallback
        } else {
            direct
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
