//! Process-based TTS backends.

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::SpeechConfig;

use super::{SpeechBackend, SpeechError};

// ---------------------------------------------------------------------------
// CommandBackend
// ---------------------------------------------------------------------------

/// Runs an external TTS program once per utterance.
///
/// Flags are chosen from the program's file name:
///
/// | program              | flags                              |
/// |----------------------|------------------------------------|
/// | `espeak`/`espeak-ng` | `-s <rate> -a <amplitude> [-v <voice>]` |
/// | `say`                | `-r <rate> [-v <voice>]`           |
/// | anything else        | none; the text is the only argument |
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    rate: u32,
    volume: f32,
    voice: Option<String>,
}

impl CommandBackend {
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self {
            program: config.program.clone(),
            rate: config.rate,
            volume: config.volume,
            voice: config.voice.clone().filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn flavor(&self) -> Flavor {
        let name = std::path::Path::new(&self.program)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        match name {
            "espeak" | "espeak-ng" => Flavor::Espeak,
            "say" => Flavor::Say,
            _ => Flavor::Plain,
        }
    }

    /// Command-line arguments for one utterance, text last.
    pub(crate) fn args(&self, text: &str) -> Vec<String> {
        let mut args = Vec::new();
        match self.flavor() {
            Flavor::Espeak => {
                // espeak amplitude: 0-200, 100 is normal.
                let amplitude = (self.volume.clamp(0.0, 2.0) * 100.0).round() as u32;
                args.extend(["-s".into(), self.rate.to_string()]);
                args.extend(["-a".into(), amplitude.to_string()]);
                if let Some(voice) = &self.voice {
                    args.extend(["-v".into(), voice.clone()]);
                }
            }
            Flavor::Say => {
                args.extend(["-r".into(), self.rate.to_string()]);
                if let Some(voice) = &self.voice {
                    args.extend(["-v".into(), voice.clone()]);
                }
            }
            Flavor::Plain => {}
        }
        args.push(text.to_string());
        args
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Espeak,
    Say,
    Plain,
}

#[async_trait]
impl SpeechBackend for CommandBackend {
    async fn say(&self, text: &str) -> Result<(), SpeechError> {
        log::debug!("speech: {} {:?}", self.program, text);

        let status = Command::new(&self.program)
            .args(self.args(text))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SpeechError::Unavailable(self.program.clone()),
                _ => SpeechError::Io(e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed(format!("{} exited with {status}", self.program)))
        }
    }
}

// ---------------------------------------------------------------------------
// NullBackend
// ---------------------------------------------------------------------------

/// Logs the utterance and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

#[async_trait]
impl SpeechBackend for NullBackend {
    async fn say(&self, text: &str) -> Result<(), SpeechError> {
        log::info!("speech disabled, dropping {:?}", text);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(program: &str, voice: Option<&str>) -> CommandBackend {
        CommandBackend::from_config(&SpeechConfig {
            program: program.into(),
            voice: voice.map(String::from),
            ..SpeechConfig::default()
        })
    }

    #[test]
    fn espeak_args() {
        let b = backend("espeak", Some("en+f3"));
        assert_eq!(
            b.args("hello world"),
            vec!["-s", "140", "-a", "100", "-v", "en+f3", "hello world"]
        );
    }

    #[test]
    fn espeak_ng_by_path() {
        let b = backend("/usr/bin/espeak-ng", None);
        assert_eq!(b.args("hi"), vec!["-s", "140", "-a", "100", "hi"]);
    }

    #[test]
    fn say_args() {
        let b = backend("say", Some("Samantha"));
        assert_eq!(b.args("hi"), vec!["-r", "140", "-v", "Samantha", "hi"]);
    }

    #[test]
    fn unknown_program_gets_text_only() {
        let b = backend("my-tts", Some("ignored"));
        assert_eq!(b.args("hi"), vec!["hi"]);
    }

    #[test]
    fn blank_voice_is_ignored() {
        let b = backend("say", Some("  "));
        assert_eq!(b.args("hi"), vec!["-r", "140", "hi"]);
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let b = backend("sign-to-voice-no-such-tts-program", None);
        let err = b.say("hello").await.unwrap_err();
        assert!(matches!(err, SpeechError::Unavailable(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn null_backend_always_succeeds() {
        assert!(NullBackend.say("anything").await.is_ok());
    }
}
