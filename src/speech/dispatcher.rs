//! Non-blocking speech front end.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use tokio::task::JoinHandle;

use crate::config::SpeechConfig;

use super::{normalize_utterance, CommandBackend, NullBackend, SpeechBackend};

/// Hands utterances to a [`SpeechBackend`] on a background task.
///
/// At most one utterance plays at a time: while one is in flight further
/// requests are dropped, so repeated SPEAK gestures cannot queue up.
/// Backend failures are logged and never reach the caller.
///
/// Must be used from inside a tokio runtime.
pub struct SpeechDispatcher {
    backend: Arc<dyn SpeechBackend>,
    busy: Arc<AtomicBool>,
    current: Mutex<Option<JoinHandle<()>>>,
}

/// Clears the busy flag when the speaking task ends, including on panic.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SpeechDispatcher {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            busy: Arc::new(AtomicBool::new(false)),
            current: Mutex::new(None),
        }
    }

    /// A [`CommandBackend`] dispatcher, or a [`NullBackend`] one when speech
    /// is disabled.
    pub fn from_config(config: &SpeechConfig) -> Self {
        if config.enabled {
            let backend = CommandBackend::from_config(config);
            log::info!("speech: using `{}`", backend.program());
            Self::new(Arc::new(backend))
        } else {
            log::info!("speech: disabled");
            Self::new(Arc::new(NullBackend))
        }
    }

    /// Start speaking `text` in the background.
    ///
    /// Returns `false` without doing anything when the text is blank or an
    /// utterance is already playing.
    pub fn speak(&self, text: &str) -> bool {
        let utterance = normalize_utterance(text);
        if utterance.is_empty() {
            return false;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("speech: busy, dropping {:?}", utterance);
            return false;
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let backend = Arc::clone(&self.backend);
        let handle = tokio::spawn(async move {
            let _guard = guard;
            if let Err(e) = backend.say(&utterance).await {
                log::warn!("speech: {e}");
            }
        });

        if let Ok(mut current) = self.current.lock() {
            *current = Some(handle);
        }
        true
    }

    /// `true` while an utterance is playing.
    pub fn is_speaking(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Wait for the current utterance, if any, to finish.
    pub async fn wait_idle(&self) {
        let handle = match self.current.lock() {
            Ok(mut current) => current.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                log::warn!("speech task failed: {e}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
