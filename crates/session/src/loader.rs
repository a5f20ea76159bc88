use std::cell::Cell;

use once_cell::unsync::OnceCell;
use tracing::{debug, warn};

use crate::error::MapError;

/// Brings the mapping SDK into the page (script tag, native init, ...).
#[allow(async_fn_in_trait)]
pub trait SdkLoader {
    async fn load(&self) -> Result<(), String>;
}

/// Loader for surfaces that need no SDK, such as the headless one.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoSdk;

impl SdkLoader for NoSdk {
    async fn load(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Runs the SDK load at most once per gate.
///
/// The outcome is kept: later callers get the first result, success or
/// failure, without the loader running again.
#[derive(Debug, Default)]
pub struct SdkGate {
    outcome: OnceCell<Result<(), String>>,
    attempts: Cell<u32>,
}

impl SdkGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.outcome.get(), Some(Ok(())))
    }

    /// How many times a loader actually ran.
    pub fn attempts(&self) -> u32 {
        self.attempts.get()
    }

    pub async fn ensure_loaded<L: SdkLoader>(&self, loader: &L) -> Result<(), MapError> {
        if let Some(outcome) = self.outcome.get() {
            return outcome.clone().map_err(MapError::Render);
        }

        self.attempts.set(self.attempts.get() + 1);
        let result = loader.load().await;
        match &result {
            Ok(()) => debug!("mapping sdk loaded"),
            Err(err) => warn!(error = %err, "mapping sdk failed to load"),
        }
        // A concurrent caller on this thread may have finished first.
        let outcome = self.outcome.get_or_init(|| result);
        outcome.clone().map_err(MapError::Render)
    }
}
