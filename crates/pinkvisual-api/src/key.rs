//! Process-wide default API key.

use std::sync::{PoisonError, RwLock};

/// Key used when neither the request parameters nor the client carry one.
static DEFAULT_KEY: RwLock<Option<String>> = RwLock::new(None);

/// Sets the process-wide default API key, replacing any previous one.
///
/// Clients fall back to this key for requests whose parameters and builder
/// configuration carry no key.
pub fn init(key: impl Into<String>) {
    let mut slot = DEFAULT_KEY.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(key.into());
}

/// Returns the process-wide default API key, if one was set via [`init`].
#[must_use]
pub fn default_key() -> Option<String> {
    DEFAULT_KEY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
