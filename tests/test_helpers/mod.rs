//! Scoped `FOCUSBOARD_*` environment for configuration tests.

use focusboard::config::{
    API_BASE_VAR, API_KEY_VAR, LISTEN_VAR, MAX_TOKENS_VAR, MODEL_VAR, TIMEOUT_VAR, UTC_OFFSET_VAR,
};
use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Every variable the configuration layer reads.
pub const CONFIG_VARS: [&str; 7] = [
    API_KEY_VAR,
    MODEL_VAR,
    API_BASE_VAR,
    MAX_TOKENS_VAR,
    TIMEOUT_VAR,
    UTC_OFFSET_VAR,
    LISTEN_VAR,
];

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the configuration environment for one test.
///
/// Every variable in [`CONFIG_VARS`] is cleared unless given a value, and
/// the previous values come back on drop. Tests holding a guard run one at
/// a time.
pub struct ScopedConfigEnv {
    previous: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedConfigEnv {
    /// Clears the configuration variables, then sets `values`.
    pub fn with(values: &[(&str, &str)]) -> Self {
        let lock = env_lock();
        let previous = CONFIG_VARS
            .iter()
            .map(|key| {
                let saved = env::var_os(key);
                let value = values
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| *value);
                unsafe {
                    // SAFETY: the global mutex serializes environment mutations in tests.
                    match value {
                        Some(value) => env::set_var(key, value),
                        None => env::remove_var(key),
                    }
                }
                (*key, saved)
            })
            .collect();
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for ScopedConfigEnv {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(key, previous),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
