//! Process environment helpers shared by tests that read real variables.

use std::ffi::{OsStr, OsString};
use std::sync::Mutex;

// Global mutex to ensure tests touching the environment run sequentially
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Sets or removes variables and restores the original values on drop
pub struct EnvGuard {
    vars_to_restore: Vec<(String, Option<OsString>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            vars_to_restore: Vec::new(),
        }
    }

    pub fn set(&mut self, key: &str, value: impl AsRef<OsStr>) {
        let original = std::env::var_os(key);
        self.vars_to_restore.push((key.to_string(), original));
        unsafe {
            std::env::set_var(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) {
        let original = std::env::var_os(key);
        self.vars_to_restore.push((key.to_string(), original));
        unsafe {
            std::env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // Reverse order so a key set twice ends at its first original value
        for (key, original_value) in self.vars_to_restore.iter().rev() {
            unsafe {
                match original_value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
