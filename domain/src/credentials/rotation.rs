//! API key rotation

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Round-robin key picker with a cursor per source name.
///
/// Repeated picks for the same source walk through its key set in order, so
/// a source issuing several requests in one run spreads them across every
/// configured key. Cursors are independent per source.
#[derive(Debug, Default)]
pub struct KeyRotation {
    cursors: Mutex<HashMap<String, usize>>,
}

impl KeyRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the next key for `source`, or `None` when `keys` is empty.
    ///
    /// Blank entries are never returned.
    pub fn pick(&self, keys: &[String], source: &str) -> Option<String> {
        let usable: Vec<&String> = keys.iter().filter(|k| !k.trim().is_empty()).collect();
        if usable.is_empty() {
            return None;
        }

        let mut cursors = self.cursors.lock().unwrap_or_else(PoisonError::into_inner);
        let cursor = cursors.entry(source.to_string()).or_insert(0);
        let key = usable[*cursor % usable.len()].trim().to_string();
        *cursor = cursor.wrapping_add(1);
        Some(key)
    }
}
