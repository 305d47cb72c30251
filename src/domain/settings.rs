// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoder settings.
//!
//! The settings decide how document keys are matched against destination fields.
//! Unknown keys are never an error: whatever a destination does not declare is
//! skipped by the decoder.

/// How document keys are matched to struct fields.
///
/// Only struct fields are matched this way. Keys of free-form maps are always
/// kept exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Keys must equal the field name exactly.
    Verbatim,
    /// Keys and field names are compared lowercased and without underscores, so
    /// `maxconns`, `MAXCONNS`, `MaxConns` and `max_conns` all fill `max_conns`.
    #[default]
    Folded,
}

/// Immutable decoding policy shared by every destination of a cache.
///
/// # Examples
///
/// ```
/// use cfgpool::domain::{DecoderSettings, KeyCase};
///
/// let settings = DecoderSettings::default();
/// assert!(settings.matches("MAXCONNS", "max_conns"));
///
/// let verbatim = DecoderSettings::new(KeyCase::Verbatim);
/// assert!(!verbatim.matches("MAXCONNS", "max_conns"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderSettings {
    key_case: KeyCase,
}

impl DecoderSettings {
    /// Creates settings with the given key matching.
    pub fn new(key_case: KeyCase) -> Self {
        Self { key_case }
    }

    /// Returns the key matching in use.
    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    /// Returns the form of `name` that keys and fields are compared in.
    pub fn fold(&self, name: &str) -> String {
        match self.key_case {
            KeyCase::Verbatim => name.to_string(),
            KeyCase::Folded => name.to_lowercase().replace('_', ""),
        }
    }

    /// Returns `true` if the document key `key` fills the field `field`.
    pub fn matches(&self, key: &str, field: &str) -> bool {
        key == field || self.fold(key) == self.fold(field)
    }
}
