// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoded configuration document.
//!
//! A [`Document`] is the parsed form of the cached configuration bytes. It is
//! produced once per add or reload and then decoded into every destination.

use crate::domain::in_place::InPlace;
use crate::domain::{ConfigError, DecoderSettings, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A parsed TOML document and the settings its keys are matched with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    table: toml::Table,
    settings: DecoderSettings,
}

impl Document {
    /// Wraps a parsed table, matching keys with the default settings.
    pub fn new(table: toml::Table) -> Self {
        Self::with_settings(table, DecoderSettings::default())
    }

    /// Wraps a parsed table, matching keys with `settings`.
    pub fn with_settings(table: toml::Table, settings: DecoderSettings) -> Self {
        Self { table, settings }
    }

    /// Returns the top-level table.
    pub fn table(&self) -> &toml::Table {
        &self.table
    }

    /// Returns the key matching settings.
    pub fn settings(&self) -> &DecoderSettings {
        &self.settings
    }

    /// Decodes the document into a fresh value of type `T`.
    ///
    /// Keys the type does not declare are ignored. Fields the document does not
    /// mention must be optional or carry `#[serde(default)]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgpool::domain::Document;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Server {
    ///     max_conns: u16,
    /// }
    ///
    /// let table: toml::Table = toml::from_str("MaxConns = 8\nunused = true").unwrap();
    /// let server: Server = Document::new(table).decode().unwrap();
    /// assert_eq!(server.max_conns, 8);
    /// ```
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        self.decode_in_place(None)
    }

    /// Decodes the document over `current` and returns the result.
    ///
    /// Fields the document mentions are taken from it; every other field keeps
    /// its value from `current`, so missing keys are never an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgpool::domain::Document;
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize, Deserialize)]
    /// struct Server {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let current = Server { host: "localhost".to_string(), port: 8080 };
    /// let table: toml::Table = toml::from_str("host = \"example.org\"").unwrap();
    /// let server = Document::new(table).decode_over(&current).unwrap();
    /// assert_eq!(server.host, "example.org");
    /// assert_eq!(server.port, 8080);
    /// ```
    pub fn decode_over<T>(&self, current: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let below = match toml::Value::try_from(current) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    destination = std::any::type_name::<T>(),
                    "current value has no TOML form, decoding from the document alone: {}",
                    e
                );
                None
            }
        };
        self.decode_in_place(below)
    }

    fn decode_in_place<T: DeserializeOwned>(&self, below: Option<toml::Value>) -> Result<T> {
        let in_place = InPlace::new(toml::Value::Table(self.table.clone()), below, self.settings);
        T::deserialize(in_place).map_err(|e| ConfigError::DecodeInvalid {
            message: format!(
                "could not decode configuration into {}: {}",
                std::any::type_name::<T>(),
                e.message()
            ),
            source: Some(Box::new(e)),
        })
    }
}
