// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML decoder adapter.
//!
//! This module turns raw configuration bytes into a [`Document`] that matches
//! keys according to the cache's [`DecoderSettings`].

use crate::domain::{ConfigError, DecoderSettings, Document, Result};
use crate::ports::ConfigDecoder;

/// TOML decoder implementation.
///
/// # Examples
///
/// ```rust
/// use cfgpool::adapters::TomlDecoder;
/// use cfgpool::ports::ConfigDecoder;
///
/// let decoder = TomlDecoder::new();
/// let doc = decoder.decode(b"[Server]\nmaxConns = 4").unwrap();
/// let server = doc.table()["Server"].as_table().unwrap();
/// assert_eq!(server["maxConns"].as_integer(), Some(4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlDecoder {
    settings: DecoderSettings,
}

impl TomlDecoder {
    /// Creates a decoder with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with the given settings.
    pub fn with_settings(settings: DecoderSettings) -> Self {
        Self { settings }
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &DecoderSettings {
        &self.settings
    }
}

impl ConfigDecoder for TomlDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let content = std::str::from_utf8(bytes).map_err(|e| ConfigError::DecodeInvalid {
            message: format!("configuration is not valid UTF-8: {}", e),
            source: Some(Box::new(e)),
        })?;

        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
                line: error_line(content, &e),
                source: e,
            })?;

        Ok(Document::with_settings(table, self.settings))
    }
}

/// Returns the 1-based line the parser stopped on.
///
/// The offending character itself is counted, so when the parser trips over
/// the newline that ends a line, the error is reported on the following line.
fn error_line(content: &str, err: &toml::de::Error) -> usize {
    let offset = err.span().map_or(0, |span| span.start);
    let end = (offset + 1).min(content.len());
    1 + content.as_bytes()[..end]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, KeyCase};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Something {
        blaat: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Aaaaa {
        aa: String,
        bb: i64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Expected {
        something: Something,
        aaaaa: Aaaaa,
    }

    const VALID: &str =
        "[something]\n    blaat=\"asdf\"\n    qwer=\"qwerqwer\"\n\n[aaaaa]\n    aa=\"bbbbbbbb\"\n    bb=32";

    const INVALID: &str =
        "[something\n    blaat=\"asdf2\"\n    qwer=\"qwerqwer2\"\n\n[aaaaa]\n    aa=\"bbbbbbbb2\"\n    bb=322";

    #[test]
    fn test_decode_valid_document() {
        let doc = TomlDecoder::new().decode(VALID.as_bytes()).unwrap();
        let expected: Expected = doc.decode().unwrap();
        assert_eq!(
            expected,
            Expected {
                something: Something {
                    blaat: "asdf".to_string()
                },
                aaaaa: Aaaaa {
                    aa: "bbbbbbbb".to_string(),
                    bb: 32
                },
            }
        );
    }

    #[test]
    fn test_decode_invalid_syntax_reports_line() {
        let err = TomlDecoder::new().decode(INVALID.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeInvalid);
        assert_eq!(err.to_string(), "line 2: invalid TOML syntax");
        assert!(matches!(err, ConfigError::InvalidSyntax { line: 2, .. }));
    }

    #[test]
    fn test_decode_invalid_syntax_keeps_decoder_diagnostic() {
        let err = TomlDecoder::new().decode(INVALID.as_bytes()).unwrap_err();
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("line 1"));
    }

    #[test]
    fn test_decode_error_on_first_line() {
        let err = TomlDecoder::new().decode(b"key = = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyntax { line: 1, .. }));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = TomlDecoder::new().decode(&[b'a', b'=', 0xff, 0xfe]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeInvalid);
        assert!(err.to_string().starts_with("configuration is not valid UTF-8"));
    }

    #[test]
    fn test_decode_empty_document() {
        let doc = TomlDecoder::new().decode(b"").unwrap();
        assert!(doc.table().is_empty());
    }

    #[test]
    fn test_decode_keeps_keys_as_written() {
        let content = "[Something]\nBlaat = \"x\"\n\n[[Servers]]\nHostName = \"a\"\n";
        let doc = TomlDecoder::new().decode(content.as_bytes()).unwrap();
        let table = doc.table();

        assert_eq!(table["Something"]["Blaat"].as_str(), Some("x"));
        let servers = table["Servers"].as_array().unwrap();
        assert_eq!(servers[0]["HostName"].as_str(), Some("a"));
    }

    #[test]
    fn test_decode_matches_keys_to_fields() {
        #[derive(Debug, Deserialize)]
        struct Server {
            host_name: String,
        }

        #[derive(Debug, Deserialize)]
        struct Servers {
            servers: Vec<Server>,
        }

        let content = "[[Servers]]\nHostName = \"a\"\n\n[[servers]]\nhostname = \"b\"\n";
        let doc = TomlDecoder::new().decode(content.as_bytes()).unwrap();
        let servers: Servers = doc.decode().unwrap();
        assert_eq!(servers.servers[0].host_name, "b");
    }

    #[test]
    fn test_decoder_passes_settings_on() {
        let decoder = TomlDecoder::with_settings(DecoderSettings::new(KeyCase::Verbatim));
        let doc = decoder.decode(b"[Something]\nBlaat = \"x\"\n").unwrap();
        assert_eq!(doc.settings().key_case(), KeyCase::Verbatim);
        assert!(doc.decode::<Expected>().is_err());
    }
}
