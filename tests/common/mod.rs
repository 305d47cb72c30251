// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixtures shared by the integration tests.

use serde::{Deserialize, Serialize};

/// First fixture file.
#[allow(dead_code)]
pub const CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/config.test.toml");

/// Same schema as [`CONFIG`], different values.
#[allow(dead_code)]
pub const CONFIG2: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/config2.test.toml");

/// Starts with a malformed section header.
#[allow(dead_code)]
pub const CONFIG_INVALID: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/testdata/config-invalid.test.toml"
);

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Something {
    #[serde(default)]
    pub blaat: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Aaaaa {
    #[serde(default)]
    pub aa: String,
    #[serde(default)]
    pub bb: i64,
}

/// Mirrors the layout of the fixture files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestConfig {
    #[serde(default)]
    pub something: Something,
    #[serde(default)]
    pub aaaaa: Aaaaa,
}

/// Contents of [`CONFIG`].
#[allow(dead_code)]
pub fn config_values() -> TestConfig {
    TestConfig {
        something: Something {
            blaat: "asdf".to_string(),
        },
        aaaaa: Aaaaa {
            aa: "bbbbbbbb".to_string(),
            bb: 32,
        },
    }
}

/// Contents of [`CONFIG2`].
#[allow(dead_code)]
pub fn config2_values() -> TestConfig {
    TestConfig {
        something: Something {
            blaat: "asdf2".to_string(),
        },
        aaaaa: Aaaaa {
            aa: "bbbbbbbb2".to_string(),
            bb: 322,
        },
    }
}
