// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deserializer for decoding a document over an existing value.
//!
//! The document is the top layer. The destination's current value, turned into
//! a TOML value, is the layer below. A struct field comes from the document when
//! it has a matching key and from the layer below otherwise, so fields the file
//! does not mention keep what the destination already held.

use crate::domain::DecoderSettings;
use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{Deserializer, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

type Error = toml::de::Error;

pub(crate) struct InPlace {
    value: toml::Value,
    below: Option<toml::Value>,
    settings: DecoderSettings,
}

impl InPlace {
    pub(crate) fn new(
        value: toml::Value,
        below: Option<toml::Value>,
        settings: DecoderSettings,
    ) -> Self {
        Self {
            value,
            below,
            settings,
        }
    }

    fn leaf(value: toml::Value, settings: DecoderSettings) -> Self {
        Self::new(value, None, settings)
    }
}

fn into_table(value: Option<toml::Value>) -> toml::Table {
    match value {
        Some(toml::Value::Table(table)) => table,
        _ => toml::Table::new(),
    }
}

/// Finds the document key that fills `field`; an exact key wins over folded ones.
fn key_for(table: &toml::Table, field: &str, settings: &DecoderSettings) -> Option<String> {
    if table.contains_key(field) {
        return Some(field.to_string());
    }
    table
        .keys()
        .find(|key| settings.matches(key, field))
        .cloned()
}

impl<'de> Deserializer<'de> for InPlace {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let InPlace {
            value,
            below,
            settings,
        } = self;

        match value {
            // Free-form map: keys are exact, entries only found below survive
            toml::Value::Table(table) => {
                let mut below = into_table(below);
                let mut entries = Vec::with_capacity(table.len() + below.len());
                for (key, value) in table {
                    let under = below.remove(&key);
                    entries.push((key, InPlace::new(value, under, settings)));
                }
                entries.extend(
                    below
                        .into_iter()
                        .map(|(key, value)| (key, InPlace::leaf(value, settings))),
                );
                visitor.visit_map(MapDeserializer::new(entries.into_iter()))
            }
            toml::Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(
                items
                    .into_iter()
                    .map(|item| InPlace::leaf(item, settings)),
            )),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let InPlace {
            value,
            below,
            settings,
        } = self;

        let mut table = match value {
            toml::Value::Table(table) => table,
            other => return other.deserialize_struct(name, fields, visitor),
        };
        let mut below = into_table(below);

        let mut entries = Vec::with_capacity(fields.len());
        for &field in fields {
            let under = below.remove(field);
            let found = key_for(&table, field, &settings).and_then(|key| table.remove(&key));

            match (found, under) {
                (Some(value), under) => {
                    entries.push((field.to_string(), InPlace::new(value, under, settings)))
                }
                (None, Some(value)) => {
                    entries.push((field.to_string(), InPlace::leaf(value, settings)))
                }
                (None, None) => {}
            }
        }

        visitor.visit_map(MapDeserializer::new(entries.into_iter()))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.value.deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map identifier
        ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for InPlace {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}
