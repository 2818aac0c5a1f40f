//! Serde mirror of the on-disk configuration format.
//!
//! Every field is optional here so that validation can report all missing
//! keys at once instead of failing on the first one.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfiguration {
    pub template_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub input_path: Option<PathBuf>,
    pub mappings: Option<MappingEntries>,
    pub product_name: Option<String>,
    pub expected_count: Option<usize>,
    #[serde(default)]
    pub should_ignore: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMapping {
    pub input_field: Option<String>,
    pub custom_operation: Option<String>,
    pub sheet_number: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub params: Option<RawParams>,
    pub formatter: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub(crate) struct RawParams {
    #[serde(alias = "startRow")]
    pub start_row: Option<i64>,
    #[serde(alias = "endRow")]
    pub end_row: Option<i64>,
    #[serde(alias = "startCol")]
    pub start_col: Option<i64>,
    #[serde(alias = "endCol")]
    pub end_col: Option<i64>,
}

/// The `mappings` object as an ordered list of entries, duplicates included.
#[derive(Debug, Default)]
pub(crate) struct MappingEntries(pub Vec<(String, RawMapping)>);

impl<'de> Deserialize<'de> for MappingEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = MappingEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping placeholder names to mapping specs")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((placeholder, mapping)) = map.next_entry::<String, RawMapping>()? {
                    entries.push((placeholder, mapping));
                }
                Ok(MappingEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Just enough of a configuration to list it for selection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfigHeader {
    pub product_name: Option<String>,
    #[serde(default)]
    pub should_ignore: bool,
}
