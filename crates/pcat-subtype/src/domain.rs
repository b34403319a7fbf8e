//! Per-domain field mapping
//!
//! Every catalogue domain stores the same shape under different field names:
//! a parent record with an id, bilingual names and a nested list of sub
//! types. One [`DomainMapping`] row names those fields; everything else is
//! generic over the row.

use pcat_option::{OptionValue, SelectOption};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DomainMapping {
    /// Domain tag (`cabin`, `engine`, ...)
    pub tag: String,
    /// Parent identifier field
    pub id_field: String,
    /// Field holding the nested sub-type array
    pub leaves_field: String,
    /// Sub-type identifier field
    pub leaf_id_field: String,
    /// Primary-language name field
    pub name_field: String,
    /// Secondary-language name field
    pub alt_name_field: String,
}

/// A sub type read out of a parent record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Option shown to the user
    pub option: SelectOption,
    /// Primary-language name
    pub name: String,
    /// Secondary-language name
    pub alt_name: String,
}

impl Leaf {
    /// Case-insensitive substring match over both names
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.alt_name.to_lowercase().contains(needle_lower)
    }
}

impl DomainMapping {
    /// Create mapping row
    #[must_use]
    pub fn new(
        tag: &str,
        id_field: &str,
        leaves_field: &str,
        leaf_id_field: &str,
        name_field: &str,
        alt_name_field: &str,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            id_field: id_field.to_string(),
            leaves_field: leaves_field.to_string(),
            leaf_id_field: leaf_id_field.to_string(),
            name_field: name_field.to_string(),
            alt_name_field: alt_name_field.to_string(),
        }
    }

    /// Identifier of a parent record
    #[must_use]
    pub fn parent_id(&self, record: &Value) -> Option<OptionValue> {
        record.get(&self.id_field).and_then(OptionValue::from_json)
    }

    /// Parent record as a selectable option
    #[must_use]
    pub fn parent_option(&self, record: &Value) -> Option<SelectOption> {
        let id = self.parent_id(record)?;
        let label = self.label_of(record).unwrap_or_else(|| id.to_string());
        Some(SelectOption::new(id, label))
    }

    /// Sub types nested in a parent record
    ///
    /// Returns `None` when the record has no sub-type array. Entries without
    /// a usable id are skipped.
    #[must_use]
    pub fn leaves(&self, record: &Value) -> Option<Vec<Leaf>> {
        let nested = record.get(&self.leaves_field)?.as_array()?;

        Some(
            nested
                .iter()
                .filter_map(|leaf| {
                    let id = leaf.get(&self.leaf_id_field).and_then(OptionValue::from_json)?;
                    let name = text_field(leaf, &self.name_field);
                    let alt_name = text_field(leaf, &self.alt_name_field);
                    let label = self.label_of(leaf).unwrap_or_else(|| id.to_string());
                    Some(Leaf {
                        option: SelectOption::new(id, label),
                        name,
                        alt_name,
                    })
                })
                .collect(),
        )
    }

    /// Primary name, falling back to the secondary name
    fn label_of(&self, record: &Value) -> Option<String> {
        [&self.name_field, &self.alt_name_field]
            .into_iter()
            .map(|field| text_field(record, field))
            .find(|name| !name.trim().is_empty())
    }
}

fn text_field(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Built-in rows: tag, id, nested list, sub-type id, primary name, secondary name
const BUILTIN: &[[&str; 6]] = &[
    ["cabin", "id", "cabinSubTypes", "cabinSubTypeId", "nameEn", "nameAr"],
    ["engine", "id", "engineSubTypes", "engineSubTypeId", "nameEn", "nameAr"],
    ["axle", "id", "axleSubTypes", "axleSubTypeId", "nameEn", "nameAr"],
    ["transmission", "id", "transmissionSubTypes", "transmissionSubTypeId", "nameEn", "nameAr"],
];

/// Declarative table of domain mappings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainTable {
    rows: Vec<DomainMapping>,
}

impl DomainTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Table with the built-in catalogue domains
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for [tag, id, leaves, leaf_id, name, alt_name] in BUILTIN {
            table.insert(DomainMapping::new(tag, id, leaves, leaf_id, name, alt_name));
        }
        table
    }

    /// Add or replace the row for `mapping.tag`
    pub fn insert(&mut self, mapping: DomainMapping) {
        match self.rows.iter_mut().find(|row| row.tag == mapping.tag) {
            Some(row) => *row = mapping,
            None => self.rows.push(mapping),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, mapping: DomainMapping) -> Self {
        self.insert(mapping);
        self
    }

    /// Row for domain tag
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&DomainMapping> {
        self.rows.iter().find(|row| row.tag == tag)
    }

    /// Domain tags in insertion order
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.tag.as_str()).collect()
    }

    /// All rows
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[DomainMapping] {
        &self.rows
    }
}
