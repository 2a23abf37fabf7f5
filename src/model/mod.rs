mod block;
pub mod blocks;
pub mod common;
mod property_value;
mod records;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use property_value::PropertyTypeValue;
pub use records::*;

use crate::types::{PageId, SelectOption};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A row of the CRM database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub url: String,
    pub properties: HashMap<String, PropertyTypeValue>,
    pub archived: bool,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&PropertyTypeValue> {
        self.properties.get(name)
    }
}

/// Option lists of the database's choice properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatabaseSchema {
    pub properties: BTreeMap<String, SchemaProperty>,
}

/// A select, multi-select or status property and its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub kind: ChoiceKind,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    Select,
    MultiSelect,
    Status,
}
