// src/mapping/patch.rs
//! Flat records to outbound property payloads.

use super::fields::{self, FieldKind, FieldSpec};
use super::split_multi;
use crate::api::requests::text_runs;
use crate::api::PropertyPayload;
use crate::constants::TYPE_PROPERTY;
use crate::model::LeadDraft;
use crate::types::ValidationError;
use serde_json::{json, Map, Value};

/// Notion JSON for one property. `None` clears the property.
pub fn property_json(kind: FieldKind, value: Option<&str>) -> Value {
    let value = value.filter(|v| !v.is_empty());
    match kind {
        FieldKind::Title => json!({ "title": text_runs(value.unwrap_or_default()) }),
        FieldKind::RichText => json!({ "rich_text": text_runs(value.unwrap_or_default()) }),
        FieldKind::Select => json!({ "select": value.map(|name| json!({ "name": name })) }),
        FieldKind::Status => json!({ "status": value.map(|name| json!({ "name": name })) }),
        FieldKind::MultiSelect => {
            let options: Vec<Value> = value
                .map(split_multi)
                .unwrap_or_default()
                .into_iter()
                .map(|name| json!({ "name": name }))
                .collect();
            json!({ "multi_select": options })
        }
        FieldKind::Date => json!({ "date": value.map(|start| json!({ "start": start })) }),
    }
}

/// Builder for a property payload.
///
/// Properties never touched are absent from the payload, so Notion leaves
/// them unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    properties: PropertyPayload,
}

impl PropertyPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field; empty strings clear it.
    pub fn set(&mut self, spec: &FieldSpec, value: &str) -> &mut Self {
        self.properties
            .insert(spec.property.to_string(), property_json(spec.kind, Some(value)));
        self
    }

    pub fn clear(&mut self, spec: &FieldSpec) -> &mut Self {
        self.properties
            .insert(spec.property.to_string(), property_json(spec.kind, None));
        self
    }

    /// Sets a select property outside the field tables, e.g. `Type`.
    pub fn select(&mut self, property: &str, name: &str) -> &mut Self {
        self.properties.insert(
            property.to_string(),
            property_json(FieldKind::Select, Some(name)),
        );
        self
    }

    pub fn date(&mut self, property: &str, start: &str) -> &mut Self {
        self.properties.insert(
            property.to_string(),
            property_json(FieldKind::Date, Some(start)),
        );
        self
    }

    /// Applies a partial update body against a field table.
    ///
    /// Absent keys are skipped, `null` and `""` clear, strings set. Keys
    /// outside the table are ignored. Any other JSON type is rejected.
    pub fn from_partial(
        fields: &[FieldSpec],
        body: &Map<String, Value>,
    ) -> Result<Self, ValidationError> {
        let mut patch = Self::new();
        for spec in fields {
            match body.get(spec.key) {
                None => {}
                Some(Value::Null) => {
                    patch.clear(spec);
                }
                Some(Value::String(value)) => {
                    patch.set(spec, value);
                }
                Some(_) => {
                    return Err(ValidationError::InvalidFieldValue {
                        field: spec.key.to_string(),
                    })
                }
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn into_payload(self) -> PropertyPayload {
        self.properties
    }
}

/// Properties for a new lead page.
///
/// `Type` is always `Lead`; the title and the free-text fields are always
/// sent (empty when missing); choice and date fields only when non-empty.
pub fn lead_creation_payload(draft: &LeadDraft) -> PropertyPayload {
    let mut patch = PropertyPatch::new();
    patch.select(TYPE_PROPERTY, crate::constants::TYPE_LEAD);

    let values: [(&str, &Option<String>); 11] = [
        ("customerName", &draft.customer_name),
        ("salesRepresentative", &draft.sales_representative),
        ("leadDate", &draft.lead_date),
        ("address", &draft.address),
        ("city", &draft.city),
        ("state", &draft.state),
        ("zipCode", &draft.zip_code),
        ("jobType", &draft.job_type),
        ("equipmentNeeded", &draft.equipment_needed),
        ("phoneNumber", &draft.phone_number),
        ("email", &draft.email),
    ];

    for (key, value) in values {
        let Some(spec) = fields::find_field(fields::LEAD_FIELDS, key) else {
            continue;
        };
        let value = value.as_deref().filter(|v| !v.is_empty());
        match (spec.kind, value) {
            (FieldKind::Title | FieldKind::RichText, value) => {
                patch.set(spec, value.unwrap_or_default());
            }
            (_, Some(value)) => {
                patch.set(spec, value);
            }
            (_, None) => {}
        }
    }

    patch.into_payload()
}
