//! Flat record views served to the dashboard.
//!
//! Every field is optional and serializes as `null` when the underlying
//! property is missing or empty. Payment flags are the exception: they
//! default to `"No"`.

use crate::types::{BlockId, PageId};
use serde::{Deserialize, Serialize};

/// A prospective customer, i.e. a page typed `Lead`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: PageId,
    pub customer_name: Option<String>,
    pub sales_representative: Option<String>,
    pub lead_date: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub job_type: Option<String>,
    pub equipment_needed: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// A closed deal with its appointment, i.e. a page typed `Sale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: PageId,
    pub customer_name: Option<String>,
    pub sales_representative: Option<String>,
    pub sales_date: Option<String>,
    pub appointment_date: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub job_type: Option<String>,
    pub equipment_needed: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub appointment_status: Option<String>,
    pub sales_status: Option<String>,
    pub live_representative: Option<String>,
    pub live_representative_paid: Option<String>,
    pub sales_representative_paid: Option<String>,
}

/// Payment tracking view over a `Sale` page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PageId,
    pub customer_name: Option<String>,
    pub sales_representative: Option<String>,
    pub live_representative: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub job_type: Option<String>,
    pub appointment_status: Option<String>,
    pub sales_status: Option<String>,
    pub all_payments_finished: String,
    pub sales_representative_paid: String,
    pub live_representative_paid: String,
}

/// Body of a lead creation request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadDraft {
    pub customer_name: Option<String>,
    pub sales_representative: Option<String>,
    pub lead_date: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub job_type: Option<String>,
    pub equipment_needed: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// A comment reconstructed from a paragraph block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Same as `block_id`; stable across reads.
    pub id: String,
    pub block_id: BlockId,
    pub timestamp: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Image,
    File,
}

impl DocumentKind {
    /// Prefix used for synthesized file names.
    pub fn display_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Image => "Image",
            DocumentKind::File => "Document",
        }
    }
}

/// An image or file attached under a documents heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub file_name: String,
    pub file_url: String,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
}
