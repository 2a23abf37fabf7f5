// src/mapping/fields.rs
//! Field tables: which JSON key maps to which Notion property, and how the
//! property is typed.

/// Notion property kinds the CRM database uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    RichText,
    Select,
    MultiSelect,
    Status,
    Date,
}

/// One editable field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// camelCase key used in request and response bodies
    pub key: &'static str,
    /// Notion property name
    pub property: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, property: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        property,
        kind,
    }
}

pub const CUSTOMER_NAME: &str = "Customer Name";
pub const SALES_REPRESENTATIVE: &str = "Sales Representative";
pub const LEAD_DATE: &str = "Lead Date";
pub const SALES_DATE: &str = "Sales Date";
pub const APPOINTMENT_DATE: &str = "Appointment Date";
pub const ADDRESS: &str = "Address";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const ZIP_CODE: &str = "ZIP Code";
pub const JOB_TYPE: &str = "Job Type";
pub const EQUIPMENT_NEEDED: &str = "Equipment Needed";
pub const PHONE_NUMBER: &str = "Phone Number";
pub const EMAIL: &str = "Email";
pub const APPOINTMENT_STATUS: &str = "Appointment Status";
pub const SALES_STATUS: &str = "Sales Status";
pub const LIVE_REPRESENTATIVE: &str = "Live Representative";
pub const LIVE_REPRESENTATIVE_PAID: &str = "Live Representative Paid";
pub const SALES_REPRESENTATIVE_PAID: &str = "Sales Representative Paid";
pub const ALL_PAYMENTS_FINISHED: &str = "All Payments Finished";

use FieldKind::*;

pub const LEAD_FIELDS: &[FieldSpec] = &[
    field("customerName", CUSTOMER_NAME, Title),
    field("salesRepresentative", SALES_REPRESENTATIVE, Select),
    field("leadDate", LEAD_DATE, Date),
    field("address", ADDRESS, RichText),
    field("city", CITY, RichText),
    field("state", STATE, RichText),
    field("zipCode", ZIP_CODE, RichText),
    field("jobType", JOB_TYPE, MultiSelect),
    field("equipmentNeeded", EQUIPMENT_NEEDED, MultiSelect),
    field("phoneNumber", PHONE_NUMBER, RichText),
    field("email", EMAIL, RichText),
];

pub const SALE_FIELDS: &[FieldSpec] = &[
    field("customerName", CUSTOMER_NAME, Title),
    field("salesRepresentative", SALES_REPRESENTATIVE, Select),
    field("salesDate", SALES_DATE, Date),
    field("appointmentDate", APPOINTMENT_DATE, Date),
    field("address", ADDRESS, RichText),
    field("city", CITY, RichText),
    field("state", STATE, RichText),
    field("zipCode", ZIP_CODE, RichText),
    field("jobType", JOB_TYPE, MultiSelect),
    field("equipmentNeeded", EQUIPMENT_NEEDED, MultiSelect),
    field("phoneNumber", PHONE_NUMBER, RichText),
    field("email", EMAIL, RichText),
    field("appointmentStatus", APPOINTMENT_STATUS, Status),
    field("salesStatus", SALES_STATUS, Status),
    field("liveRepresentative", LIVE_REPRESENTATIVE, Select),
    field("liveRepresentativePaid", LIVE_REPRESENTATIVE_PAID, Select),
    field("salesRepresentativePaid", SALES_REPRESENTATIVE_PAID, Select),
];

/// Looks up a field by its JSON key.
pub fn find_field<'a>(fields: &'a [FieldSpec], key: &str) -> Option<&'a FieldSpec> {
    fields.iter().find(|spec| spec.key == key)
}
