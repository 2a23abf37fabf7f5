// src/mapping/reader.rs
//! Raw page properties to flat records.

use super::fields::*;
use super::join_multi;
use crate::constants::PAYMENT_FLAG_DEFAULT;
use crate::model::{Lead, Page, Payment, PropertyTypeValue, Sale};

/// Flattens a property value to its display string.
///
/// Title and rich text yield the first run, select and status the option
/// name, multi-select the option names joined with `", "`, and dates their
/// `start`. Empty values come back as `None`.
pub fn property_text(value: &PropertyTypeValue) -> Option<String> {
    use PropertyTypeValue::*;

    let text = match value {
        Title { title: items } | RichText { rich_text: items } => {
            items.first().map(|item| item.plain_text.clone())
        }
        Select { select: option } | Status { status: option } => {
            option.as_ref().map(|option| option.name.clone())
        }
        MultiSelect { multi_select } => Some(join_multi(
            multi_select.iter().map(|option| option.name.as_str()),
        )),
        Date { date } => date.as_ref().and_then(|date| date.start.clone()),
        Unsupported => None,
    };
    text.filter(|text| !text.is_empty())
}

/// Reads named properties off a page.
pub struct PropertyReader<'a> {
    page: &'a Page,
}

impl<'a> PropertyReader<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    pub fn text(&self, property: &str) -> Option<String> {
        self.page.property(property).and_then(property_text)
    }

    /// A Yes/No select that reads as `"No"` when unset.
    pub fn flag(&self, property: &str) -> String {
        self.text(property)
            .unwrap_or_else(|| PAYMENT_FLAG_DEFAULT.to_string())
    }
}

impl From<&Page> for Lead {
    fn from(page: &Page) -> Self {
        let r = PropertyReader::new(page);
        Lead {
            id: page.id.clone(),
            customer_name: r.text(CUSTOMER_NAME),
            sales_representative: r.text(SALES_REPRESENTATIVE),
            lead_date: r.text(LEAD_DATE),
            address: r.text(ADDRESS),
            city: r.text(CITY),
            state: r.text(STATE),
            zip_code: r.text(ZIP_CODE),
            job_type: r.text(JOB_TYPE),
            equipment_needed: r.text(EQUIPMENT_NEEDED),
            phone_number: r.text(PHONE_NUMBER),
            email: r.text(EMAIL),
        }
    }
}

impl From<&Page> for Sale {
    fn from(page: &Page) -> Self {
        let r = PropertyReader::new(page);
        Sale {
            id: page.id.clone(),
            customer_name: r.text(CUSTOMER_NAME),
            sales_representative: r.text(SALES_REPRESENTATIVE),
            sales_date: r.text(SALES_DATE),
            appointment_date: r.text(APPOINTMENT_DATE),
            address: r.text(ADDRESS),
            city: r.text(CITY),
            state: r.text(STATE),
            zip_code: r.text(ZIP_CODE),
            job_type: r.text(JOB_TYPE),
            equipment_needed: r.text(EQUIPMENT_NEEDED),
            phone_number: r.text(PHONE_NUMBER),
            email: r.text(EMAIL),
            appointment_status: r.text(APPOINTMENT_STATUS),
            sales_status: r.text(SALES_STATUS),
            live_representative: r.text(LIVE_REPRESENTATIVE),
            live_representative_paid: r.text(LIVE_REPRESENTATIVE_PAID),
            sales_representative_paid: r.text(SALES_REPRESENTATIVE_PAID),
        }
    }
}

impl From<&Page> for Payment {
    fn from(page: &Page) -> Self {
        let r = PropertyReader::new(page);
        Payment {
            id: page.id.clone(),
            customer_name: r.text(CUSTOMER_NAME),
            sales_representative: r.text(SALES_REPRESENTATIVE),
            live_representative: r.text(LIVE_REPRESENTATIVE),
            address: r.text(ADDRESS),
            city: r.text(CITY),
            state: r.text(STATE),
            zip_code: r.text(ZIP_CODE),
            job_type: r.text(JOB_TYPE),
            appointment_status: r.text(APPOINTMENT_STATUS),
            sales_status: r.text(SALES_STATUS),
            all_payments_finished: r.flag(ALL_PAYMENTS_FINISHED),
            sales_representative_paid: r.flag(SALES_REPRESENTATIVE_PAID),
            live_representative_paid: r.flag(LIVE_REPRESENTATIVE_PAID),
        }
    }
}
