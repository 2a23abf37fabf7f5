// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;

/// API key for Notion API authentication
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let prefix: String = self.0.chars().take(10).collect();
        write!(f, "{}...", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// A section of the page body that holds comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentSection {
    Sales,
    Appointment,
}

impl CommentSection {
    pub const ALL: [CommentSection; 2] = [CommentSection::Sales, CommentSection::Appointment];

    /// Parses the `section` / `sectionType` query and body values.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "appointment" => Ok(Self::Appointment),
            other => Err(ValidationError::UnknownSection(other.to_string())),
        }
    }

    /// Literal heading text the section lives under.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Sales => crate::constants::SALES_COMMENTS_HEADING,
            Self::Appointment => crate::constants::APPOINTMENT_COMMENTS_HEADING,
        }
    }

    /// Prefix written in front of every comment of this section,
    /// e.g. `[SALES COMMENT]`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Sales => "[SALES COMMENT]",
            Self::Appointment => "[APPOINTMENT COMMENT]",
        }
    }
}

impl fmt::Display for CommentSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sales => write!(f, "sales"),
            Self::Appointment => write!(f, "appointment"),
        }
    }
}

/// A section of the page body that holds uploaded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentSection {
    #[default]
    Sales,
    AppointmentOwner,
    AppointmentLiveRepresentative,
}

impl DocumentSection {
    /// Parses the `sectionType` query value. Unknown values fall back to
    /// the sales documents section.
    pub fn from_query(input: Option<&str>) -> Self {
        match input.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("appointment") | Some("owner") => Self::AppointmentOwner,
            Some("live-representative") | Some("live_representative") | Some("live") => {
                Self::AppointmentLiveRepresentative
            }
            _ => Self::Sales,
        }
    }

    /// Literal heading text the section lives under.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Sales => crate::constants::SALES_DOCUMENTS_HEADING,
            Self::AppointmentOwner => crate::constants::APPOINTMENT_OWNER_DOCUMENTS_HEADING,
            Self::AppointmentLiveRepresentative => {
                crate::constants::APPOINTMENT_LIVE_REP_DOCUMENTS_HEADING
            }
        }
    }
}
