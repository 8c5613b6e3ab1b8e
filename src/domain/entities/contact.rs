use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

// ───── Input & Validation ───────────────────────────────────────────

/// Raw request body. Every field may be absent so that a missing field is
/// reported the same way as an empty one.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Trimmed submission, with the email lower-cased.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewContact {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        regex(path = *EMAIL_PATTERN, message = "Email address is not valid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl From<ContactForm> for NewContact {
    fn from(form: ContactForm) -> Self {
        fn clean(value: Option<String>) -> String {
            value.map(|v| v.trim().to_string()).unwrap_or_default()
        }

        NewContact {
            name: clean(form.name),
            email: clean(form.email).to_lowercase(),
            subject: clean(form.subject),
            message: clean(form.message),
        }
    }
}

impl NewContact {
    pub fn prepare_for_insert(self, provenance: RequestProvenance) -> ContactInsert {
        ContactInsert {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            created_at: Utc::now(),
            ip_address: provenance.ip_address,
            user_agent: provenance.user_agent,
        }
    }
}

/// Request metadata captured alongside a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestProvenance {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

/// Public echo of a saved submission. The message body is left out.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ContactSubmission> for ContactSummary {
    fn from(contact: &ContactSubmission) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            email: contact.email.clone(),
            subject: contact.subject.clone(),
            created_at: contact.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub message: String,
    pub data: ContactSummary,
    pub email_sent: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<ContactSubmission>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub data: ContactSubmission,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactDeletedResponse {
    pub success: bool,
    pub message: String,
}
