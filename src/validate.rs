//! Lead-intake validation.
//!
//! DESIGN
//! ======
//! Pure field-constraint checking for the two public forms. A draft either
//! normalizes to a `ValidLead` or fails with the first violated field —
//! fail-fast, not accumulate-all, so callers surface a single message.

use serde::Deserialize;

const NAME_MAX: usize = 200;
const EMAIL_MAX: usize = 255;
const MESSAGE_MAX: usize = 5000;

/// Fixed catalog of service labels offered on the quote form. The
/// `service_interest` of a quote lead must be one of these.
pub const SERVICE_CATALOG: [&str; 11] = [
    "Cyber Security Solutions",
    "Firewall Sales & Support",
    "CCTV & SIRA Compliance",
    "Enterprise WiFi Solutions",
    "Structured Cabling",
    "AMC Support",
    "Access Control Systems",
    "Alarm & Security Systems",
    "VAPT Testing",
    "Endpoint Protection",
    "Complete IT Infrastructure",
];

/// Raw form submission as received from either public form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Normalized draft, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service_interest: Option<String>,
    pub message: String,
}

/// First failing field of a draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// RFC-shape check: one `@`, non-empty local part, domain with a dot.
fn email_shape_ok(email: &str) -> bool {
    let parts = email.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return false;
    }
    let domain = parts[1];
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Optional fields carry no constraints; empty input is treated as absent.
fn optional(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn check_name(draft: &LeadDraft) -> Result<String, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("name", "Name is required"));
    }
    if name.chars().count() > NAME_MAX {
        return Err(ValidationError::new("name", "Name is too long"));
    }
    Ok(name.to_owned())
}

fn check_email(draft: &LeadDraft) -> Result<String, ValidationError> {
    let email = draft.email.trim();
    if email.is_empty() || !email_shape_ok(email) {
        return Err(ValidationError::new("email", "Invalid email address"));
    }
    if email.chars().count() > EMAIL_MAX {
        return Err(ValidationError::new("email", "Email is too long"));
    }
    Ok(email.to_owned())
}

fn check_message(draft: &LeadDraft) -> Result<String, ValidationError> {
    let message = draft.message.trim();
    if message.is_empty() {
        return Err(ValidationError::new("message", "Message is required"));
    }
    if message.chars().count() > MESSAGE_MAX {
        return Err(ValidationError::new("message", "Message is too long"));
    }
    Ok(message.to_owned())
}

/// Validate a contact-form draft. `service` is ignored on this form.
///
/// # Errors
///
/// Returns the first violated field, in form order.
pub fn contact_draft(draft: &LeadDraft) -> Result<ValidLead, ValidationError> {
    let name = check_name(draft)?;
    let email = check_email(draft)?;
    let message = check_message(draft)?;

    Ok(ValidLead {
        name,
        email,
        phone: optional(draft.phone.as_ref()),
        company: optional(draft.company.as_ref()),
        service_interest: None,
        message,
    })
}

/// Validate a quote-form draft: contact rules plus a required service that
/// must match the fixed catalog.
///
/// # Errors
///
/// Returns the first violated field, in form order.
pub fn quote_draft(draft: &LeadDraft) -> Result<ValidLead, ValidationError> {
    let name = check_name(draft)?;
    let email = check_email(draft)?;

    let service = draft
        .service
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::new("service", "Please select a service"))?;
    if !SERVICE_CATALOG.contains(&service) {
        return Err(ValidationError::new("service", "Unknown service"));
    }

    let message = check_message(draft)?;

    Ok(ValidLead {
        name,
        email,
        phone: optional(draft.phone.as_ref()),
        company: optional(draft.company.as_ref()),
        service_interest: Some(service.to_owned()),
        message,
    })
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
