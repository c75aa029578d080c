/// Outgoing mail
///
/// Templates are embedded at compile time and rendered by substituting
/// `{{key}}` placeholders with HTML-escaped values from a JSON object.
/// Delivery goes through the [`Mailer`] trait:
///
/// - [`relay::RelayMailer`]: posts messages to an HTTP mail relay
/// - [`LogMailer`]: logs messages instead of sending them (development)
///
/// # Example
///
/// ```
/// use eventdesk_shared::mail::render;
/// use serde_json::json;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let html = render("registration-success.html", &json!({
///     "fullName": "Alice",
///     "activationLink": "https://eventdesk.example/activate?code=abc",
/// }))?;
/// assert!(html.contains("Alice"));
/// # Ok(())
/// # }
/// ```

pub mod relay;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Error type for mail operations
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// No embedded template has this name
    #[error("Unknown mail template: {0}")]
    UnknownTemplate(String),

    /// The transport failed to deliver the message
    #[error("Mail transport error: {0}")]
    Transport(String),
}

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Mail delivery collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// [`Mailer`] that only logs what it would send
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        tracing::info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "Mail relay not configured, message not sent"
        );
        Ok(())
    }
}

const TEMPLATES: &[(&str, &str)] = &[(
    "registration-success.html",
    include_str!("templates/registration-success.html"),
)];

/// Renders an embedded template with values from `data`
///
/// Placeholders with no matching key are left empty. Non-string values are
/// rendered with their JSON representation.
pub fn render(template: &str, data: &Value) -> Result<String, MailError> {
    let source = TEMPLATES
        .iter()
        .find(|(name, _)| *name == template)
        .map(|(_, source)| *source)
        .ok_or_else(|| MailError::UnknownTemplate(template.to_string()))?;

    let mut html = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let key = rest[start + 2..start + 2 + len].trim();

        html.push_str(&rest[..start]);
        match data.get(key) {
            Some(Value::String(s)) => html.push_str(&escape_html(s)),
            Some(Value::Null) | None => {}
            Some(other) => html.push_str(&escape_html(&other.to_string())),
        }
        rest = &rest[start + 2 + len + 2..];
    }
    html.push_str(rest);

    Ok(html)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
