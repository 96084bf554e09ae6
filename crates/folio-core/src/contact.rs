//! Contact form rules and the mail-relay wire contract.
//!
//! The relay endpoint itself is an external collaborator; this module owns
//! the client-side validation (no network call with an empty field), the
//! JSON envelope, and the submit status surfaced inline to the visitor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ContactError {
    #[error("please fill in your {0}")]
    MissingField(&'static str),
}

impl ContactDraft {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// Client-side validation; fails on the first blank field.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}

/// The relay's JSON reply envelope: `{ "ok": bool, "error": string? }`.
#[derive(Debug, Deserialize)]
pub struct RelayReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl RelayReply {
    /// Folds the HTTP status and envelope into a submit outcome. The
    /// submission is preserved by the caller on failure; only success
    /// clears it.
    pub fn into_status(self, http_ok: bool) -> SubmitStatus {
        if http_ok && self.ok {
            SubmitStatus::Sent
        } else {
            SubmitStatus::Failed(
                self.error
                    .unwrap_or_else(|| "Failed to send message.".to_string()),
            )
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Sent,
    Failed(String),
}

impl SubmitStatus {
    pub fn inline_text(&self) -> &str {
        match self {
            SubmitStatus::Idle => "",
            SubmitStatus::Sending => "Sending…",
            SubmitStatus::Sent => "Message sent. Thank you!",
            SubmitStatus::Failed(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_names_the_first_missing_field() {
        let draft = ContactDraft::new("", "a@b.c", "hi");
        assert_eq!(draft.validate(), Err(ContactError::MissingField("name")));
        let draft = ContactDraft::new("A", "   ", "hi");
        assert_eq!(draft.validate(), Err(ContactError::MissingField("email")));
        let draft = ContactDraft::new("A", "a@b.c", "");
        assert_eq!(draft.validate(), Err(ContactError::MissingField("message")));
        assert!(ContactDraft::new("A", "a@b.c", "hi").validate().is_ok());
    }

    #[test]
    fn reply_envelope_maps_to_status() {
        let ok: RelayReply = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(ok.into_status(true), SubmitStatus::Sent);

        let err: RelayReply =
            serde_json::from_str(r#"{"ok":false,"error":"Missing required fields"}"#).unwrap();
        assert_eq!(
            err.into_status(false),
            SubmitStatus::Failed("Missing required fields".to_string())
        );

        // 200 with a malformed body still fails safe.
        let empty: RelayReply = serde_json::from_str("{}").unwrap();
        assert!(matches!(empty.into_status(true), SubmitStatus::Failed(_)));
    }

    #[test]
    fn clear_empties_every_field() {
        let mut draft = ContactDraft::new("A", "a@b.c", "hi");
        draft.clear();
        assert_eq!(draft, ContactDraft::default());
    }
}
