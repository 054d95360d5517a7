use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::info::Info;

/// A CAP alert message as stored in the alerts index.
///
/// Enumerated CAP values (status, message type, scope, ...) are kept as the
/// strings found in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Message identifier assigned by the sender
    pub identifier: String,

    /// Originator of the alert
    pub sender: String,

    /// Time the alert was sent
    pub sent: DateTime<FixedOffset>,

    /// Actual, Exercise, System, Test or Draft
    pub status: String,

    /// Alert, Update, Cancel, Ack or Error
    pub message_type: String,

    /// Public, Restricted or Private
    pub scope: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Earlier messages this one refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incidents: Option<String>,

    /// Information blocks, one per language or audience
    #[serde(default)]
    pub infos: Vec<Info>,
}

impl Alert {
    /// Information block at `offset`, as reported by an inner hit
    pub fn info(&self, offset: usize) -> Option<&Info> {
        self.infos.get(offset)
    }
}
