//! Client record and its create/update commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ClientId, Timestamp};

/// Whether a client is currently seen by the practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Client is in active treatment.
    #[default]
    Active,
    /// Client is no longer seen.
    Inactive,
}

impl ClientStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!(
                "invalid client status '{other}', expected active or inactive"
            )),
        }
    }
}

/// A stored client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Record identifier.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Treatment status.
    pub status: ClientStatus,
    /// When the first session took place.
    pub first_session: Option<Timestamp>,
    /// When the record was created.
    pub created_at: Timestamp,
}

/// Fields supplied when creating a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Treatment status, `active` when omitted.
    pub status: Option<ClientStatus>,
    /// When the first session took place.
    pub first_session: Option<Timestamp>,
}

/// Partial update for a client.
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientChanges {
    /// New display name.
    pub name: Option<String>,
    /// New or cleared email.
    pub email: Option<Option<String>>,
    /// New or cleared phone number.
    pub phone: Option<Option<String>>,
    /// New status.
    pub status: Option<ClientStatus>,
    /// New or cleared first-session time.
    pub first_session: Option<Option<Timestamp>>,
}

impl Client {
    /// Build a new record with a fresh id, creation time and defaults applied.
    #[must_use]
    pub fn create(new: NewClient) -> Self {
        Self {
            id: ClientId::generate(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            status: new.status.unwrap_or_default(),
            first_session: new.first_session,
            created_at: Timestamp::now(),
        }
    }

    /// Merge supplied fields over this record.
    pub fn apply(&mut self, changes: ClientChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(first_session) = changes.first_session {
            self.first_session = first_session;
        }
    }
}
