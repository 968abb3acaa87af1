//! Account types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ParseIdError;

/// Unique account identifier
///
/// Accounts are the subjects that sessions bind to, so this is also the
/// type of an authenticated subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Parse an account ID from a path segment or stored session value
    pub fn parse(s: &str) -> Result<Self, ParseIdError> {
        s.parse::<i64>().map(Self).map_err(|_| ParseIdError {
            kind: "account",
            value: s.to_string(),
        })
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Account record as exposed over the API
///
/// The password is accepted on input but never serialized back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "update_at")]
    pub updated_at: DateTime<Utc>,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub name: String,
    pub email: String,
}

/// Input for account creation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

/// Partial update for an account
///
/// Empty strings mean "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountChanges {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

impl AccountChanges {
    /// Apply non-empty fields onto an existing account
    pub fn merge_into(self, account: &mut Account) {
        merge_str(&mut account.username, self.username);
        merge_str(&mut account.password, self.password);
        merge_str(&mut account.name, self.name);
        merge_str(&mut account.email, self.email);
    }
}

#[inline]
pub(crate) fn merge_str(target: &mut String, incoming: String) {
    if !incoming.is_empty() {
        *target = incoming;
    }
}
