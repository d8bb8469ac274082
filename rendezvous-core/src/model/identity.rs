use serde::{Deserialize, Serialize};
use std::fmt;

/// Application-supplied participant label, e.g. an email address.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct ParticipantIdentity(pub String);

impl From<&str> for ParticipantIdentity {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ParticipantIdentity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ParticipantIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
