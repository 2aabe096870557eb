// src/session.rs
use std::fmt;

use uuid::Uuid;

use crate::error::SessionIdError;

const PREFIX: &str = "session-";
const SUFFIX_LEN: usize = 8;
const MAX_LEN: usize = 100;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque token the backend uses to correlate the turns of one widget.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Fresh `session-xxxxxxxx` id with a random base-36 suffix.
    pub fn generate() -> Self {
        let mut bits = Uuid::new_v4().as_u128();
        let mut id = String::with_capacity(PREFIX.len() + SUFFIX_LEN);
        id.push_str(PREFIX);
        for _ in 0..SUFFIX_LEN {
            id.push(BASE36[(bits % 36) as usize] as char);
            bits /= 36;
        }
        Self(id)
    }

    /// Accepts an injected id if the backend would accept it too:
    /// 1 to 100 characters of `[a-zA-Z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, SessionIdError> {
        if raw.is_empty() || raw.len() > MAX_LEN {
            return Err(SessionIdError::Length(raw.len()));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(SessionIdError::InvalidChar(bad));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
