use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Identifies a directive type. Every handler registration and every
/// blocking-policy lookup is keyed by this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectiveKey {
    pub namespace: String,
    pub name: String,
}

impl DirectiveKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DirectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveHeader {
    pub namespace: String,
    pub name: String,
    /// Unique per message.
    pub message_id: String,
    /// Correlation id grouping every directive and event of one dialog turn.
    pub dialog_request_id: String,
}

impl DirectiveHeader {
    pub fn key(&self) -> DirectiveKey {
        DirectiveKey::new(self.namespace.clone(), self.name.clone())
    }
}

/// A server-issued instruction targeting a capability agent. The payload
/// is opaque to the dispatch core; agents decode it with [`Directive::payload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub header: DirectiveHeader,
    pub payload_json: String,
}

impl Directive {
    pub fn from_payload<T: Serialize>(
        header: DirectiveHeader,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            header,
            payload_json: serde_json::to_string(payload)?,
        })
    }

    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.payload_json)
    }

    pub fn key(&self) -> DirectiveKey {
        self.header.key()
    }

    pub fn dialog_request_id(&self) -> &str {
        &self.header.dialog_request_id
    }

    pub fn message_id(&self) -> &str {
        &self.header.message_id
    }
}
