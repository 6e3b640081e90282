use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHeader {
    pub namespace: String,
    pub name: String,
    pub message_id: String,
    /// Present when the event opens a new dialog turn.
    pub dialog_request_id: Option<String>,
    /// Present when the event answers a directive of an earlier turn.
    pub referrer_dialog_request_id: Option<String>,
}

/// Outbound message handed to the transport's `MessageSender`. The core
/// never serializes to the wire itself; the payload stays opaque JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    pub header: EventHeader,
    pub payload_json: String,
    /// Context snapshot attached by the client layer, if any.
    pub context_json: Option<String>,
}

impl EventMessage {
    pub fn from_payload<T: Serialize>(
        header: EventHeader,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            header,
            payload_json: serde_json::to_string(payload)?,
            context_json: None,
        })
    }

    pub fn with_context(mut self, context_json: String) -> Self {
        self.context_json = Some(context_json);
        self
    }

    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.payload_json)
    }
}
