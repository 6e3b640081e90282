use aurivox_core::DirectiveKey;

/// Telemetry events emitted by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    /// No handler is registered for the directive's key.
    Dropped {
        key: DirectiveKey,
        message_id: String,
        dialog_request_id: String,
        reason: String,
    },
    Completed {
        key: DirectiveKey,
        message_id: String,
        dialog_request_id: String,
    },
    Failed {
        key: DirectiveKey,
        message_id: String,
        dialog_request_id: String,
        reason: String,
    },
    Cancelled {
        key: DirectiveKey,
        message_id: String,
        dialog_request_id: String,
    },
}
