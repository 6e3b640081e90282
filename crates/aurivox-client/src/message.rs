use aurivox_core::EventMessage;

/// Transport boundary for outbound events. Implementations own wire
/// serialization, queuing, and retry; the core only constructs the
/// message.
pub trait MessageSender: Send + Sync {
    fn send_event(&self, message: EventMessage);
}
