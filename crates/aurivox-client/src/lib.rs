//! Client-session layer: capability agents, context assembly, and the
//! top-level [`VoiceClient`] that owns every coordination manager.

pub mod agent;
pub mod client;
pub mod context;
pub mod error;
pub mod message;

pub use agent::{CapabilityAgent, CapabilityKind};
pub use client::{VoiceClient, VoiceClientConfig};
pub use context::{
    ContextManager, ContextSetter, ContextStateProvider, StateRefreshPolicy, StateRequestToken,
};
pub use error::ClientError;
pub use message::MessageSender;
