use aurivox_core::{BlockingPolicy, DirectiveKey};
use aurivox_dialog::dispatch::DirectiveHandler;

use crate::context::ContextStateProvider;

/// The closed set of capability variants a client can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    Asr,
    Tts,
    Display,
    AudioPlayer,
    System,
}

/// Contract every capability agent fulfils: it handles its directives
/// and provides its context state. Registration wires both sides into
/// the client in one step.
pub trait CapabilityAgent: DirectiveHandler + ContextStateProvider {
    fn kind(&self) -> CapabilityKind;
    /// Namespace the agent answers for, e.g. `SpeechSynthesizer`.
    fn interface_name(&self) -> &str;
    /// Directive keys the agent owns and the blocking policy of each.
    fn directive_bindings(&self) -> Vec<(DirectiveKey, BlockingPolicy)>;
}
