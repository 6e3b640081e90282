//! Wires stub capability agents through the full dispatch path: a
//! blocking Speak directive and a RenderCard directive arrive in one
//! batch for the same dialog turn, the card waits for the speech to
//! finish, and the resulting event carries a context snapshot.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aurivox_client::{
    CapabilityAgent, CapabilityKind, ContextSetter, ContextStateProvider, MessageSender,
    StateRequestToken, VoiceClient, VoiceClientConfig,
};
use aurivox_core::focus::{CHANNEL_DIALOG, FocusState};
use aurivox_core::{
    BlockScope, BlockingPolicy, Directive, DirectiveHeader, DirectiveKey, EventHeader,
    EventMessage, Medium,
};
use aurivox_dialog::dispatch::{DirectiveHandler, DirectiveResultHandle};
use aurivox_dialog::focus::{FocusManagerHandle, FocusObserver};
use aurivox_dialog::input::InputProcessor;

#[derive(Deserialize)]
struct SpeakPayload {
    text: String,
}

#[derive(Deserialize)]
struct RenderCardPayload {
    title: String,
}

struct LoggingSender;

impl MessageSender for LoggingSender {
    fn send_event(&self, message: EventMessage) {
        info!(
            event = %format!("{}.{}", message.header.namespace, message.header.name),
            payload = %message.payload_json,
            context = message.context_json.as_deref().unwrap_or("-"),
            "outbound event"
        );
    }
}

struct LoggingObserver {
    interface: &'static str,
}

impl FocusObserver for LoggingObserver {
    fn on_focus_changed(&self, channel: &str, state: FocusState) {
        info!(interface = self.interface, channel, ?state, "focus changed");
    }
}

struct SpeakerAgent {
    focus: FocusManagerHandle,
}

impl DirectiveHandler for SpeakerAgent {
    fn pre_handle_directive(&self, directive: &Directive) {
        info!(message_id = directive.message_id(), "speak pre-handled");
    }

    fn handle_directive(&self, directive: &Directive, result: DirectiveResultHandle) {
        let payload: SpeakPayload = match directive.payload() {
            Ok(payload) => payload,
            Err(e) => {
                result.set_failed(format!("malformed speak payload: {e}"));
                return;
            }
        };
        let observer: Arc<dyn FocusObserver> = Arc::new(LoggingObserver {
            interface: "SpeechSynthesizer",
        });
        let focus = self.focus.clone();
        aurivox_runtime::spawn(async move {
            match focus
                .acquire_channel_async(CHANNEL_DIALOG, Arc::clone(&observer), "SpeechSynthesizer")
                .await
            {
                Ok(true) => {}
                _ => {
                    result.set_failed("dialog channel unavailable");
                    return;
                }
            }
            info!(text = %payload.text, "speaking");
            tokio::time::sleep(Duration::from_millis(150)).await;
            let _ = focus.release_channel(CHANNEL_DIALOG, &observer).await;
            result.set_completed();
        });
    }

    fn cancel_directive(&self, directive: &Directive) {
        info!(message_id = directive.message_id(), "speak cancelled");
    }
}

impl ContextStateProvider for SpeakerAgent {
    fn provide_state(&self, setter: Arc<dyn ContextSetter>, token: StateRequestToken) {
        setter.set_state(token, Some(r#"{"state":"idle"}"#.to_string()));
    }
}

impl CapabilityAgent for SpeakerAgent {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Tts
    }

    fn interface_name(&self) -> &str {
        "SpeechSynthesizer"
    }

    fn directive_bindings(&self) -> Vec<(DirectiveKey, BlockingPolicy)> {
        vec![(
            DirectiveKey::new("SpeechSynthesizer", "Speak"),
            BlockingPolicy::blocking(Medium::Audio, BlockScope::All),
        )]
    }
}

struct CardAgent;

impl DirectiveHandler for CardAgent {
    fn pre_handle_directive(&self, directive: &Directive) {
        info!(message_id = directive.message_id(), "card pre-handled");
    }

    fn handle_directive(&self, directive: &Directive, result: DirectiveResultHandle) {
        match directive.payload::<RenderCardPayload>() {
            Ok(payload) => {
                info!(title = %payload.title, "card rendered");
                result.set_completed();
            }
            Err(e) => result.set_failed(format!("malformed card payload: {e}")),
        }
    }

    fn cancel_directive(&self, directive: &Directive) {
        info!(message_id = directive.message_id(), "card cancelled");
    }
}

impl ContextStateProvider for CardAgent {
    fn provide_state(&self, setter: Arc<dyn ContextSetter>, token: StateRequestToken) {
        setter.set_state(token, Some(r#"{"visible":false}"#.to_string()));
    }
}

impl CapabilityAgent for CardAgent {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Display
    }

    fn interface_name(&self) -> &str {
        "Display"
    }

    fn directive_bindings(&self) -> Vec<(DirectiveKey, BlockingPolicy)> {
        vec![(
            DirectiveKey::new("Display", "RenderCard"),
            BlockingPolicy::non_blocking(Medium::Visual),
        )]
    }
}

struct DemoProcessor;

impl InputProcessor for DemoProcessor {
    fn on_receive_directives(&self, dialog_request_id: &str, directives: &[Directive]) {
        info!(dialog_request_id, count = directives.len(), "response received");
    }

    fn on_response_timeout(&self, dialog_request_id: &str) {
        info!(dialog_request_id, "response timed out");
    }
}

fn directive(namespace: &str, name: &str, message_id: &str, payload: &str) -> Directive {
    Directive {
        header: DirectiveHeader {
            namespace: namespace.to_string(),
            name: name.to_string(),
            message_id: message_id.to_string(),
            dialog_request_id: "dlg-demo-1".to_string(),
        },
        payload_json: payload.to_string(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = VoiceClient::start(VoiceClientConfig::default(), Arc::new(LoggingSender))?;
    client.register_agent(Arc::new(SpeakerAgent {
        focus: client.focus_manager().clone(),
    }))?;
    client.register_agent(Arc::new(CardAgent))?;

    client.on_dialog_requested(Arc::new(DemoProcessor), "dlg-demo-1")?;
    client.on_directives(vec![
        directive(
            "SpeechSynthesizer",
            "Speak",
            "msg-1",
            r#"{"text":"the weather today is sunny"}"#,
        ),
        directive("Display", "RenderCard", "msg-2", r#"{"title":"Weather"}"#),
    ])?;

    std::thread::sleep(Duration::from_millis(500));

    client.send_event(EventMessage {
        header: EventHeader {
            namespace: "System".to_string(),
            name: "SynchronizeState".to_string(),
            message_id: "evt-1".to_string(),
            dialog_request_id: None,
            referrer_dialog_request_id: None,
        },
        payload_json: "{}".to_string(),
        context_json: None,
    })?;

    client.shutdown()?;
    Ok(())
}
