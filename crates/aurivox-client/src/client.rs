use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use aurivox_core::{Directive, EventMessage};
use aurivox_dialog::dispatch::{
    DirectiveSequencerHandle, DispatchConfig, start_directive_sequencer,
};
use aurivox_dialog::display::InterLayerDisplayPolicyManager;
use aurivox_dialog::focus::{FocusConfig, FocusManagerHandle, start_focus_manager};
use aurivox_dialog::input::{
    InputConfig, InputProcessor, InputProcessorManagerHandle, start_input_processor_manager,
};
use aurivox_dialog::session::{InteractionControlManager, SessionManager};
use aurivox_dialog::sync::{PlaySynchronizerHandle, SyncConfig, start_play_synchronizer};

use crate::agent::CapabilityAgent;
use crate::context::ContextManager;
use crate::error::ClientError;
use crate::message::MessageSender;

#[derive(Clone)]
pub struct VoiceClientConfig {
    pub focus: FocusConfig,
    pub sync: SyncConfig,
    pub input: InputConfig,
    pub dispatch: DispatchConfig,
    pub context_timeout: Duration,
}

impl Default for VoiceClientConfig {
    fn default() -> Self {
        Self {
            focus: FocusConfig::default(),
            sync: SyncConfig::default(),
            input: InputConfig::default(),
            dispatch: DispatchConfig::default(),
            context_timeout: Duration::from_secs(2),
        }
    }
}

/// Owns one live client session: every manager is constructed here on
/// `start` and stopped on `shutdown`. There are no process-wide
/// singletons; dropping the client after shutdown releases everything.
pub struct VoiceClient {
    focus: FocusManagerHandle,
    synchronizer: PlaySynchronizerHandle,
    input: InputProcessorManagerHandle,
    sequencer: DirectiveSequencerHandle,
    sessions: Arc<SessionManager>,
    interaction: Arc<InteractionControlManager>,
    display: Arc<InterLayerDisplayPolicyManager>,
    context: Arc<ContextManager>,
    message_sender: Arc<dyn MessageSender>,
    context_timeout: Duration,
}

impl VoiceClient {
    pub fn start(
        config: VoiceClientConfig,
        message_sender: Arc<dyn MessageSender>,
    ) -> Result<Self, ClientError> {
        let focus = start_focus_manager(config.focus.clone())?;
        let synchronizer = start_play_synchronizer(config.sync.clone())?;
        let input = start_input_processor_manager(config.input.clone())?;
        let sequencer = start_directive_sequencer(config.dispatch.clone())?;
        info!("voice client started");
        Ok(Self {
            focus,
            synchronizer,
            input,
            sequencer,
            sessions: Arc::new(SessionManager::new()),
            interaction: Arc::new(InteractionControlManager::new()),
            display: Arc::new(InterLayerDisplayPolicyManager::new()),
            context: Arc::new(ContextManager::new()),
            message_sender,
            context_timeout: config.context_timeout,
        })
    }

    /// Wires an agent into the client: its directive bindings into the
    /// handler registry and the agent as a context provider.
    pub fn register_agent<A>(&self, agent: Arc<A>) -> Result<(), ClientError>
    where
        A: CapabilityAgent + 'static,
    {
        let interface_name = agent.interface_name().to_string();
        let handler: Arc<dyn aurivox_dialog::dispatch::DirectiveHandler> = agent.clone();
        let provider: Arc<dyn crate::context::ContextStateProvider> = agent.clone();
        self.sequencer
            .registry()
            .register_bindings(agent.directive_bindings(), handler)?;
        self.context.register_provider(&interface_name, provider);
        info!(interface = %interface_name, "capability agent registered");
        Ok(())
    }

    /// Records an outstanding dialog request so its response (or
    /// timeout) can be delivered to `processor`.
    pub fn on_dialog_requested(
        &self,
        processor: Arc<dyn InputProcessor>,
        dialog_request_id: &str,
    ) -> Result<(), ClientError> {
        self.input.on_requested(processor, dialog_request_id)?;
        Ok(())
    }

    /// Inbound directive batch from the transport: resolves pending
    /// dialog requests first, then feeds the sequencer.
    pub fn on_directives(&self, directives: Vec<Directive>) -> Result<(), ClientError> {
        self.input.on_post_processed(directives.clone())?;
        self.sequencer.on_directives(directives)?;
        Ok(())
    }

    /// Barge-in: aborts dispatch of the turn and force-releases its
    /// synchronize objects.
    pub fn cancel_dialog(&self, dialog_request_id: &str) -> Result<(), ClientError> {
        self.sequencer.cancel_dialog(dialog_request_id)?;
        self.synchronizer.cancel_sync(dialog_request_id)?;
        Ok(())
    }

    /// Attaches the assembled context snapshot and hands the event to
    /// the transport.
    pub fn send_event(&self, message: EventMessage) -> Result<(), ClientError> {
        let context = self.context.get_context(self.context_timeout)?;
        self.message_sender.send_event(message.with_context(context));
        Ok(())
    }

    pub fn focus_manager(&self) -> &FocusManagerHandle {
        &self.focus
    }

    pub fn play_synchronizer(&self) -> &PlaySynchronizerHandle {
        &self.synchronizer
    }

    pub fn input_manager(&self) -> &InputProcessorManagerHandle {
        &self.input
    }

    pub fn directive_sequencer(&self) -> &DirectiveSequencerHandle {
        &self.sequencer
    }

    pub fn session_manager(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub fn interaction_manager(&self) -> &Arc<InteractionControlManager> {
        &self.interaction
    }

    pub fn display_manager(&self) -> &Arc<InterLayerDisplayPolicyManager> {
        &self.display
    }

    pub fn context_manager(&self) -> &Arc<ContextManager> {
        &self.context
    }

    /// Stops every manager actor. Pending deadlines are disarmed with
    /// the input manager's state; in-flight directives are abandoned.
    pub fn shutdown(&self) -> Result<(), ClientError> {
        self.sequencer.shutdown()?;
        self.input.shutdown()?;
        self.synchronizer.shutdown()?;
        self.focus.shutdown()?;
        info!("voice client stopped");
        Ok(())
    }
}
