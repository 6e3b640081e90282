use serde::{Deserialize, Serialize};

/// Focus level an observer holds on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FocusState {
    /// The channel is idle for this observer.
    #[default]
    None,
    /// Held, but outranked by a foreground channel.
    Background,
    /// Exclusive output access.
    Foreground,
}

/// One row of the focus channel table.
///
/// Priority direction is a deployment decision; this table encodes
/// lower-value-wins, and every comparison in the SDK goes through
/// [`ChannelConfiguration::outranks`] so the direction lives here only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfiguration {
    pub name: String,
    pub priority: u32,
}

impl ChannelConfiguration {
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }

    pub fn outranks(&self, other: &ChannelConfiguration) -> bool {
        self.priority < other.priority
    }
}

pub const CHANNEL_CALL: &str = "call";
pub const CHANNEL_ALERTS: &str = "alerts";
pub const CHANNEL_DIALOG: &str = "dialog";
pub const CHANNEL_CONTENT: &str = "content";

/// Default channel table: call > alerts > dialog > content.
pub fn default_channels() -> Vec<ChannelConfiguration> {
    vec![
        ChannelConfiguration::new(CHANNEL_CALL, 100),
        ChannelConfiguration::new(CHANNEL_ALERTS, 200),
        ChannelConfiguration::new(CHANNEL_DIALOG, 300),
        ChannelConfiguration::new(CHANNEL_CONTENT, 400),
    ]
}
