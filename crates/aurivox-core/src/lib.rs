pub mod directive;
pub mod display;
pub mod focus;
pub mod message;
pub mod policy;
pub mod session;

pub use directive::{Directive, DirectiveHeader, DirectiveKey};
pub use display::LayerCategory;
pub use focus::{ChannelConfiguration, FocusState};
pub use message::{EventHeader, EventMessage};
pub use policy::{BlockScope, BlockingPolicy, Medium};
pub use session::{InteractionMode, Session};
