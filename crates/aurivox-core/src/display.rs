use serde::{Deserialize, Serialize};

/// Display layer categories, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerCategory {
    Alert,
    Call,
    Info,
    Media,
}

impl LayerCategory {
    /// Rank for inter-layer policy decisions; lower rank covers higher
    /// rank.
    pub fn rank(self) -> u8 {
        match self {
            LayerCategory::Alert => 0,
            LayerCategory::Call => 1,
            LayerCategory::Info => 2,
            LayerCategory::Media => 3,
        }
    }

    pub fn covers(self, other: LayerCategory) -> bool {
        self.rank() < other.rank()
    }
}
