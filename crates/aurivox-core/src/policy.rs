use serde::{Deserialize, Serialize};

/// Coarse resource class a directive occupies while it is being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medium {
    Audio,
    Visual,
    None,
}

/// How far a blocking directive's hold reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockScope {
    /// Blocks every directive that participates in gating.
    All,
    /// Blocks only directives occupying the same medium.
    SameMedium,
}

/// In-process contract between a directive handler and the sequencer.
/// Declared once per [`crate::DirectiveKey`] at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingPolicy {
    pub medium: Medium,
    pub scope: BlockScope,
    /// While a directive with this policy is in flight, later directives
    /// it covers are deferred.
    pub is_blocking: bool,
    /// Whether directives with this policy defer to in-flight blockers at
    /// all. Handlers that manage their own ordering opt out.
    pub is_blocked_by: bool,
}

impl BlockingPolicy {
    pub fn blocking(medium: Medium, scope: BlockScope) -> Self {
        Self {
            medium,
            scope,
            is_blocking: true,
            is_blocked_by: true,
        }
    }

    pub fn non_blocking(medium: Medium) -> Self {
        Self {
            medium,
            scope: BlockScope::SameMedium,
            is_blocking: false,
            is_blocked_by: true,
        }
    }

    /// Neither blocks nor defers; for bookkeeping directives that must
    /// never queue behind audio or visual output.
    pub fn exempt() -> Self {
        Self {
            medium: Medium::None,
            scope: BlockScope::SameMedium,
            is_blocking: false,
            is_blocked_by: false,
        }
    }

    /// Whether an in-flight hold with this policy defers `other`.
    pub fn blocks(&self, other: &BlockingPolicy) -> bool {
        if !self.is_blocking || !other.is_blocked_by {
            return false;
        }
        match self.scope {
            BlockScope::All => true,
            BlockScope::SameMedium => self.medium != Medium::None && self.medium == other.medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockScope, BlockingPolicy, Medium};

    #[test]
    fn block_all_covers_other_mediums() {
        let blocker = BlockingPolicy::blocking(Medium::Audio, BlockScope::All);
        assert!(blocker.blocks(&BlockingPolicy::non_blocking(Medium::Visual)));
        assert!(blocker.blocks(&BlockingPolicy::non_blocking(Medium::Audio)));
        assert!(!blocker.blocks(&BlockingPolicy::exempt()));
    }

    #[test]
    fn same_medium_scope_only_covers_its_own_medium() {
        let blocker = BlockingPolicy::blocking(Medium::Audio, BlockScope::SameMedium);
        assert!(blocker.blocks(&BlockingPolicy::non_blocking(Medium::Audio)));
        assert!(!blocker.blocks(&BlockingPolicy::non_blocking(Medium::Visual)));
    }

    #[test]
    fn non_blocking_policies_never_block() {
        let policy = BlockingPolicy::non_blocking(Medium::Audio);
        assert!(!policy.blocks(&BlockingPolicy::non_blocking(Medium::Audio)));
    }
}
