//=========================================================================
// Core Errors
//=========================================================================
//
// Contract violations detected by the simulation core.
//
// Every variant describes a caller bug, not a runtime condition. The
// default APIs panic with the variant's message; the `try_*` twins hand
// the value back so tests and tools can inspect it.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== CoreError ===========================================================

/// Precondition violations raised by the scene graph, command queue,
/// state stack and resource holders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `detach` was asked for a node that is not a direct child.
    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: String, child: String },

    /// `attach` was handed a node that still has a parent.
    #[error("node {0} is already attached; detach it first")]
    AlreadyAttached(String),

    /// `attach` would make a node its own ancestor.
    #[error("attaching node {child} under {parent} would create a cycle")]
    WouldCycle { parent: String, child: String },

    /// A node key no longer refers to a live node.
    #[error("node {0} does not exist in this scene graph")]
    UnknownNode(String),

    /// `pop` was called on an empty command queue.
    #[error("pop from an empty command queue")]
    EmptyCommandQueue,

    /// A push was requested for a state without a registered factory.
    #[error("no factory registered for state {0}")]
    UnregisteredState(String),

    /// A pop was requested while no state is live.
    #[error("pop requested on an empty state stack")]
    EmptyStateStack,

    /// A resource holder was asked for an id it never received.
    #[error("resource {0} was never loaded")]
    MissingResource(String),

    /// A typed command matched a node of the wrong variant.
    #[error("command expected a {expected} node but reached a {found} node")]
    TargetMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Convenience alias for results carrying a [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = CoreError::UnregisteredState("Pause".into());
        assert_eq!(err.to_string(), "no factory registered for state Pause");

        let err = CoreError::TargetMismatch {
            expected: "aircraft",
            found: "sprite",
        };
        assert!(err.to_string().contains("aircraft"));
        assert!(err.to_string().contains("sprite"));
    }
}
