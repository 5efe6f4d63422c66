//! The floating widget: its discrete state, the state machine driving it
//! and the event dispatcher in front of both.
//!
//! Input flows one way: events enter through [`FloatingWidget`], pass the
//! gesture policy, reach [`WidgetStateMachine`] and leave as host calls.

mod event;
mod floating;
mod machine;
mod state;

pub use event::WidgetEvent;
pub use floating::FloatingWidget;
pub use machine::WidgetStateMachine;
pub use state::WidgetState;

use crate::gesture::GestureKind;
use crate::host::AnimationId;
use thiserror::Error;

/// Reasons an operation was not carried out.
///
/// None of these are fatal: gestures legitimately race with animation
/// completions, so the dispatcher logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("Cannot {operation} while {state:?}")]
    InvalidTransition {
        operation: &'static str,
        state: WidgetState,
    },
    #[error("Gesture rejected: {0:?}")]
    GestureRejected(GestureKind),
    #[error("Unknown animation: {0:?}")]
    UnknownAnimation(AnimationId),
}

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
