//! Widget state definitions.

use serde::{Deserialize, Serialize};

/// The discrete presentation state of the floating widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetState {
    /// Small draggable bubble.
    #[default]
    Closed,
    /// Card inset from the safe area.
    Open,
    /// Card covering the whole safe area, pages scrollable.
    Expanded,
}

impl WidgetState {
    /// Check if the widget shows its card (open or expanded).
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open | Self::Expanded)
    }

    /// Check if the widget is expanded.
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded)
    }

    /// Check whether `next` is reachable from this state in one step.
    pub fn can_transition_to(&self, next: WidgetState) -> bool {
        match (self, next) {
            (Self::Closed, Self::Expanded) => false,
            (Self::Expanded, Self::Open) => false,
            _ => true,
        }
    }
}
