//! Events the host feeds into the widget.

use serde::{Deserialize, Serialize};

use crate::gesture::{GestureKind, SwipeDirection};
use crate::host::AnimationId;
use crate::input::{PanSample, PointerEvent};

/// An input or completion event for the widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// Raw pointer input, run through the built-in recognizers.
    Pointer { event: PointerEvent },
    /// A pan sample from a host-side recognizer.
    Pan(PanSample),
    Tap,
    Swipe { direction: SwipeDirection },
    /// Scroll position sample of the paged content.
    PageScroll { offset_y: f64 },
    /// The user let go of the paged content.
    PageRelease { velocity_y: f64 },
    /// The close affordance was activated.
    CloseRequested,
    AnimationComplete { id: AnimationId },
}

impl WidgetEvent {
    /// Gesture kind this event asks to begin, if it is a gesture at all.
    pub fn gesture_kind(&self) -> Option<GestureKind> {
        match self {
            Self::Pan(_) => Some(GestureKind::Pan),
            Self::Tap => Some(GestureKind::Tap),
            Self::Swipe { .. } => Some(GestureKind::Swipe),
            _ => None,
        }
    }
}
