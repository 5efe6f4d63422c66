//! Host collaborator interfaces.
//!
//! The widget never renders, vibrates or measures the screen itself. It asks
//! the host through these traits and gets animation completions back as
//! events.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::pages::CornerRadii;

/// Identifier of an issued animation request.
///
/// Ids increase monotonically for the lifetime of a widget, so a larger id
/// always supersedes a smaller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

/// What an animation request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Scale-up affordance when a drag begins.
    Grow,
    /// Track the finger during a drag.
    Follow,
    /// Spring to a fling's resting point.
    Settle,
    /// Pull the bubble back inside the live bounds after a settle.
    Correction,
    Open,
    Expand,
    Close,
}

/// A request for the host to animate the widget's frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub id: AnimationId,
    pub kind: AnimationKind,
    /// Target frame in screen coordinates.
    pub frame: Rect,
    /// Target scale transform, applied around the frame center.
    pub scale: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Spring damping ratio.
    pub damping: f64,
    /// Initial spring velocity.
    pub initial_velocity: f64,
}

/// Strength of a haptic tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HapticIntensity {
    Light,
    Medium,
    Heavy,
}

/// Screen metrics. Queried fresh on every operation, never cached.
pub trait GeometryProvider {
    /// Region of the screen not covered by system chrome.
    fn safe_area(&self) -> Rect;

    /// Full screen size.
    fn screen_size(&self) -> Size;
}

/// Receives animation requests.
///
/// The host must later report completion of each request through
/// `FloatingWidget::on_animation_complete` with the request's id.
pub trait AnimationSink {
    fn animate(&mut self, request: AnimationRequest);
}

/// Fire-and-forget haptic feedback.
pub trait HapticSink {
    fn notify(&mut self, intensity: HapticIntensity);
}

/// The paged view hosted inside the open card.
pub trait PagedContent {
    fn open(&mut self);

    /// The card went full screen; paging scroll becomes available.
    fn expand(&mut self);

    /// The card is closing; paging scroll is disabled.
    fn close(&mut self);

    /// Rubber-band corner radii of the first and last pages.
    fn set_corner_radii(&mut self, radii: CornerRadii);
}

/// The close button shown over the open card.
pub trait CloseAffordance {
    fn show(&mut self);
    fn hide(&mut self);
}

/// Everything the widget needs from its host.
pub trait Host: GeometryProvider + AnimationSink + HapticSink + PagedContent + CloseAffordance {}

impl<T> Host for T where T: GeometryProvider + AnimationSink + HapticSink + PagedContent + CloseAffordance {}

/// A single call made by the widget on its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCall {
    Animate(AnimationRequest),
    Haptic { intensity: HapticIntensity },
    PagesOpen,
    PagesExpand,
    PagesClose,
    PageCorners { first: f64, last: f64 },
    ShowClose,
    HideClose,
}

/// In-memory host that records every call, for testing and headless replay.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub safe_area: Rect,
    pub screen_size: Size,
    calls: Vec<HostCall>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new(Size::new(400.0, 800.0), Rect::new(0.0, 20.0, 400.0, 800.0))
    }
}

impl RecordingHost {
    /// Create a host with the given screen size and safe area.
    pub fn new(screen_size: Size, safe_area: Rect) -> Self {
        Self {
            safe_area,
            screen_size,
            calls: Vec::new(),
        }
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Recorded animation requests, in order.
    pub fn animations(&self) -> Vec<AnimationRequest> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Animate(request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    /// The most recent animation request.
    pub fn last_animation(&self) -> Option<AnimationRequest> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::Animate(request) => Some(*request),
            _ => None,
        })
    }

    /// Recorded haptic intensities, in order.
    pub fn haptics(&self) -> Vec<HapticIntensity> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Haptic { intensity } => Some(*intensity),
                _ => None,
            })
            .collect()
    }
}

impl GeometryProvider for RecordingHost {
    fn safe_area(&self) -> Rect {
        self.safe_area
    }

    fn screen_size(&self) -> Size {
        self.screen_size
    }
}

impl AnimationSink for RecordingHost {
    fn animate(&mut self, request: AnimationRequest) {
        self.calls.push(HostCall::Animate(request));
    }
}

impl HapticSink for RecordingHost {
    fn notify(&mut self, intensity: HapticIntensity) {
        self.calls.push(HostCall::Haptic { intensity });
    }
}

impl PagedContent for RecordingHost {
    fn open(&mut self) {
        self.calls.push(HostCall::PagesOpen);
    }

    fn expand(&mut self) {
        self.calls.push(HostCall::PagesExpand);
    }

    fn close(&mut self) {
        self.calls.push(HostCall::PagesClose);
    }

    fn set_corner_radii(&mut self, radii: CornerRadii) {
        self.calls.push(HostCall::PageCorners {
            first: radii.first,
            last: radii.last,
        });
    }
}

impl CloseAffordance for RecordingHost {
    fn show(&mut self) {
        self.calls.push(HostCall::ShowClose);
    }

    fn hide(&mut self) {
        self.calls.push(HostCall::HideClose);
    }
}
