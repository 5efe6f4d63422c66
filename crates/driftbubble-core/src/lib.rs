//! DriftBubble Core Library
//!
//! Headless logic for a floating bubble overlay: drag and fling physics,
//! the open/expand/close state machine, gesture policy and paged content
//! dismissal. Rendering, haptics and screen metrics belong to the host.

pub mod config;
pub mod fling;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod input;
pub mod pages;
pub mod widget;

pub use config::{ConfigError, HapticsConfig, LayoutConfig, MotionConfig, PagesConfig, WidgetConfig};
pub use fling::FlingProjection;
pub use gesture::{GestureDisambiguator, GestureKind, SwipeDirection};
pub use host::{AnimationId, AnimationKind, AnimationRequest, HapticIntensity, Host, HostCall, RecordingHost};
pub use input::{GestureState, PanSample, PanTracker, PointerEvent};
pub use pages::{BoundaryOverscroll, CornerRadii, PageBridge};
pub use widget::{FloatingWidget, WidgetError, WidgetEvent, WidgetResult, WidgetState, WidgetStateMachine};
