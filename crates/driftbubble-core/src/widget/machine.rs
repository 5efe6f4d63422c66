//! The widget state machine: drag, fling, open, expand and close.
//!
//! State changes are only applied when the host reports that the animation
//! carrying them has completed. Every request gets a fresh [`AnimationId`];
//! a transition completion is honoured only if it belongs to the most recent
//! transition and the machine is still in the state the transition was
//! launched from. Anything else is a stale callback and is dropped.

use std::collections::HashMap;

use kurbo::{Rect, Vec2};

use super::state::WidgetState;
use super::{WidgetError, WidgetResult};
use crate::config::{HapticsConfig, LayoutConfig, MotionConfig, WidgetConfig};
use crate::fling;
use crate::geometry::{clamp_center, clamp_frame, inset_by, movable_bounds};
use crate::gesture::GestureDisambiguator;
use crate::host::{AnimationId, AnimationKind, AnimationRequest, HapticIntensity, Host};

/// What to do when an animation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    /// Apply `next` if the machine is still in `expected`.
    Transition {
        expected: WidgetState,
        next: WidgetState,
    },
    /// A fling settled; run the bounds correction.
    Settle,
}

/// Owns the widget's discrete state and frame.
#[derive(Debug, Clone)]
pub struct WidgetStateMachine {
    state: WidgetState,
    frame: Rect,
    /// Bubble frame saved when opening, restored when closing.
    original_frame: Option<Rect>,
    gestures: GestureDisambiguator,
    motion: MotionConfig,
    layout: LayoutConfig,
    haptics: HapticsConfig,
    next_id: u64,
    pending: HashMap<AnimationId, Completion>,
    /// Most recent open/expand/close request and the state it targets.
    in_flight: Option<(AnimationId, WidgetState)>,
    dragging: bool,
    /// Whether the drag is currently above the haptic speed threshold.
    fast_drag: bool,
}

impl WidgetStateMachine {
    /// Create a closed widget at the configured initial frame.
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            state: WidgetState::Closed,
            frame: config.layout.initial_frame,
            original_frame: None,
            gestures: GestureDisambiguator::new(),
            motion: config.motion,
            layout: config.layout,
            haptics: config.haptics,
            next_id: 0,
            pending: HashMap::new(),
            in_flight: None,
            dragging: false,
            fast_drag: false,
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// The canonical frame: the latest target handed to the host.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn original_frame(&self) -> Option<Rect> {
        self.original_frame
    }

    pub fn gestures(&self) -> &GestureDisambiguator {
        &self.gestures
    }

    /// The state an in-flight transition will land in, if any.
    pub fn pending_transition(&self) -> Option<WidgetState> {
        self.in_flight.map(|(_, target)| target)
    }

    fn invalid(&self, operation: &'static str) -> WidgetError {
        WidgetError::InvalidTransition {
            operation,
            state: self.state,
        }
    }

    fn set_state(&mut self, state: WidgetState) {
        log::info!("Widget state {:?} -> {:?}", self.state, state);
        self.state = state;
        self.gestures.sync(state.is_open(), state.is_expanded());
    }

    /// Build a request for the current frame with the transition spring.
    fn request(&mut self, kind: AnimationKind, frame: Rect) -> AnimationRequest {
        self.next_id += 1;
        AnimationRequest {
            id: AnimationId(self.next_id),
            kind,
            frame,
            scale: 1.0,
            duration: self.motion.transition_duration,
            damping: self.motion.transition_damping,
            initial_velocity: 0.0,
        }
    }

    /// Hand a request to the host, remembering what its completion means.
    fn dispatch<H: Host>(
        &mut self,
        host: &mut H,
        request: AnimationRequest,
        completion: Option<Completion>,
    ) -> AnimationId {
        self.frame = request.frame;
        if let Some(completion) = completion {
            self.pending.insert(request.id, completion);
        }
        log::debug!("Animate {:?} {:?} -> {:?}", request.id, request.kind, request.frame);
        host.animate(request);
        request.id
    }

    fn dispatch_transition<H: Host>(
        &mut self,
        host: &mut H,
        request: AnimationRequest,
        next: WidgetState,
    ) -> AnimationId {
        let completion = Completion::Transition {
            expected: self.state,
            next,
        };
        let id = self.dispatch(host, request, Some(completion));
        self.in_flight = Some((id, next));
        id
    }

    /// Roll back an open that has not completed yet, so a new drag can take
    /// over the frame.
    fn abort_pending_open<H: Host>(&mut self, host: &mut H) {
        if let Some((id, WidgetState::Open)) = self.in_flight {
            log::debug!("Drag supersedes pending open {:?}", id);
            self.in_flight = None;
            if let Some(original) = self.original_frame.take() {
                self.frame = original;
            }
            host.close();
        }
    }

    /// Start dragging the bubble.
    pub fn begin_drag<H: Host>(&mut self, host: &mut H) -> WidgetResult<()> {
        if self.state != WidgetState::Closed {
            return Err(self.invalid("begin drag"));
        }
        self.abort_pending_open(host);
        if self.in_flight.is_some() {
            return Err(self.invalid("begin drag"));
        }

        self.dragging = true;
        self.fast_drag = false;
        host.notify(HapticIntensity::Light);

        let mut request = self.request(AnimationKind::Grow, self.frame);
        request.scale = self.motion.drag_scale;
        request.duration = self.motion.follow_duration;
        request.damping = 1.0;
        self.dispatch(host, request, None);
        Ok(())
    }

    /// Move the bubble by an incremental translation.
    pub fn update_drag<H: Host>(&mut self, host: &mut H, translation: Vec2) -> WidgetResult<()> {
        if self.state != WidgetState::Closed || self.in_flight.is_some() {
            return Err(self.invalid("update drag"));
        }
        if !translation.is_finite() {
            log::debug!("Ignoring non-finite drag translation {:?}", translation);
            return Ok(());
        }

        let size = self.frame.size();
        let bounds = movable_bounds(host.safe_area(), self.layout.edge_margin);
        let center = clamp_center(self.frame.center() + translation, size, bounds);

        let mut request = self.request(AnimationKind::Follow, Rect::from_center_size(center, size));
        request.scale = if self.dragging { self.motion.drag_scale } else { 1.0 };
        request.duration = self.motion.follow_duration;
        request.damping = 1.0;
        self.dispatch(host, request, None);
        Ok(())
    }

    /// Feed the current drag speed; fires a light haptic when it crosses the
    /// threshold upward.
    pub fn note_drag_speed<H: Host>(&mut self, host: &mut H, speed: f64) {
        if !self.dragging || !speed.is_finite() {
            return;
        }
        let fast = speed >= self.haptics.drag_speed_threshold;
        if fast && !self.fast_drag {
            host.notify(HapticIntensity::Light);
        }
        self.fast_drag = fast;
    }

    /// Release the bubble.
    ///
    /// A stationary release opens the card. Anything faster is a fling that
    /// settles against a horizontal edge.
    pub fn end_drag<H: Host>(&mut self, host: &mut H, velocity: Vec2) -> WidgetResult<()> {
        if self.state != WidgetState::Closed || self.in_flight.is_some() {
            return Err(self.invalid("end drag"));
        }
        self.dragging = false;
        self.fast_drag = false;

        if velocity.hypot() <= self.motion.tap_velocity_epsilon {
            return self.open_view(host);
        }

        let size = self.frame.size();
        let bounds = movable_bounds(host.safe_area(), self.layout.edge_margin);
        let projection = fling::project(
            velocity,
            self.frame.center(),
            size,
            bounds,
            host.screen_size(),
            &self.motion,
        );

        let mut request = self.request(AnimationKind::Settle, Rect::from_center_size(projection.target, size));
        request.duration = projection.duration;
        request.damping = projection.damping;
        request.initial_velocity = projection.initial_velocity;
        self.dispatch(host, request, Some(Completion::Settle));
        Ok(())
    }

    /// Abandon a drag without flinging.
    pub fn cancel_drag<H: Host>(&mut self, host: &mut H) -> WidgetResult<()> {
        if self.state != WidgetState::Closed || !self.dragging {
            return Err(self.invalid("cancel drag"));
        }
        self.dragging = false;
        self.fast_drag = false;
        let mut request = self.request(AnimationKind::Follow, self.frame);
        request.duration = self.motion.follow_duration;
        request.damping = 1.0;
        self.dispatch(host, request, None);
        Ok(())
    }

    /// Pull the bubble back inside the live movable bounds.
    pub fn move_to_bounds<H: Host>(&mut self, host: &mut H) -> WidgetResult<()> {
        if self.state != WidgetState::Closed || self.in_flight.is_some() {
            return Err(self.invalid("move to bounds"));
        }
        let bounds = movable_bounds(host.safe_area(), self.layout.edge_margin);
        let clamped = clamp_frame(self.frame, bounds);
        if clamped == self.frame {
            return Ok(());
        }

        let mut request = self.request(AnimationKind::Correction, clamped);
        request.duration = self.motion.correction_duration;
        request.damping = self.motion.correction_damping;
        self.dispatch(host, request, None);
        Ok(())
    }

    /// Open the bubble into a card inset from the safe area.
    pub fn open_view<H: Host>(&mut self, host: &mut H) -> WidgetResult<()> {
        if self.state != WidgetState::Closed || self.pending_transition() == Some(WidgetState::Open) {
            return Err(self.invalid("open"));
        }
        self.dragging = false;
        if self.original_frame.is_none() {
            self.original_frame = Some(self.frame);
        }

        let target = inset_by(host.safe_area(), self.layout.open_padding_x, self.layout.open_padding_y);
        host.notify(HapticIntensity::Medium);
        host.open();
        let request = self.request(AnimationKind::Open, target);
        self.dispatch_transition(host, request, WidgetState::Open);
        Ok(())
    }

    /// Grow the open card to the full safe area.
    pub fn expand_view<H: Host>(&mut self, host: &mut H) -> WidgetResult<()> {
        if self.state != WidgetState::Open || self.in_flight.is_some() {
            return Err(self.invalid("expand"));
        }

        let target = host.safe_area();
        host.notify(HapticIntensity::Medium);
        host.expand();
        let request = self.request(AnimationKind::Expand, target);
        self.dispatch_transition(host, request, WidgetState::Expanded);
        Ok(())
    }

    /// Return to the bubble, from the card or from an open still in flight.
    pub fn close_view<H: Host>(&mut self, host: &mut H) -> WidgetResult<()> {
        let opening = self.pending_transition() == Some(WidgetState::Open);
        let closing = self.pending_transition() == Some(WidgetState::Closed);
        if closing || (self.state == WidgetState::Closed && !opening) {
            return Err(self.invalid("close"));
        }

        let Some(original) = self.original_frame else {
            log::warn!("Closing from {:?} without a saved frame; forcing closed", self.state);
            self.in_flight = None;
            self.dragging = false;
            self.set_state(WidgetState::Closed);
            host.close();
            host.hide();
            return Ok(());
        };

        host.notify(HapticIntensity::Light);
        host.close();
        let request = self.request(AnimationKind::Close, original);
        self.dispatch_transition(host, request, WidgetState::Closed);
        Ok(())
    }

    /// The paged content was scrolled past its first or last page.
    pub fn on_page_boundary_overscroll<H: Host>(&mut self, host: &mut H) -> WidgetResult<()> {
        if !self.state.is_open() {
            return Err(self.invalid("dismiss"));
        }
        host.notify(HapticIntensity::Heavy);
        self.close_view(host)
    }

    /// The host finished (or abandoned) the animation with this id.
    pub fn on_animation_complete<H: Host>(&mut self, host: &mut H, id: AnimationId) -> WidgetResult<()> {
        if id.0 == 0 || id.0 > self.next_id {
            return Err(WidgetError::UnknownAnimation(id));
        }
        let Some(completion) = self.pending.remove(&id) else {
            return Ok(());
        };

        match completion {
            Completion::Transition { expected, next } => {
                let current = self.in_flight.map(|(latest, _)| latest) == Some(id);
                if !current || self.state != expected {
                    log::debug!("Dropping stale completion {:?} ({:?} -> {:?})", id, expected, next);
                    return Ok(());
                }
                self.in_flight = None;
                self.set_state(next);
                match next {
                    WidgetState::Open => host.show(),
                    WidgetState::Closed => {
                        self.original_frame = None;
                        // Only a card that finished opening showed the button.
                        if expected.is_open() {
                            host.hide();
                        }
                    }
                    WidgetState::Expanded => {}
                }
                Ok(())
            }
            Completion::Settle => {
                if id.0 != self.next_id || self.state != WidgetState::Closed {
                    log::debug!("Dropping superseded settle {:?}", id);
                    return Ok(());
                }
                self.move_to_bounds(host)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use kurbo::Point;

    fn setup() -> (WidgetStateMachine, RecordingHost) {
        let config = WidgetConfig::default();
        (WidgetStateMachine::new(&config), RecordingHost::default())
    }

    fn complete_last(machine: &mut WidgetStateMachine, host: &mut RecordingHost) {
        let id = host.last_animation().unwrap().id;
        machine.on_animation_complete(host, id).unwrap();
    }

    #[test]
    fn test_initial_state() {
        let (machine, _) = setup();
        assert_eq!(machine.state(), WidgetState::Closed);
        assert_eq!(machine.frame(), Rect::new(100.0, 100.0, 180.0, 180.0));
        assert!(machine.original_frame().is_none());
    }

    #[test]
    fn test_tap_to_open() {
        let (mut machine, mut host) = setup();
        machine.end_drag(&mut host, Vec2::ZERO).unwrap();

        assert_eq!(machine.original_frame(), Some(Rect::new(100.0, 100.0, 180.0, 180.0)));
        // Still closed until the animation completes.
        assert_eq!(machine.state(), WidgetState::Closed);

        let request = host.last_animation().unwrap();
        assert_eq!(request.kind, AnimationKind::Open);
        assert_eq!(request.frame, Rect::new(20.0, 40.0, 380.0, 780.0));

        complete_last(&mut machine, &mut host);
        assert_eq!(machine.state(), WidgetState::Open);
        assert!(machine.gestures().is_open());
        assert!(host.calls().contains(&HostCall::ShowClose));
        assert!(host.calls().contains(&HostCall::PagesOpen));
    }

    #[test]
    fn test_tiny_velocity_counts_as_tap() {
        let (mut machine, mut host) = setup();
        machine.end_drag(&mut host, Vec2::new(1e-9, -1e-9)).unwrap();
        assert_eq!(host.last_animation().unwrap().kind, AnimationKind::Open);
    }

    #[test]
    fn test_fling_settles_then_corrects() {
        let (mut machine, mut host) = setup();
        host.safe_area = Rect::new(0.0, 0.0, 400.0, 800.0);
        machine.begin_drag(&mut host).unwrap();
        machine.end_drag(&mut host, Vec2::new(800.0, 0.0)).unwrap();

        let settle = host.last_animation().unwrap();
        assert_eq!(settle.kind, AnimationKind::Settle);
        assert_eq!(settle.frame.center(), Point::new(360.0, 140.0));
        assert!((0.3..=0.6).contains(&settle.duration));
        assert!((0.3..=0.5).contains(&settle.damping));
        assert_eq!(machine.state(), WidgetState::Closed);

        // Safe area shrinks mid-flight; the correction uses the live value.
        host.safe_area = Rect::new(0.0, 0.0, 380.0, 800.0);
        complete_last(&mut machine, &mut host);
        let correction = host.last_animation().unwrap();
        assert_eq!(correction.kind, AnimationKind::Correction);
        assert_eq!(correction.frame, Rect::new(300.0, 100.0, 380.0, 180.0));
        assert!((correction.duration - 0.2).abs() < f64::EPSILON);
        assert!((correction.damping - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_settle_inside_bounds_needs_no_correction() {
        let (mut machine, mut host) = setup();
        machine.end_drag(&mut host, Vec2::new(-800.0, 0.0)).unwrap();
        let settle = host.last_animation().unwrap();
        complete_last(&mut machine, &mut host);
        assert_eq!(host.last_animation().unwrap().id, settle.id);
    }

    #[test]
    fn test_superseded_settle_skips_correction() {
        let (mut machine, mut host) = setup();
        machine.end_drag(&mut host, Vec2::new(800.0, 0.0)).unwrap();
        let settle = host.last_animation().unwrap();
        host.safe_area = Rect::new(0.0, 0.0, 300.0, 800.0);
        machine.begin_drag(&mut host).unwrap();
        let grow = host.last_animation().unwrap();

        machine.on_animation_complete(&mut host, settle.id).unwrap();
        assert_eq!(host.last_animation().unwrap().id, grow.id);
    }

    #[test]
    fn test_drag_follows_and_clamps() {
        let (mut machine, mut host) = setup();
        machine.begin_drag(&mut host).unwrap();
        let grow = host.last_animation().unwrap();
        assert_eq!(grow.kind, AnimationKind::Grow);
        assert!((grow.scale - 1.1).abs() < f64::EPSILON);

        machine.update_drag(&mut host, Vec2::new(50.0, 10.0)).unwrap();
        assert_eq!(machine.frame(), Rect::new(150.0, 110.0, 230.0, 190.0));

        machine.update_drag(&mut host, Vec2::new(-1000.0, -1000.0)).unwrap();
        assert_eq!(machine.frame(), Rect::new(0.0, 20.0, 80.0, 100.0));
        assert_eq!(machine.state(), WidgetState::Closed);
    }

    #[test]
    fn test_non_finite_translation_ignored() {
        let (mut machine, mut host) = setup();
        machine.update_drag(&mut host, Vec2::new(f64::NAN, 0.0)).unwrap();
        assert_eq!(machine.frame(), Rect::new(100.0, 100.0, 180.0, 180.0));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_nan_fling_stays_put() {
        let (mut machine, mut host) = setup();
        machine.end_drag(&mut host, Vec2::new(f64::NAN, 3.0)).unwrap();
        let settle = host.last_animation().unwrap();
        assert_eq!(settle.kind, AnimationKind::Settle);
        assert_eq!(settle.frame, Rect::new(100.0, 100.0, 180.0, 180.0));
        assert!(settle.initial_velocity.abs() < f64::EPSILON);
    }

    #[test]
    fn test_drag_speed_haptic_fires_on_crossing() {
        let (mut machine, mut host) = setup();
        machine.begin_drag(&mut host).unwrap();
        machine.note_drag_speed(&mut host, 100.0);
        machine.note_drag_speed(&mut host, 2000.0);
        machine.note_drag_speed(&mut host, 2500.0);
        machine.note_drag_speed(&mut host, 100.0);
        machine.note_drag_speed(&mut host, 1600.0);
        assert_eq!(host.haptics(), vec![HapticIntensity::Light; 3]);
    }

    #[test]
    fn test_expand_and_close() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);

        machine.expand_view(&mut host).unwrap();
        assert_eq!(machine.state(), WidgetState::Open);
        assert_eq!(host.last_animation().unwrap().frame, host.safe_area);
        complete_last(&mut machine, &mut host);
        assert_eq!(machine.state(), WidgetState::Expanded);
        assert!(machine.gestures().is_expanded());

        machine.close_view(&mut host).unwrap();
        assert_eq!(host.last_animation().unwrap().frame, Rect::new(100.0, 100.0, 180.0, 180.0));
        complete_last(&mut machine, &mut host);
        assert_eq!(machine.state(), WidgetState::Closed);
        assert!(machine.original_frame().is_none());
        assert!(!machine.gestures().is_open());
        assert!(!machine.gestures().is_expanded());
        assert!(host.calls().contains(&HostCall::HideClose));
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let (mut machine, mut host) = setup();
        assert!(matches!(
            machine.expand_view(&mut host),
            Err(WidgetError::InvalidTransition { state: WidgetState::Closed, .. })
        ));
        assert!(machine.on_page_boundary_overscroll(&mut host).is_err());
        assert!(host.calls().is_empty());

        machine.open_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);
        assert!(machine.begin_drag(&mut host).is_err());
        assert!(machine.update_drag(&mut host, Vec2::new(1.0, 1.0)).is_err());
        assert!(machine.open_view(&mut host).is_err());
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);
        machine.close_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);

        let before = host.calls().len();
        assert!(machine.close_view(&mut host).is_err());
        assert_eq!(host.calls().len(), before);
        assert_eq!(machine.state(), WidgetState::Closed);
    }

    #[test]
    fn test_double_close_while_closing() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);
        machine.close_view(&mut host).unwrap();
        let before = host.calls().len();
        assert!(machine.close_view(&mut host).is_err());
        assert_eq!(host.calls().len(), before);
    }

    #[test]
    fn test_close_supersedes_pending_open() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        let open = host.last_animation().unwrap();
        machine.close_view(&mut host).unwrap();
        let close = host.last_animation().unwrap();

        // The stale open completion must not move the widget to Open.
        machine.on_animation_complete(&mut host, open.id).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);
        assert!(machine.original_frame().is_some());

        machine.on_animation_complete(&mut host, close.id).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);
        assert!(machine.original_frame().is_none());
        assert!(!host.calls().contains(&HostCall::ShowClose));
        assert!(!host.calls().contains(&HostCall::HideClose));
    }

    #[test]
    fn test_close_supersedes_pending_expand() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);
        machine.expand_view(&mut host).unwrap();
        let expand = host.last_animation().unwrap();
        machine.close_view(&mut host).unwrap();
        let close = host.last_animation().unwrap();

        machine.on_animation_complete(&mut host, expand.id).unwrap();
        assert_eq!(machine.state(), WidgetState::Open);
        assert!(!machine.gestures().is_expanded());

        machine.on_animation_complete(&mut host, close.id).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);
        assert!(!machine.gestures().is_open());
        assert_eq!(machine.frame(), Rect::new(100.0, 100.0, 180.0, 180.0));
        assert_eq!(host.calls().last(), Some(&HostCall::HideClose));
    }

    #[test]
    fn test_reopen_during_close_keeps_saved_frame() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        machine.close_view(&mut host).unwrap();
        let close = host.last_animation().unwrap();
        machine.open_view(&mut host).unwrap();
        let reopen = host.last_animation().unwrap();

        assert_eq!(machine.original_frame(), Some(Rect::new(100.0, 100.0, 180.0, 180.0)));
        machine.on_animation_complete(&mut host, close.id).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);
        machine.on_animation_complete(&mut host, reopen.id).unwrap();
        assert_eq!(machine.state(), WidgetState::Open);
    }

    #[test]
    fn test_drag_supersedes_pending_open() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        let open = host.last_animation().unwrap();
        machine.begin_drag(&mut host).unwrap();

        assert!(machine.original_frame().is_none());
        assert_eq!(machine.frame(), Rect::new(100.0, 100.0, 180.0, 180.0));
        machine.on_animation_complete(&mut host, open.id).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);
    }

    #[test]
    fn test_missing_original_frame_forces_closed() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);
        machine.original_frame = None;
        let animations = host.animations().len();

        machine.close_view(&mut host).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);
        assert_eq!(host.animations().len(), animations);
        assert!(!machine.gestures().is_open());
        assert!(machine.pending_transition().is_none());
    }

    #[test]
    fn test_boundary_overscroll_closes() {
        let (mut machine, mut host) = setup();
        machine.open_view(&mut host).unwrap();
        complete_last(&mut machine, &mut host);
        machine.on_page_boundary_overscroll(&mut host).unwrap();
        assert_eq!(host.last_animation().unwrap().kind, AnimationKind::Close);
        assert!(host.haptics().contains(&HapticIntensity::Heavy));
        complete_last(&mut machine, &mut host);
        assert_eq!(machine.state(), WidgetState::Closed);
    }

    #[test]
    fn test_unknown_animation_id() {
        let (mut machine, mut host) = setup();
        assert_eq!(
            machine.on_animation_complete(&mut host, AnimationId(42)),
            Err(WidgetError::UnknownAnimation(AnimationId(42)))
        );
    }

    #[test]
    fn test_reachability_over_random_walk() {
        let (mut machine, mut host) = setup();
        let mut previous = machine.state();
        for step in 0..60u32 {
            let _ = match step % 5 {
                0 => machine.open_view(&mut host),
                1 => machine.expand_view(&mut host),
                2 => machine.close_view(&mut host),
                3 => machine.end_drag(&mut host, Vec2::new(300.0, 40.0)),
                _ => machine.begin_drag(&mut host),
            };
            if step % 2 == 0 {
                if let Some(last) = host.last_animation() {
                    let _ = machine.on_animation_complete(&mut host, last.id);
                }
            }
            let current = machine.state();
            assert!(previous.can_transition_to(current), "{:?} -> {:?}", previous, current);
            if current.is_open() {
                assert!(machine.original_frame().is_some());
            }
            previous = current;
        }
    }
}
