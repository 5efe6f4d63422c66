//! Event dispatch in front of the state machine.

use kurbo::Rect;

use super::event::WidgetEvent;
use super::machine::WidgetStateMachine;
use super::state::WidgetState;
use super::{WidgetError, WidgetResult};
use crate::config::WidgetConfig;
use crate::gesture::SwipeDirection;
use crate::host::{AnimationId, Host};
use crate::input::{GestureState, PanSample, PanTracker, PointerEvent, Recognized, classify_swipe};
use crate::pages::{CornerRadii, PageBridge};

/// A floating bubble widget bound to its host.
///
/// Every event goes through [`FloatingWidget::handle_event`]. Gestures are
/// first checked against the gesture policy, then handed to the state
/// machine; page events go through the page bridge.
pub struct FloatingWidget<H: Host> {
    host: H,
    machine: WidgetStateMachine,
    pages: PageBridge,
    tracker: PanTracker,
    /// Whether the current pan was admitted at its start.
    pan_active: bool,
    /// Last corner radii pushed to the paged content.
    corner_radii: CornerRadii,
}

impl<H: Host> FloatingWidget<H> {
    /// Create a closed widget.
    pub fn new(host: H, config: &WidgetConfig) -> Self {
        let machine = WidgetStateMachine::new(config);
        let pages = PageBridge::new(&config.pages, machine.frame().height());
        Self {
            host,
            machine,
            pages,
            tracker: PanTracker::new(),
            pan_active: false,
            corner_radii: CornerRadii::default(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn machine(&self) -> &WidgetStateMachine {
        &self.machine
    }

    pub fn pages(&self) -> &PageBridge {
        &self.pages
    }

    pub fn state(&self) -> WidgetState {
        self.machine.state()
    }

    pub fn frame(&self) -> Rect {
        self.machine.frame()
    }

    /// Handle an event. Rejections are logged, never surfaced.
    pub fn handle_event(&mut self, event: WidgetEvent) {
        if let Err(e) = self.try_handle_event(event) {
            log::debug!("Ignored {:?}: {}", event, e);
        }
    }

    /// Handle an event, reporting why it had no effect.
    pub fn try_handle_event(&mut self, event: WidgetEvent) -> WidgetResult<()> {
        let result = self.dispatch(event);
        // Pages are always as tall as the widget.
        self.pages.set_page_height(self.machine.frame().height());
        result
    }

    /// Report completion of an animation request.
    pub fn on_animation_complete(&mut self, id: AnimationId) -> WidgetResult<()> {
        self.machine.on_animation_complete(&mut self.host, id)
    }

    fn dispatch(&mut self, event: WidgetEvent) -> WidgetResult<()> {
        if let Some(kind) = event.gesture_kind() {
            if !self.machine.gestures().admits(kind) {
                return Err(WidgetError::GestureRejected(kind));
            }
        }
        match event {
            WidgetEvent::Pointer { event } => match self.recognize(event) {
                Some(recognized) => self.dispatch(recognized),
                None => Ok(()),
            },
            WidgetEvent::Pan(sample) => self.handle_pan(sample),
            WidgetEvent::Tap => self.machine.open_view(&mut self.host),
            WidgetEvent::Swipe { direction } => match direction {
                SwipeDirection::Up => self.machine.expand_view(&mut self.host),
                SwipeDirection::Down => self.machine.close_view(&mut self.host),
            },
            WidgetEvent::PageScroll { offset_y } => {
                self.handle_page_scroll(offset_y);
                Ok(())
            }
            WidgetEvent::PageRelease { velocity_y } => self.handle_page_release(velocity_y),
            WidgetEvent::CloseRequested => self.machine.close_view(&mut self.host),
            WidgetEvent::AnimationComplete { id } => self.on_animation_complete(id),
        }
    }

    /// Run a pointer event through the tracker. A release that ends a
    /// rejected pan may still be a swipe.
    fn recognize(&mut self, event: PointerEvent) -> Option<WidgetEvent> {
        match self.tracker.handle_pointer_event(event)? {
            Recognized::Pan(sample) => {
                if sample.state == GestureState::Ended && !self.pan_active {
                    if let Some(direction) = classify_swipe(sample.velocity) {
                        return Some(WidgetEvent::Swipe { direction });
                    }
                }
                Some(WidgetEvent::Pan(sample))
            }
            Recognized::Tap => Some(WidgetEvent::Tap),
        }
    }

    fn handle_pan(&mut self, sample: PanSample) -> WidgetResult<()> {
        match sample.state {
            GestureState::Began => {
                self.pan_active = false;
                self.machine.begin_drag(&mut self.host)?;
                self.pan_active = true;
                if sample.translation != kurbo::Vec2::ZERO {
                    self.machine.update_drag(&mut self.host, sample.translation)?;
                }
                Ok(())
            }
            GestureState::Changed => {
                if !self.pan_active {
                    return Ok(());
                }
                self.machine.note_drag_speed(&mut self.host, sample.velocity.hypot());
                self.machine.update_drag(&mut self.host, sample.translation)
            }
            GestureState::Ended => {
                if !self.pan_active {
                    return Ok(());
                }
                self.pan_active = false;
                if sample.translation != kurbo::Vec2::ZERO {
                    self.machine.update_drag(&mut self.host, sample.translation)?;
                }
                self.machine.end_drag(&mut self.host, sample.velocity)
            }
            GestureState::Cancelled => {
                if !self.pan_active {
                    return Ok(());
                }
                self.pan_active = false;
                self.machine.cancel_drag(&mut self.host)
            }
            GestureState::Idle => Ok(()),
        }
    }

    fn handle_page_scroll(&mut self, offset_y: f64) {
        self.pages.on_scroll(offset_y);
        let radii = self.pages.corner_radii(offset_y);
        if radii != self.corner_radii {
            self.corner_radii = radii;
            self.host.set_corner_radii(radii);
        }
    }

    fn handle_page_release(&mut self, velocity_y: f64) -> WidgetResult<()> {
        let Some(edge) = self.pages.on_release(velocity_y) else {
            return Ok(());
        };
        log::debug!("Page boundary overscroll at {:?} edge", edge);
        self.machine.on_page_boundary_overscroll(&mut self.host)
    }
}
