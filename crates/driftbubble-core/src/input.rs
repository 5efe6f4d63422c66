//! Pointer input recognition: raw pointer events to pan, tap and swipe.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::gesture::SwipeDirection;

/// Movement (in logical pixels) before a press becomes a pan.
pub const DRAG_THRESHOLD: f64 = 8.0;
/// Time window (seconds) used to estimate release velocity.
const VELOCITY_WINDOW_SECS: f64 = 0.1;
/// Minimum vertical speed (px/s) for a release to count as a swipe.
pub const SWIPE_MIN_SPEED: f64 = 500.0;

/// Raw pointer event with a timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point, time: f64 },
    Move { position: Point, time: f64 },
    Up { position: Point, time: f64 },
    Cancel,
}

/// Phase of an in-flight gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Idle,
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One pan update as delivered to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanSample {
    pub state: GestureState,
    /// Movement since the previous sample.
    pub translation: Vec2,
    /// Current velocity in px/s.
    pub velocity: Vec2,
}

/// A gesture recognized from pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recognized {
    Pan(PanSample),
    /// Press and release without leaving the drag threshold.
    Tap,
}

/// Classify a release velocity as a vertical swipe.
///
/// The release must be fast and mostly vertical.
pub fn classify_swipe(velocity: Vec2) -> Option<SwipeDirection> {
    if !velocity.is_finite() || velocity.y.abs() < SWIPE_MIN_SPEED {
        return None;
    }
    if velocity.y.abs() < velocity.x.abs() * 2.0 {
        return None;
    }
    if velocity.y < 0.0 {
        Some(SwipeDirection::Up)
    } else {
        Some(SwipeDirection::Down)
    }
}

/// Tracks a single pointer and turns it into pan samples.
#[derive(Debug, Clone, Default)]
pub struct PanTracker {
    state: GestureState,
    /// Where the pointer went down, while pressed.
    press_position: Option<Point>,
    /// Position reported in the last pan sample.
    last_position: Point,
    /// Recent `(time, position)` samples for velocity estimation.
    history: VecDeque<(f64, Point)>,
}

impl PanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a pointer is currently down.
    pub fn is_pressed(&self) -> bool {
        self.press_position.is_some()
    }

    fn record(&mut self, time: f64, position: Point) {
        self.history.push_back((time, position));
        while let Some(&(oldest, _)) = self.history.front() {
            if time - oldest > VELOCITY_WINDOW_SECS && self.history.len() > 1 {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity over the recent sample window.
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.history.front(), self.history.back()) else {
            return Vec2::ZERO;
        };
        let dt = t1 - t0;
        if dt.is_nan() || dt <= 0.0 {
            return Vec2::ZERO;
        }
        (p1 - p0) / dt
    }

    fn reset(&mut self) {
        self.press_position = None;
        self.history.clear();
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<Recognized> {
        match event {
            PointerEvent::Down { position, time } => {
                self.state = GestureState::Idle;
                self.press_position = Some(position);
                self.last_position = position;
                self.history.clear();
                self.record(time, position);
                None
            }
            PointerEvent::Move { position, time } => {
                let press = self.press_position?;
                self.record(time, position);
                match self.state {
                    GestureState::Idle | GestureState::Ended | GestureState::Cancelled => {
                        if (position - press).hypot() <= DRAG_THRESHOLD {
                            return None;
                        }
                        self.state = GestureState::Began;
                    }
                    GestureState::Began | GestureState::Changed => {
                        self.state = GestureState::Changed;
                    }
                }
                let translation = position - self.last_position;
                self.last_position = position;
                Some(Recognized::Pan(PanSample {
                    state: self.state,
                    translation,
                    velocity: self.velocity(),
                }))
            }
            PointerEvent::Up { position, time } => {
                self.press_position?;
                self.record(time, position);
                let recognized = match self.state {
                    GestureState::Began | GestureState::Changed => {
                        self.state = GestureState::Ended;
                        let translation = position - self.last_position;
                        Recognized::Pan(PanSample {
                            state: GestureState::Ended,
                            translation,
                            velocity: self.velocity(),
                        })
                    }
                    _ => Recognized::Tap,
                };
                self.reset();
                Some(recognized)
            }
            PointerEvent::Cancel => {
                let was_panning = matches!(self.state, GestureState::Began | GestureState::Changed);
                self.reset();
                if !was_panning {
                    return None;
                }
                self.state = GestureState::Cancelled;
                Some(Recognized::Pan(PanSample {
                    state: GestureState::Cancelled,
                    translation: Vec2::ZERO,
                    velocity: Vec2::ZERO,
                }))
            }
        }
    }
}
