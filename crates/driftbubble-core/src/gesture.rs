//! Gesture admission policy.

use serde::{Deserialize, Serialize};

/// Kind of gesture a recognizer is trying to begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Pan,
    Tap,
    Swipe,
}

/// Direction of a swipe gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Up,
    Down,
}

/// Decides which gesture kinds may begin given the widget's open/expanded
/// flags.
///
/// The flags are a mirror of the widget state. Only the widget writes them,
/// through [`GestureDisambiguator::sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureDisambiguator {
    is_open: bool,
    is_expanded: bool,
}

impl GestureDisambiguator {
    /// Create a disambiguator for a closed widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both flags at once.
    pub(crate) fn sync(&mut self, is_open: bool, is_expanded: bool) {
        self.is_open = is_open;
        self.is_expanded = is_expanded;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Check whether a gesture of `kind` may begin.
    pub fn admits(&self, kind: GestureKind) -> bool {
        if self.is_expanded || self.is_open {
            return kind == GestureKind::Swipe;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GestureKind; 3] = [GestureKind::Pan, GestureKind::Tap, GestureKind::Swipe];

    #[test]
    fn test_closed_admits_everything() {
        let d = GestureDisambiguator::new();
        for kind in ALL {
            assert!(d.admits(kind));
        }
    }

    #[test]
    fn test_open_admits_only_swipe() {
        let mut d = GestureDisambiguator::new();
        d.sync(true, false);
        assert!(!d.admits(GestureKind::Pan));
        assert!(!d.admits(GestureKind::Tap));
        assert!(d.admits(GestureKind::Swipe));
    }

    #[test]
    fn test_expanded_admits_only_swipe() {
        let mut d = GestureDisambiguator::new();
        d.sync(true, true);
        assert!(!d.admits(GestureKind::Pan));
        assert!(!d.admits(GestureKind::Tap));
        assert!(d.admits(GestureKind::Swipe));

        // Expanded wins even if the open flag were somehow clear.
        d.sync(false, true);
        assert!(!d.admits(GestureKind::Pan));
        assert!(d.admits(GestureKind::Swipe));
    }
}
