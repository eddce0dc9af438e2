//! Pointer-gesture state machines behind the mobile UI: swipe-to-act on an
//! entry row and drag-to-page on the calendar.
//!
//! Both are explicit finite-state objects driven by pointer deltas. They hold
//! no timers and return the visual offset to neutral whenever an interaction
//! ends, whatever the outcome.

use crate::constants::gesture::{
    DELETE_THRESHOLD_PX, DIRECTION_LOCK_PX, EDIT_THRESHOLD_PX, PAGE_THRESHOLD_PX,
};

/// Action resolved when a swipe is released.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwipeAction {
    None,
    Edit,
    Delete,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum SwipePhase {
    Idle,
    /// Pointer down, direction not yet decided.
    Pending { start_x: f64, start_y: f64 },
    /// Direction locked for the rest of the interaction.
    Tracking {
        start_x: f64,
        horizontal: bool,
        delta_x: f64,
    },
}

/// Swipe-to-act state machine for a single entry row.
///
/// An interaction is `begin` → `update`* → `release`. The first movement past
/// the direction-lock distance commits the gesture to horizontal or vertical;
/// vertical gestures never move the row and never resolve an action. Only
/// leftward travel is rendered (the visual offset is clamped at zero), and
/// release classifies the raw horizontal delta against the two thresholds:
/// past the delete threshold wins over edit, anything short of edit is a
/// no-op. The offset snaps back to zero on every release.
#[derive(Debug)]
pub struct SwipeGesture {
    edit_threshold: f64,
    delete_threshold: f64,
    phase: SwipePhase,
    offset: f64,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeGesture {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_thresholds(EDIT_THRESHOLD_PX, DELETE_THRESHOLD_PX)
    }

    /// Thresholds are per-instance so callers can tune row sensitivity.
    #[must_use]
    pub const fn with_thresholds(edit_threshold: f64, delete_threshold: f64) -> Self {
        Self {
            edit_threshold,
            delete_threshold,
            phase: SwipePhase::Idle,
            offset: 0.0,
        }
    }

    /// Pointer down.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.phase = SwipePhase::Pending {
            start_x: x,
            start_y: y,
        };
    }

    /// Pointer moved. Ignored unless an interaction is active.
    pub fn update(&mut self, x: f64, y: f64) {
        match self.phase {
            SwipePhase::Idle => {}
            SwipePhase::Pending { start_x, start_y } => {
                let delta_x = x - start_x;
                let delta_y = y - start_y;

                if delta_x.abs() > DIRECTION_LOCK_PX || delta_y.abs() > DIRECTION_LOCK_PX {
                    let horizontal = delta_x.abs() > delta_y.abs();
                    self.phase = SwipePhase::Tracking {
                        start_x,
                        horizontal,
                        delta_x,
                    };
                    if horizontal {
                        self.offset = delta_x.min(0.0);
                    }
                }
            }
            SwipePhase::Tracking {
                start_x,
                horizontal,
                ..
            } => {
                let delta_x = x - start_x;
                self.phase = SwipePhase::Tracking {
                    start_x,
                    horizontal,
                    delta_x,
                };
                if horizontal {
                    // Rightward travel is clamped away; rows only slide left.
                    self.offset = delta_x.min(0.0);
                }
            }
        }
    }

    /// Pointer up (or left the surface). Resolves the action and resets.
    pub fn release(&mut self) -> SwipeAction {
        let action = match self.phase {
            SwipePhase::Tracking {
                horizontal: true,
                delta_x,
                ..
            } => {
                if delta_x <= -self.delete_threshold {
                    SwipeAction::Delete
                } else if delta_x <= -self.edit_threshold {
                    SwipeAction::Edit
                } else {
                    SwipeAction::None
                }
            }
            _ => SwipeAction::None,
        };

        self.phase = SwipePhase::Idle;
        self.offset = 0.0;
        action
    }

    /// Current visual offset of the row (always <= 0).
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// What releasing right now would do, for live affordance rendering.
    #[must_use]
    pub fn action(&self) -> SwipeAction {
        let offset = self.offset.abs();
        if offset >= self.delete_threshold {
            SwipeAction::Delete
        } else if offset >= self.edit_threshold {
            SwipeAction::Edit
        } else {
            SwipeAction::None
        }
    }

    /// True while a horizontal drag is in progress.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        matches!(
            self.phase,
            SwipePhase::Tracking {
                horizontal: true,
                ..
            }
        )
    }
}

/// Action resolved when a calendar drag is released.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageAction {
    None,
    /// Dragged right past the threshold.
    PreviousMonth,
    /// Dragged left past the threshold.
    NextMonth,
}

/// Drag-to-page state machine for the month calendar.
///
/// Tracks a single horizontal offset from the drag origin; releasing strictly
/// past the threshold pages one month in the drag direction, anything else is
/// a no-op. Offset resets on every release.
#[derive(Debug)]
pub struct CalendarPager {
    page_threshold: f64,
    start_x: Option<f64>,
    offset: f64,
}

impl Default for CalendarPager {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarPager {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_threshold(PAGE_THRESHOLD_PX)
    }

    #[must_use]
    pub const fn with_threshold(page_threshold: f64) -> Self {
        Self {
            page_threshold,
            start_x: None,
            offset: 0.0,
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn update(&mut self, x: f64) {
        if let Some(start_x) = self.start_x {
            self.offset = x - start_x;
        }
    }

    pub fn release(&mut self) -> PageAction {
        let action = if self.start_x.is_some() {
            if self.offset > self.page_threshold {
                PageAction::PreviousMonth
            } else if self.offset < -self.page_threshold {
                PageAction::NextMonth
            } else {
                PageAction::None
            }
        } else {
            PageAction::None
        };

        self.start_x = None;
        self.offset = 0.0;
        action
    }

    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe_to(gesture: &mut SwipeGesture, delta_x: f64) {
        gesture.begin(200.0, 300.0);
        // Two moves: one to lock the direction, one to reach the target.
        gesture.update(200.0 + delta_x.signum() * 10.0, 300.0);
        gesture.update(200.0 + delta_x, 300.0);
    }

    #[test]
    fn test_long_left_swipe_deletes() {
        let mut gesture = SwipeGesture::new();
        swipe_to(&mut gesture, -160.0);
        assert_eq!(gesture.release(), SwipeAction::Delete);
        assert_eq!(gesture.offset(), 0.0);
    }

    #[test]
    fn test_medium_left_swipe_edits() {
        let mut gesture = SwipeGesture::new();
        swipe_to(&mut gesture, -100.0);
        assert_eq!(gesture.release(), SwipeAction::Edit);
        assert_eq!(gesture.offset(), 0.0);
    }

    #[test]
    fn test_short_left_swipe_resets() {
        let mut gesture = SwipeGesture::new();
        swipe_to(&mut gesture, -40.0);
        assert_eq!(gesture.offset(), -40.0);
        assert_eq!(gesture.release(), SwipeAction::None);
        assert_eq!(gesture.offset(), 0.0);
    }

    #[test]
    fn test_exact_thresholds_resolve() {
        let mut gesture = SwipeGesture::new();
        swipe_to(&mut gesture, -150.0);
        assert_eq!(gesture.release(), SwipeAction::Delete);

        swipe_to(&mut gesture, -80.0);
        assert_eq!(gesture.release(), SwipeAction::Edit);
    }

    #[test]
    fn test_rightward_swipe_is_clamped() {
        let mut gesture = SwipeGesture::new();
        swipe_to(&mut gesture, 200.0);
        assert_eq!(gesture.offset(), 0.0);
        assert_eq!(gesture.release(), SwipeAction::None);
    }

    #[test]
    fn test_vertical_drag_never_moves_the_row() {
        let mut gesture = SwipeGesture::new();
        gesture.begin(200.0, 300.0);
        gesture.update(200.0, 320.0);
        // Direction is locked vertical; later horizontal travel is ignored.
        gesture.update(40.0, 340.0);
        assert_eq!(gesture.offset(), 0.0);
        assert!(!gesture.is_tracking());
        assert_eq!(gesture.release(), SwipeAction::None);
    }

    #[test]
    fn test_movement_under_lock_distance_stays_pending() {
        let mut gesture = SwipeGesture::new();
        gesture.begin(200.0, 300.0);
        gesture.update(197.0, 302.0);
        assert!(!gesture.is_tracking());
        assert_eq!(gesture.release(), SwipeAction::None);
    }

    #[test]
    fn test_live_action_tracks_offset() {
        let mut gesture = SwipeGesture::new();
        swipe_to(&mut gesture, -90.0);
        assert_eq!(gesture.action(), SwipeAction::Edit);

        gesture.update(200.0 - 151.0, 300.0);
        assert_eq!(gesture.action(), SwipeAction::Delete);
    }

    #[test]
    fn test_release_without_begin_is_noop() {
        let mut gesture = SwipeGesture::new();
        assert_eq!(gesture.release(), SwipeAction::None);
        assert_eq!(gesture.offset(), 0.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut gesture = SwipeGesture::with_thresholds(40.0, 70.0);
        swipe_to(&mut gesture, -50.0);
        assert_eq!(gesture.release(), SwipeAction::Edit);

        swipe_to(&mut gesture, -75.0);
        assert_eq!(gesture.release(), SwipeAction::Delete);
    }

    #[test]
    fn test_pager_right_drag_pages_back() {
        let mut pager = CalendarPager::new();
        pager.begin(100.0);
        pager.update(250.0);
        assert_eq!(pager.release(), PageAction::PreviousMonth);
        assert_eq!(pager.offset(), 0.0);
    }

    #[test]
    fn test_pager_left_drag_pages_forward() {
        let mut pager = CalendarPager::new();
        pager.begin(300.0);
        pager.update(150.0);
        assert_eq!(pager.release(), PageAction::NextMonth);
    }

    #[test]
    fn test_pager_threshold_is_strict() {
        let mut pager = CalendarPager::new();
        pager.begin(0.0);
        pager.update(100.0);
        assert_eq!(pager.release(), PageAction::None);

        pager.begin(0.0);
        pager.update(-100.0);
        assert_eq!(pager.release(), PageAction::None);
    }

    #[test]
    fn test_pager_update_without_begin_ignored() {
        let mut pager = CalendarPager::new();
        pager.update(500.0);
        assert_eq!(pager.offset(), 0.0);
        assert_eq!(pager.release(), PageAction::None);
    }
}
