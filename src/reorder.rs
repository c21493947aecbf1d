//! Drag-to-reorder over the thumbnail strip.
//!
//! Pointer gestures arrive as drag start/over/drop/end; touch gestures arrive
//! as raw coordinates plus whatever node is currently under the finger. Both
//! paths end by clearing every cue and dropping the session, whether or not a
//! move happened.

use log::trace;

use crate::strip::{Cue, NodeId, Strip};

pub const DEFAULT_TOUCH_THRESHOLD_PX: f64 = 10.0;

/// A strip plus the owner that keeps its bookkeeping in step with moves.
pub trait Arrangement {
    type Strip: Strip;

    fn strip_mut(&mut self) -> &mut Self::Strip;

    /// Moves `active` next to `target`; returns whether the order changed.
    fn move_node(&mut self, active: NodeId, target: NodeId) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragSession {
    Pointer {
        active: NodeId,
        over: Option<NodeId>,
    },
    Touch {
        active: NodeId,
        origin: (f64, f64),
        moved: bool,
        over: Option<NodeId>,
    },
}

impl DragSession {
    pub fn active(&self) -> NodeId {
        match *self {
            Self::Pointer { active, .. } | Self::Touch { active, .. } => active,
        }
    }
}

/// What the host should do with the default action of a touch move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchMove {
    /// Still under the threshold; let the page scroll.
    Undecided,
    /// Recognized as a drag; suppress scrolling.
    Dragging,
    /// No touch session is active.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEnd {
    /// The finger never crossed the threshold; the tap proceeds as a click.
    Tap,
    /// A drag finished; `moved` tells whether the order changed.
    Dropped { moved: bool },
    Ignored,
}

#[derive(Debug)]
pub struct ReorderController {
    session: Option<DragSession>,
    touch_threshold: f64,
}

impl Default for ReorderController {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_THRESHOLD_PX)
    }
}

impl ReorderController {
    pub fn new(touch_threshold: f64) -> Self {
        Self {
            session: None,
            touch_threshold: touch_threshold.max(0.0),
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_start<S: Strip>(&mut self, strip: &mut S, node: NodeId) {
        self.reset(strip);
        strip.set_cue(node, Cue::Dragging);
        self.session = Some(DragSession::Pointer {
            active: node,
            over: None,
        });
        trace!("drag start on {node}");
    }

    /// Highlights `target` as a drop candidate. Returns whether a drop there
    /// would be accepted.
    pub fn drag_over<S: Strip>(&mut self, strip: &mut S, target: NodeId) -> bool {
        let Some(DragSession::Pointer { active, over }) = &mut self.session else {
            return false;
        };
        if *active == target {
            return false;
        }
        if *over != Some(target) {
            if let Some(previous) = over.replace(target) {
                strip.set_cue(previous, Cue::None);
            }
            strip.set_cue(target, Cue::DropTarget);
        }
        true
    }

    pub fn drag_leave<S: Strip>(&mut self, strip: &mut S, target: NodeId) {
        if let Some(DragSession::Pointer { over, .. }) = &mut self.session
            && *over == Some(target)
        {
            *over = None;
            strip.set_cue(target, Cue::None);
        }
    }

    /// Moves the active node next to `target`. The session stays open until
    /// [`drag_end`](Self::drag_end).
    pub fn drop_on<A: Arrangement>(&mut self, arrangement: &mut A, target: NodeId) -> bool {
        let Some(DragSession::Pointer { active, .. }) = self.session else {
            return false;
        };
        arrangement.strip_mut().clear_cues();
        arrangement.move_node(active, target)
    }

    pub fn drag_end<S: Strip>(&mut self, strip: &mut S) {
        trace!("drag end");
        self.reset(strip);
    }

    pub fn touch_start<S: Strip>(&mut self, strip: &mut S, node: NodeId, x: f64, y: f64) {
        self.reset(strip);
        self.session = Some(DragSession::Touch {
            active: node,
            origin: (x, y),
            moved: false,
            over: None,
        });
        trace!("touch start on {node} at ({x}, {y})");
    }

    /// `hit` is the node under the finger at `(x, y)`.
    pub fn touch_move<S: Strip>(
        &mut self,
        strip: &mut S,
        x: f64,
        y: f64,
        hit: Option<NodeId>,
    ) -> TouchMove {
        let threshold = self.touch_threshold;
        let Some(DragSession::Touch {
            active,
            origin,
            moved,
            over,
        }) = &mut self.session
        else {
            return TouchMove::Ignored;
        };

        if !*moved {
            let (dx, dy) = (x - origin.0, y - origin.1);
            if dx.abs() <= threshold && dy.abs() <= threshold {
                return TouchMove::Undecided;
            }
            *moved = true;
            strip.set_cue(*active, Cue::Dragging);
            trace!("touch on {active} became a drag");
        }

        let active = *active;
        let target = hit.filter(|id| *id != active);
        if *over != target {
            if let Some(previous) = over.take() {
                strip.set_cue(previous, Cue::None);
            }
            if let Some(target) = target {
                strip.set_cue(target, Cue::DropTarget);
            }
            *over = target;
        }
        TouchMove::Dragging
    }

    /// `hit` is the node under the finger where it lifted.
    pub fn touch_end<A: Arrangement>(
        &mut self,
        arrangement: &mut A,
        hit: Option<NodeId>,
    ) -> TouchEnd {
        let Some(DragSession::Touch { active, moved, .. }) = self.session else {
            return TouchEnd::Ignored;
        };
        self.reset(arrangement.strip_mut());
        if !moved {
            return TouchEnd::Tap;
        }
        let moved = hit.is_some_and(|target| arrangement.move_node(active, target));
        TouchEnd::Dropped { moved }
    }

    pub fn touch_cancel<S: Strip>(&mut self, strip: &mut S) {
        trace!("touch cancelled");
        self.reset(strip);
    }

    fn reset<S: Strip>(&mut self, strip: &mut S) {
        strip.clear_cues();
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{FileCollection, Source};
    use crate::testing::{MemoryStrip, RecordingSink, TestFile};
    use pretty_assertions::assert_eq;

    type Collection = FileCollection<TestFile, MemoryStrip, RecordingSink>;

    fn abc() -> (Collection, Vec<NodeId>) {
        let mut c = FileCollection::new(5, MemoryStrip::default(), RecordingSink::default());
        let admission = c.admit(
            [
                TestFile::image("a.jpg", 1),
                TestFile::image("b.jpg", 2),
                TestFile::image("c.jpg", 3),
            ],
            Source::Picker,
        );
        let ids = admission
            .tickets
            .into_iter()
            .map(|t| c.complete(t, ()).expect("memory strip accepts nodes"))
            .collect();
        (c, ids)
    }

    #[test]
    fn pointer_drag_over_previews_without_moving() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.drag_start(c.strip_mut(), ids[0]);
        assert_eq!(c.strip().cue(ids[0]), Cue::Dragging);

        assert!(reorder.drag_over(c.strip_mut(), ids[1]));
        assert!(reorder.drag_over(c.strip_mut(), ids[2]));
        assert_eq!(c.strip().cue(ids[1]), Cue::None);
        assert_eq!(c.strip().cue(ids[2]), Cue::DropTarget);
        assert_eq!(c.order_ids(), ids);
    }

    #[test]
    fn drag_over_self_is_refused() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.drag_start(c.strip_mut(), ids[1]);
        assert!(!reorder.drag_over(c.strip_mut(), ids[1]));
    }

    #[test]
    fn pointer_drop_moves_and_end_clears() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.drag_start(c.strip_mut(), ids[2]);
        reorder.drag_over(c.strip_mut(), ids[0]);
        assert!(reorder.drop_on(&mut c, ids[0]));
        reorder.drag_end(c.strip_mut());

        assert_eq!(c.sink().last(), vec!["c.jpg", "a.jpg", "b.jpg"]);
        assert!(c.strip().cues.is_empty());
        assert!(reorder.session().is_none());
    }

    #[test]
    fn drag_end_without_drop_clears_state() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.drag_start(c.strip_mut(), ids[0]);
        reorder.drag_over(c.strip_mut(), ids[1]);
        reorder.drag_end(c.strip_mut());
        assert!(c.strip().cues.is_empty());
        assert!(!reorder.is_active());
        assert!(!reorder.drop_on(&mut c, ids[1]));
    }

    #[test]
    fn drag_leave_drops_only_its_own_highlight() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.drag_start(c.strip_mut(), ids[0]);
        reorder.drag_over(c.strip_mut(), ids[1]);
        reorder.drag_leave(c.strip_mut(), ids[2]);
        assert_eq!(c.strip().cue(ids[1]), Cue::DropTarget);
        reorder.drag_leave(c.strip_mut(), ids[1]);
        assert_eq!(c.strip().cue(ids[1]), Cue::None);
        assert_eq!(c.strip().cue(ids[0]), Cue::Dragging);
    }

    #[test]
    fn short_touch_is_a_tap() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.touch_start(c.strip_mut(), ids[0], 100.0, 100.0);
        assert_eq!(
            reorder.touch_move(c.strip_mut(), 108.0, 95.0, Some(ids[0])),
            TouchMove::Undecided
        );
        assert_eq!(reorder.touch_end(&mut c, Some(ids[1])), TouchEnd::Tap);
        assert_eq!(c.order_ids(), ids);
        assert!(reorder.session().is_none());
    }

    #[test]
    fn threshold_must_be_exceeded_not_reached() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.touch_start(c.strip_mut(), ids[0], 0.0, 0.0);
        assert_eq!(
            reorder.touch_move(c.strip_mut(), 10.0, -10.0, Some(ids[1])),
            TouchMove::Undecided
        );
        assert_eq!(c.strip().cue(ids[1]), Cue::None);
        assert_eq!(reorder.touch_end(&mut c, Some(ids[1])), TouchEnd::Tap);

        reorder.touch_start(c.strip_mut(), ids[0], 0.0, 0.0);
        assert_eq!(
            reorder.touch_move(c.strip_mut(), 0.0, 10.01, Some(ids[1])),
            TouchMove::Dragging
        );
        assert_eq!(c.strip().cue(ids[0]), Cue::Dragging);
    }

    #[test]
    fn touch_drag_uses_hit_target() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.touch_start(c.strip_mut(), ids[0], 10.0, 10.0);
        assert_eq!(
            reorder.touch_move(c.strip_mut(), 10.0, 25.0, Some(ids[1])),
            TouchMove::Dragging
        );
        assert_eq!(c.strip().cue(ids[0]), Cue::Dragging);
        assert_eq!(c.strip().cue(ids[1]), Cue::DropTarget);

        reorder.touch_move(c.strip_mut(), 200.0, 25.0, Some(ids[2]));
        assert_eq!(c.strip().cue(ids[1]), Cue::None);

        assert_eq!(
            reorder.touch_end(&mut c, Some(ids[2])),
            TouchEnd::Dropped { moved: true }
        );
        assert_eq!(c.sink().last(), vec!["b.jpg", "c.jpg", "a.jpg"]);
        assert!(c.strip().cues.is_empty());
    }

    #[test]
    fn touch_drag_released_off_strip_keeps_order() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::new(4.0);
        reorder.touch_start(c.strip_mut(), ids[0], 0.0, 0.0);
        reorder.touch_move(c.strip_mut(), 5.0, 0.0, None);
        assert_eq!(reorder.touch_end(&mut c, None), TouchEnd::Dropped { moved: false });
        assert_eq!(c.order_ids(), ids);
    }

    #[test]
    fn touch_cancel_clears_cues() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.touch_start(c.strip_mut(), ids[1], 0.0, 0.0);
        reorder.touch_move(c.strip_mut(), 50.0, 0.0, Some(ids[2]));
        reorder.touch_cancel(c.strip_mut());
        assert!(c.strip().cues.is_empty());
        assert_eq!(reorder.touch_end(&mut c, Some(ids[2])), TouchEnd::Ignored);
    }

    #[test]
    fn new_gesture_replaces_stale_session() {
        let (mut c, ids) = abc();
        let mut reorder = ReorderController::default();
        reorder.drag_start(c.strip_mut(), ids[0]);
        reorder.drag_over(c.strip_mut(), ids[1]);
        reorder.touch_start(c.strip_mut(), ids[2], 0.0, 0.0);
        assert!(c.strip().cues.is_empty());
        assert_eq!(reorder.session().map(DragSession::active), Some(ids[2]));
    }
}
