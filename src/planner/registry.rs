//! Wall Registry
//!
//! Ordered store of walls. Insertion order is creation order and survives
//! deletions. The registry keeps the view synchronizer in step with every
//! mutation and reports the full sequence to an optional listener.

use std::fmt;

use glam::Vec2;

use super::config::ViewerConfig;
use super::geometry::{self, MIN_WALL_LENGTH};
use super::view_sync::{ViewKind, ViewSynchronizer};
use super::wall::{Wall, WallId, WallSummary};
use crate::error::ViewerError;

/// Callback receiving the whole wall sequence after a change.
pub type WallListener = Box<dyn FnMut(&[Wall])>;

pub struct WallRegistry {
    walls: Vec<Wall>,
    next_id: u64,
    views: ViewSynchronizer,
    listener: Option<WallListener>,
}

impl fmt::Debug for WallRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WallRegistry")
            .field("walls", &self.walls)
            .field("next_id", &self.next_id)
            .field("views", &self.views)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl WallRegistry {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            walls: Vec::new(),
            next_id: 0,
            views: ViewSynchronizer::new(config),
            listener: None,
        }
    }

    /// Install the change listener, replacing any previous one.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&[Wall]) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Append a wall from `start` to `end`.
    ///
    /// Segments shorter than [`MIN_WALL_LENGTH`] are rejected and do not
    /// consume an id.
    pub fn add_wall(&mut self, start: Vec2, end: Vec2) -> Result<WallId, ViewerError> {
        let length = geometry::distance(start, end);
        if length < MIN_WALL_LENGTH {
            return Err(ViewerError::DegenerateWall { start, end, length });
        }

        let id = WallId(self.next_id);
        self.next_id += 1;

        let wall = Wall::new(id, start, end);
        self.views.wall_added(&wall);
        log::info!("Added {} ({:.2}m)", id, wall.length());
        self.walls.push(wall);

        self.notify();
        Ok(id)
    }

    /// Remove a wall and its representations. Returns `false` for an
    /// unknown id, in which case nothing changes and nobody is notified.
    pub fn delete_wall(&mut self, id: WallId) -> bool {
        let Some(index) = self.walls.iter().position(|w| w.id() == id) else {
            log::debug!("delete_wall: no wall {}", id);
            return false;
        };

        self.views.wall_removed(id);
        self.walls.remove(index);
        log::info!("Deleted {}", id);

        self.notify();
        true
    }

    /// Select exactly `id` (or nothing, if unknown) and notify.
    pub fn select_wall(&mut self, id: WallId) {
        for wall in &mut self.walls {
            wall.set_selected(wall.id() == id);
        }
        self.refresh_all();
        log::debug!("Selected {}", id);
        self.notify();
    }

    /// Highlight exactly `id` (or nothing, if unknown).
    pub fn highlight_wall(&mut self, id: WallId) {
        for wall in &mut self.walls {
            wall.set_highlighted(wall.id() == id);
        }
        self.refresh_all();
    }

    pub fn clear_highlight(&mut self) {
        for wall in &mut self.walls {
            wall.set_highlighted(false);
        }
        self.refresh_all();
    }

    /// Clear both selection and highlight everywhere.
    pub fn clear_states(&mut self) {
        for wall in &mut self.walls {
            wall.set_selected(false);
            wall.set_highlighted(false);
        }
        self.refresh_all();
    }

    /// Switch the synchronizer's active view.
    pub fn set_active_view(&mut self, view: ViewKind) {
        self.views.set_active_view(view, &self.walls);
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn get(&self, id: WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    pub fn summary(&self) -> WallSummary {
        WallSummary::of(&self.walls)
    }

    pub fn selected(&self) -> Option<WallId> {
        self.walls.iter().find(|w| w.is_selected()).map(Wall::id)
    }

    pub fn highlighted(&self) -> Option<WallId> {
        self.walls.iter().find(|w| w.is_highlighted()).map(Wall::id)
    }

    pub fn views(&self) -> &ViewSynchronizer {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut ViewSynchronizer {
        &mut self.views
    }

    fn refresh_all(&mut self) {
        for wall in &self.walls {
            self.views.refresh_appearance(wall);
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.walls);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn registry() -> WallRegistry {
        WallRegistry::new(&ViewerConfig::default())
    }

    fn counting_listener(registry: &mut WallRegistry) -> Rc<RefCell<Vec<usize>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        registry.set_listener(move |walls| sink.borrow_mut().push(walls.len()));
        calls
    }

    #[test]
    fn test_ids_monotonic_and_never_reused() {
        let mut reg = registry();
        let a = reg.add_wall(Vec2::ZERO, Vec2::X).unwrap();
        let b = reg.add_wall(Vec2::ZERO, Vec2::Y).unwrap();
        assert!(reg.delete_wall(b));
        let c = reg.add_wall(Vec2::ZERO, Vec2::ONE).unwrap();

        assert_eq!(a, WallId(0));
        assert_eq!(b, WallId(1));
        assert_eq!(c, WallId(2));
    }

    #[test]
    fn test_degenerate_rejected_without_id() {
        let mut reg = registry();
        let p = Vec2::new(3.0, 3.0);
        let err = reg.add_wall(p, p).unwrap_err();
        assert!(matches!(err, ViewerError::DegenerateWall { .. }));
        assert!(reg.is_empty());

        let id = reg.add_wall(p, Vec2::ZERO).unwrap();
        assert_eq!(id, WallId(0));
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut reg = registry();
        for i in 0..4 {
            reg.add_wall(Vec2::ZERO, Vec2::new(i as f32 + 1.0, 0.0)).unwrap();
        }
        assert!(reg.delete_wall(WallId(1)));

        let ids: Vec<_> = reg.walls().iter().map(Wall::id).collect();
        assert_eq!(ids, vec![WallId(0), WallId(2), WallId(3)]);
        assert!(!reg.views().has_plan(WallId(1)));
    }

    #[test]
    fn test_unknown_delete_is_silent() {
        let mut reg = registry();
        reg.add_wall(Vec2::ZERO, Vec2::X).unwrap();
        let calls = counting_listener(&mut reg);

        assert!(!reg.delete_wall(WallId(99)));
        assert_eq!(reg.len(), 1);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_listener_sees_full_sequence() {
        let mut reg = registry();
        let calls = counting_listener(&mut reg);

        let a = reg.add_wall(Vec2::ZERO, Vec2::X).unwrap();
        reg.add_wall(Vec2::ZERO, Vec2::Y).unwrap();
        reg.select_wall(a);
        reg.highlight_wall(a);
        reg.delete_wall(a);

        // highlight does not notify
        assert_eq!(*calls.borrow(), vec![1, 2, 2, 1]);
    }

    #[test]
    fn test_exclusive_flags() {
        let mut reg = registry();
        let a = reg.add_wall(Vec2::ZERO, Vec2::X).unwrap();
        let b = reg.add_wall(Vec2::ZERO, Vec2::Y).unwrap();

        reg.select_wall(a);
        reg.select_wall(b);
        reg.highlight_wall(a);
        reg.highlight_wall(b);

        assert_eq!(reg.walls().iter().filter(|w| w.is_selected()).count(), 1);
        assert_eq!(reg.walls().iter().filter(|w| w.is_highlighted()).count(), 1);
        assert_eq!(reg.selected(), Some(b));
        assert_eq!(reg.highlighted(), Some(b));

        reg.select_wall(WallId(42));
        assert_eq!(reg.selected(), None);

        reg.clear_states();
        assert_eq!(reg.highlighted(), None);
    }

    #[test]
    fn test_elevation_reps_follow_active_view() {
        let mut reg = registry();
        reg.add_wall(Vec2::ZERO, Vec2::X).unwrap();
        assert_eq!(reg.views().elevation_count(), 0);

        reg.set_active_view(ViewKind::Elevation);
        assert_eq!(reg.views().elevation_count(), 1);

        reg.add_wall(Vec2::ZERO, Vec2::Y).unwrap();
        assert_eq!(reg.views().elevation_count(), 2);
    }
}
