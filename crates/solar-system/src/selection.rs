/// Which body is active, with cyclic navigation over root-level bodies.

use crate::bodies::{BodyCatalog, MOON_ID};
use crate::features::FeatureToggles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    selected: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, idx: usize) -> bool {
        self.selected == Some(idx)
    }

    pub fn any(&self) -> bool {
        self.selected.is_some()
    }

    /// Select `idx`. Returns true if the selection changed.
    pub fn select(&mut self, idx: usize) -> bool {
        let changed = self.selected != Some(idx);
        self.selected = Some(idx);
        changed
    }

    /// Deselect. Returns true if something was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Step forward through visible root-level bodies with wraparound.
    /// With nothing selected the first one is chosen.
    pub fn next(&mut self, catalog: &BodyCatalog, toggles: &FeatureToggles) -> Option<usize> {
        self.step(catalog, toggles, true)
    }

    /// Inverse of `next`. With nothing selected the last one is chosen.
    pub fn previous(&mut self, catalog: &BodyCatalog, toggles: &FeatureToggles) -> Option<usize> {
        self.step(catalog, toggles, false)
    }

    fn step(&mut self, catalog: &BodyCatalog, toggles: &FeatureToggles, forward: bool) -> Option<usize> {
        let cycle: Vec<usize> = catalog
            .top_level()
            .iter()
            .copied()
            .filter(|&i| toggles.is_visible(catalog, i))
            .collect();
        if cycle.is_empty() {
            return self.selected;
        }
        let n = cycle.len();
        // A selected satellite cycles from its root-level ancestor
        let current = self
            .selected
            .and_then(|s| catalog.node(s))
            .and_then(|node| cycle.iter().position(|&i| i == node.top_level));
        let pos = match (current, forward) {
            (Some(p), true) => (p + 1) % n,
            (Some(p), false) => (p + n - 1) % n,
            (None, true) => 0,
            (None, false) => n - 1,
        };
        self.selected = Some(cycle[pos]);
        self.selected
    }

    /// The body the camera follows: the Moon is followed through its parent.
    pub fn follow_anchor(&self, catalog: &BodyCatalog) -> Option<usize> {
        let idx = self.selected?;
        let node = catalog.node(idx)?;
        if node.body.id == MOON_ID {
            node.parent.or(Some(idx))
        } else {
            Some(idx)
        }
    }

    /// Selected bodies and everything orbiting the followed anchor are highlighted.
    pub fn is_highlighted(&self, catalog: &BodyCatalog, idx: usize) -> bool {
        if self.is_selected(idx) {
            return true;
        }
        self.follow_anchor(catalog)
            .is_some_and(|anchor| catalog.is_within(idx, anchor))
    }

    /// Drop a selection that can no longer be targeted. Returns true if cleared.
    pub fn clear_if_hidden(&mut self, catalog: &BodyCatalog, toggles: &FeatureToggles) -> bool {
        match self.selected {
            Some(idx) if !toggles.is_visible(catalog, idx) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}
