use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::layout::{Direction, ParentRef};
use crate::size::format_number;

/// What a rendering layer needs to paint one sibling list.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSurface {
    pub direction: Direction,
    /// Value for `grid-template-rows` / `grid-template-columns`.
    pub template: String,
    /// Value for the fixed-sizes-sum custom property, in pixels.
    pub fixed_sizes_sum: f64,
}

impl GroupSurface {
    fn fingerprint(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(match self.direction {
            Direction::Rows => b"rows",
            Direction::Columns => b"cols",
        });
        hasher.update(self.template.as_bytes());
        hasher.update(format_number(self.fixed_sizes_sum).as_bytes());
        hasher.finalize()
    }
}

#[derive(Debug, Clone)]
struct SurfaceState {
    surface: GroupSurface,
    hash: Hash,
}

/// Last surfaces handed to the rendering layer, keyed by sibling list.
///
/// An entry turns dirty only when its content hash changes, so callers can
/// re-apply just the grid templates an operation actually touched.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    entries: HashMap<ParentRef, SurfaceState>,
    dirty: HashSet<ParentRef>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the surface of one sibling list.
    pub fn update(&mut self, parent: ParentRef, surface: GroupSurface) {
        use std::collections::hash_map::Entry;

        let hash = surface.fingerprint();
        match self.entries.entry(parent.clone()) {
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();
                if state.hash != hash {
                    *state = SurfaceState { surface, hash };
                    self.dirty.insert(parent);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(SurfaceState { surface, hash });
                self.dirty.insert(parent);
            }
        }
    }

    /// Replace the whole set of surfaces, dropping lists that no longer exist.
    pub fn sync(&mut self, surfaces: impl IntoIterator<Item = (ParentRef, GroupSurface)>) {
        let mut seen = HashSet::new();
        for (parent, surface) in surfaces {
            seen.insert(parent.clone());
            self.update(parent, surface);
        }

        let stale: Vec<_> = self
            .entries
            .keys()
            .filter(|parent| !seen.contains(*parent))
            .cloned()
            .collect();
        for parent in stale {
            self.entries.remove(&parent);
            self.dirty.remove(&parent);
        }
    }

    pub fn take_dirty(&mut self) -> Vec<(ParentRef, GroupSurface)> {
        let parents: Vec<_> = self.dirty.drain().collect();
        parents
            .into_iter()
            .filter_map(|parent| {
                self.entries
                    .get(&parent)
                    .map(|state| (parent.clone(), state.surface.clone()))
            })
            .collect()
    }

    pub fn surface(&self, parent: &ParentRef) -> Option<&GroupSurface> {
        self.entries.get(parent).map(|state| &state.surface)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
