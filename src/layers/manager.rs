use super::marker::{Marker, MarkerHandle};
use crate::prelude::{HashMap, HashSet};
use crate::providers::{Place, PlaceId};

/// What a reconcile changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    pub added: Vec<PlaceId>,
    pub removed: Vec<PlaceId>,
    pub kept: Vec<PlaceId>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Markers for the current result set, keyed by place id
pub struct MarkerSet {
    /// All markers indexed by place id
    markers: HashMap<PlaceId, Marker>,
    /// Place ids in provider order
    order: Vec<PlaceId>,
    next_handle: u64,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self {
            markers: HashMap::default(),
            order: Vec::new(),
            next_handle: 1,
        }
    }

    /// Brings the set in line with `places`.
    ///
    /// Ids already present keep their marker (and handle); new ids get a new
    /// marker; ids no longer present are dropped. Order follows `places`. A
    /// repeated id keeps its first occurrence.
    pub fn reconcile(&mut self, places: &[Place]) -> MarkerDiff {
        let mut diff = MarkerDiff::default();
        let mut order = Vec::with_capacity(places.len());
        let mut seen = HashSet::default();

        for place in places {
            if !seen.insert(place.id.clone()) {
                log::warn!("duplicate place id {} in result set, skipping", place.id);
                continue;
            }

            match self.markers.get_mut(&place.id) {
                Some(marker) => {
                    marker.update_from(place);
                    diff.kept.push(place.id.clone());
                }
                None => {
                    let handle = MarkerHandle(self.next_handle);
                    self.next_handle += 1;
                    self.markers.insert(place.id.clone(), Marker::new(handle, place));
                    diff.added.push(place.id.clone());
                }
            }
            order.push(place.id.clone());
        }

        for id in &self.order {
            if !seen.contains(id) {
                self.markers.remove(id);
                diff.removed.push(id.clone());
            }
        }

        self.order = order;
        log::debug!(
            "markers reconciled: {} added, {} removed, {} kept",
            diff.added.len(),
            diff.removed.len(),
            diff.kept.len()
        );
        diff
    }

    pub fn get(&self, id: &PlaceId) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.markers.contains_key(id)
    }

    /// Markers in provider order
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.order.iter().filter_map(|id| self.markers.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new()
    }
}
