//! Active filter state.
//!
//! The selector builds every registered filter once and keeps the
//! identifier of the one in use. Selection only swaps the identifier;
//! filters themselves are never rebuilt.

use std::collections::HashMap;

use cameo_core::{BitDepth, Frame};
use tracing::{debug, info, warn};

use crate::filter::{Filter, FilterId};
use crate::{OpsError, OpsResult};

/// Maps identifiers to built filters and tracks the active one.
#[derive(Debug, Clone)]
pub struct FilterSelector {
    filters: HashMap<FilterId, Filter>,
    active: FilterId,
}

impl FilterSelector {
    /// Builds every filter in [`FilterId::ALL`] for `depth`, with `initial` active.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_core::BitDepth;
    /// use cameo_ops::{FilterId, FilterSelector};
    ///
    /// let mut sel = FilterSelector::new(BitDepth::U8, FilterId::Portra).unwrap();
    /// sel.select("emboss").unwrap();
    /// assert_eq!(sel.active(), FilterId::Emboss);
    ///
    /// assert!(sel.select("sepia").is_err());
    /// assert_eq!(sel.active(), FilterId::Emboss);
    /// ```
    pub fn new(depth: BitDepth, initial: FilterId) -> OpsResult<Self> {
        let mut filters = HashMap::with_capacity(FilterId::ALL.len());
        for id in FilterId::ALL {
            filters.insert(id, id.build(depth)?);
        }
        debug!(count = filters.len(), ?depth, "registered filters");
        Ok(Self {
            filters,
            active: initial,
        })
    }

    /// Selector over an explicit set of filters.
    ///
    /// # Errors
    ///
    /// [`OpsError::UnknownFilter`] if `initial` is not among `filters`.
    pub fn with_filters(
        filters: impl IntoIterator<Item = (FilterId, Filter)>,
        initial: FilterId,
    ) -> OpsResult<Self> {
        let filters: HashMap<_, _> = filters.into_iter().collect();
        if !filters.contains_key(&initial) {
            return Err(OpsError::UnknownFilter(initial.to_string()));
        }
        Ok(Self {
            filters,
            active: initial,
        })
    }

    /// Currently active identifier.
    #[inline]
    pub fn active(&self) -> FilterId {
        self.active
    }

    /// The active filter.
    pub fn active_filter(&self) -> Option<&Filter> {
        self.filters.get(&self.active)
    }

    /// `true` if `id` is registered.
    pub fn contains(&self, id: FilterId) -> bool {
        self.filters.contains_key(&id)
    }

    /// Registered identifiers in key order.
    pub fn ids(&self) -> Vec<FilterId> {
        let mut ids: Vec<_> = self.filters.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Makes the filter named `name` active.
    ///
    /// # Errors
    ///
    /// [`OpsError::UnknownFilter`] if the name is not registered; the active
    /// filter stays as it was.
    pub fn select(&mut self, name: &str) -> OpsResult<FilterId> {
        let id = match name.parse::<FilterId>() {
            Ok(id) => id,
            Err(e) => {
                warn!(name, "rejected unknown filter");
                return Err(e);
            }
        };
        self.select_id(id)?;
        Ok(id)
    }

    /// Makes `id` active.
    ///
    /// # Errors
    ///
    /// [`OpsError::UnknownFilter`] if `id` is not registered.
    pub fn select_id(&mut self, id: FilterId) -> OpsResult<()> {
        if !self.filters.contains_key(&id) {
            warn!(%id, "rejected unregistered filter");
            return Err(OpsError::UnknownFilter(id.to_string()));
        }
        self.active = id;
        info!(filter = %id, "active filter");
        Ok(())
    }

    /// Runs the active filter on `frame` in place.
    pub fn apply_active(&self, frame: &mut Frame) -> OpsResult<()> {
        match self.filters.get(&self.active) {
            Some(filter) => filter.apply_in_place(frame),
            None => Err(OpsError::UnknownFilter(self.active.to_string())),
        }
    }
}
