//! Caller-owned memoization of path profiles.
//!
//! Profile builders are pure. Callers that rebuild the same path data often
//! can keep a [`PathProfileCache`] and share the resulting profiles.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::geometry::CurveProfile;
use crate::operations::profile::PathProfile;

/// Profiles keyed by the path data they were built from.
#[derive(Debug, Default)]
pub struct PathProfileCache {
    entries: HashMap<String, Arc<CurveProfile>>,
}

impl PathProfileCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the profile for `data`, building it on first use.
    pub fn get_or_build(&mut self, data: &str) -> Arc<CurveProfile> {
        if let Some(profile) = self.entries.get(data) {
            return Arc::clone(profile);
        }
        trace!(len = data.len(), "building path profile");
        let profile = Arc::new(PathProfile::new(data).execute());
        self.entries.insert(data.to_owned(), Arc::clone(&profile));
        profile
    }

    /// Returns the cached profile for `data` without building it.
    #[must_use]
    pub fn get(&self, data: &str) -> Option<Arc<CurveProfile>> {
        self.entries.get(data).cloned()
    }

    /// Drops the entry for `data`, returning it if present.
    pub fn remove(&mut self, data: &str) -> Option<Arc<CurveProfile>> {
        self.entries.remove(data)
    }

    /// Drops every cached profile.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of cached profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
