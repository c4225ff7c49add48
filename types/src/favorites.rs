use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Game ids marked as favorite on this client, independent of the
/// server-side `is_favorite` flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteIds(HashSet<String>);

impl FavoriteIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in a stable order, for persisting.
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.0.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteIds {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
