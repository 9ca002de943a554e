// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transitive expansion of downstream published-file links.

use crate::error::EngineError;
use sgf_adapters::TrackingStore;
use sgf_core::{EntityRef, TrackedFile};
use std::collections::HashSet;
use std::sync::Arc;

/// Walks `downstream_published_files` breadth first.
///
/// Each level is fetched with one batched query. Identifiers are visited at
/// most once, so cyclic graphs terminate and a record reachable through
/// several parents is returned once.
#[derive(Clone)]
pub struct DependencyResolver {
    store: Arc<dyn TrackingStore>,
}

impl DependencyResolver {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        Self { store }
    }

    pub async fn expand(&self, refs: &[EntityRef]) -> Result<Vec<TrackedFile>, EngineError> {
        let mut visited = HashSet::new();
        let mut level: Vec<i64> = refs.iter().map(|r| r.id).filter(|id| visited.insert(*id)).collect();
        let mut expanded = Vec::new();

        while !level.is_empty() {
            let records = self.store.find_tracked_files(&level).await?;
            tracing::debug!(queried = level.len(), found = records.len(), "expanded dependency level");

            level = records
                .iter()
                .flat_map(|record| record.downstream.iter())
                .map(|r| r.id)
                .filter(|id| visited.insert(*id))
                .collect();
            expanded.extend(records);
        }
        Ok(expanded)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
