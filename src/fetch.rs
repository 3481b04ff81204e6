use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::classify::{classify, ClassifiedError};
use crate::types::{ListKind, Repository};

/// Lifecycle of one list tab's data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TabLoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<Repository>),
    Failed(ClassifiedError),
}

/// A load the runtime has to perform and report back with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub kind: ListKind,
    pub login: String,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
    state: TabLoadState,
    in_flight: Option<u64>,
}

/// Issues at most one in-flight load per list tab and keeps the results.
///
/// Every request carries a generation number. A completion is only applied
/// when it matches the generation currently in flight for its tab, so a late
/// answer to a superseded request cannot overwrite newer state.
#[derive(Debug)]
pub struct FetchOrchestrator {
    login: String,
    slots: BTreeMap<ListKind, Slot>,
    next_generation: u64,
}

impl FetchOrchestrator {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            slots: ListKind::ALL.iter().map(|k| (*k, Slot::default())).collect(),
            next_generation: 1,
        }
    }

    pub fn state(&self, kind: ListKind) -> &TabLoadState {
        &self.slot(kind).state
    }

    /// Starts a load unless the tab is already loading or loaded.
    pub fn request_load(&mut self, kind: ListKind) -> Option<FetchRequest> {
        if matches!(
            self.slot(kind).state,
            TabLoadState::Loading | TabLoadState::Loaded(_)
        ) {
            return None;
        }
        Some(self.issue(kind))
    }

    /// Re-issues a load for a tab whose last load failed. No-op otherwise.
    pub fn retry(&mut self, kind: ListKind) -> Option<FetchRequest> {
        let retryable = matches!(
            &self.slot(kind).state,
            TabLoadState::Failed(err) if err.retryable
        );
        if !retryable {
            return None;
        }
        debug!(%kind, "retrying after failure");
        Some(self.issue(kind))
    }

    /// Applies a completed load. Returns whether the result was applied.
    pub fn on_completion(
        &mut self,
        kind: ListKind,
        generation: u64,
        result: std::result::Result<Vec<Repository>, String>,
    ) -> bool {
        let slot = self.slot_mut(kind);
        if slot.in_flight != Some(generation) {
            warn!(
                %kind,
                generation,
                in_flight = ?slot.in_flight,
                "dropping stale completion"
            );
            return false;
        }

        slot.in_flight = None;
        slot.state = match result {
            Ok(repos) => {
                debug!(%kind, count = repos.len(), "repositories loaded");
                TabLoadState::Loaded(repos)
            }
            Err(raw) => {
                warn!(%kind, error = %raw, "repository fetch failed");
                TabLoadState::Failed(classify(&raw))
            }
        };
        true
    }

    fn issue(&mut self, kind: ListKind) -> FetchRequest {
        let generation = self.next_generation;
        self.next_generation += 1;

        let slot = self.slot_mut(kind);
        slot.state = TabLoadState::Loading;
        slot.in_flight = Some(generation);

        debug!(%kind, generation, "fetch issued");
        FetchRequest {
            kind,
            login: self.login.clone(),
            generation,
        }
    }

    fn slot(&self, kind: ListKind) -> &Slot {
        // Every ListKind gets a slot in `new`.
        &self.slots[&kind]
    }

    fn slot_mut(&mut self, kind: ListKind) -> &mut Slot {
        self.slots.entry(kind).or_default()
    }
}
