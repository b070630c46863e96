//! The owning collection of search engines.
//!
//! The manager is the single writer: engines live in its `Vec`, callers
//! mutate them through manager methods, and every mutation keeps the bang
//! index in sync before it returns. Reads hand out `&SearchEngine` and
//! positions; UI layers keep positions, not owned copies.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error};

use super::engine::SearchEngine;
use crate::config::{default_engines, EngineRecord, Settings};

/// Change notification emitted by [`SearchEngineManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerEvent {
    /// List-model style structural change: at `position`, `removed` engines
    /// were replaced by `added` engines.
    ItemsChanged {
        position: usize,
        removed: usize,
        added: usize,
    },
    /// A field of the engine at `position` changed.
    EngineChanged { position: usize },
    /// A different engine became the default.
    DefaultChanged { position: usize },
}

/// Handle for disconnecting an observer again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

type ObserverCallback = Box<dyn Fn(ManagerEvent) + Send + Sync>;

/// Ordered, never-empty collection of search engines with a default engine
/// and a bang index for shortcut lookups.
pub struct SearchEngineManager {
    engines: Vec<SearchEngine>,
    /// bang -> position of the owning engine. Only non-empty bangs are
    /// indexed; duplicates resolve to the later engine.
    bangs: HashMap<String, usize>,
    default_index: usize,
    observers: Vec<(ObserverId, ObserverCallback)>,
    next_observer_id: u64,
}

impl SearchEngineManager {
    /// Manager holding the built-in default engines.
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    /// Build the collection from persisted settings. An empty engine list
    /// falls back to the built-in defaults so the manager is never empty;
    /// an unknown default name falls back to the first engine in
    /// case-insensitive name order.
    pub fn from_settings(settings: &Settings) -> Self {
        let records = if settings.engines.is_empty() {
            default_engines()
        } else {
            settings.engines.clone()
        };
        let mut manager = Self {
            engines: records.iter().map(SearchEngine::from).collect(),
            bangs: HashMap::new(),
            default_index: 0,
            observers: Vec::new(),
            next_observer_id: 0,
        };
        manager.rebuild_bang_index();
        manager.default_index = manager
            .position_by_name(&settings.default_engine)
            .unwrap_or_else(|| manager.sorted_first_index());
        debug!(
            "loaded {} search engines, default is {}",
            manager.len(),
            manager.default_engine().name()
        );
        manager
    }

    /// Write the collection back into `settings`. Nothing in the manager
    /// saves implicitly; callers decide when to flush.
    pub fn save_to_settings(&self, settings: &mut Settings) {
        settings.engines = self.engines.iter().map(EngineRecord::from).collect();
        settings.default_engine = self.default_engine().name().to_owned();
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&SearchEngine> {
        self.engines.get(position)
    }

    pub fn engines(&self) -> impl Iterator<Item = &SearchEngine> {
        self.engines.iter()
    }

    pub fn find_engine_by_name(&self, name: &str) -> Option<&SearchEngine> {
        self.engines.iter().find(|engine| engine.name() == name)
    }

    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.engines.iter().position(|engine| engine.name() == name)
    }

    /// Register an observer for [`ManagerEvent`]s.
    pub fn connect(
        &mut self,
        callback: impl Fn(ManagerEvent) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously connected observer. Returns whether it was still
    /// connected.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Append `engine` and index its bang. The first engine ever added
    /// becomes the default; adding never changes an existing default.
    pub fn add_engine(&mut self, engine: SearchEngine) -> usize {
        let position = self.engines.len();
        let first = self.engines.is_empty();
        self.engines.push(engine);
        self.rebuild_bang_index();
        self.emit(ManagerEvent::ItemsChanged {
            position,
            removed: 0,
            added: 1,
        });
        if first {
            self.default_index = 0;
            self.emit(ManagerEvent::DefaultChanged { position: 0 });
        }
        position
    }

    /// Remove the engine at `position` and return it.
    ///
    /// Removing the last remaining engine is a caller bug: the collection
    /// must never become empty. When that happens the call is refused.
    pub fn delete_engine(&mut self, position: usize) -> Option<SearchEngine> {
        debug_assert!(
            self.engines.len() > 1,
            "refusing to delete the last search engine"
        );
        if self.engines.len() <= 1 {
            error!("refusing to delete the last search engine");
            return None;
        }
        if position >= self.engines.len() {
            return None;
        }

        let engine = self.engines.remove(position);
        self.rebuild_bang_index();

        let mut default_changed = false;
        if position == self.default_index {
            // The default went away; fall back to the first engine in
            // case-insensitive name order, which is stable and predictable.
            self.default_index = self.sorted_first_index();
            default_changed = true;
        } else if position < self.default_index {
            self.default_index -= 1;
        }

        self.emit(ManagerEvent::ItemsChanged {
            position,
            removed: 1,
            added: 0,
        });
        if default_changed {
            self.emit(ManagerEvent::DefaultChanged {
                position: self.default_index,
            });
        }
        Some(engine)
    }

    pub fn default_engine(&self) -> &SearchEngine {
        // default_index is kept valid by every mutation.
        &self.engines[self.default_index]
    }

    pub fn default_position(&self) -> usize {
        self.default_index
    }

    pub fn set_default_engine(&mut self, position: usize) {
        debug_assert!(position < self.engines.len(), "engine position out of range");
        if position >= self.engines.len() || position == self.default_index {
            return;
        }
        self.default_index = position;
        self.emit(ManagerEvent::DefaultChanged { position });
    }

    /// Rename the engine at `position`. Returns whether anything changed.
    pub fn set_engine_name(&mut self, position: usize, name: &str) -> bool {
        let Some(engine) = self.engines.get_mut(position) else {
            return false;
        };
        if !engine.set_name(name) {
            return false;
        }
        self.emit(ManagerEvent::EngineChanged { position });
        true
    }

    /// Change the search address of the engine at `position`.
    pub fn set_engine_url(&mut self, position: usize, url: &str) -> bool {
        let Some(engine) = self.engines.get_mut(position) else {
            return false;
        };
        if !engine.set_url(url) {
            return false;
        }
        self.emit(ManagerEvent::EngineChanged { position });
        true
    }

    /// Change the bang of the engine at `position`, keeping the bang index
    /// in step with the collection.
    pub fn set_engine_bang(&mut self, position: usize, bang: &str) -> bool {
        let Some(engine) = self.engines.get_mut(position) else {
            return false;
        };
        if !engine.set_bang(bang) {
            return false;
        }
        self.rebuild_bang_index();
        self.emit(ManagerEvent::EngineChanged { position });
        true
    }

    /// Stable case-insensitive sort by name. The default engine follows its
    /// new position.
    pub fn sort_by_name(&mut self) {
        let count = self.engines.len();
        let old_default = self.default_index;

        let mut tagged: Vec<(usize, SearchEngine)> =
            std::mem::take(&mut self.engines).into_iter().enumerate().collect();
        tagged.sort_by(|(_, a), (_, b)| {
            a.name().to_lowercase().cmp(&b.name().to_lowercase())
        });
        self.default_index = tagged
            .iter()
            .position(|(original, _)| *original == old_default)
            .unwrap_or(0);
        self.engines = tagged.into_iter().map(|(_, engine)| engine).collect();

        self.rebuild_bang_index();
        self.emit(ManagerEvent::ItemsChanged {
            position: 0,
            removed: count,
            added: count,
        });
    }

    /// O(1) lookup for whether any engine uses `bang`. The empty string is
    /// never a bang.
    pub fn has_bang(&self, bang: &str) -> bool {
        self.bangs.contains_key(bang)
    }

    /// Search address for the engine called `name`, or `None` when there is
    /// no such engine.
    pub fn build_search_address(&self, name: &str, query: &str) -> Option<String> {
        self.find_engine_by_name(name)
            .map(|engine| engine.build_search_address(query))
    }

    /// Resolve a bang search like `!w rust borrow checker`.
    ///
    /// The trimmed text is split on single spaces, so runs of spaces inside
    /// the query survive as empty tokens. The rightmost token matching a
    /// known bang picks the engine (the bang typed last is the one meant);
    /// every bang token is dropped from the query, and the rest is rejoined
    /// the way it was typed. Returns `None` when the text has fewer than two
    /// tokens or names no known bang.
    pub fn parse_bang_search(&self, search: &str) -> Option<String> {
        let words: Vec<&str> = search.trim().split(' ').collect();
        if words.len() < 2 {
            return None;
        }

        let engine_position = words
            .iter()
            .rev()
            .find_map(|word| self.bangs.get(*word).copied())?;

        let query = words
            .iter()
            .copied()
            .filter(|word| !self.bangs.contains_key(*word))
            .collect::<Vec<_>>()
            .join(" ");

        self.engines
            .get(engine_position)
            .map(|engine| engine.build_search_address(&query))
    }

    fn rebuild_bang_index(&mut self) {
        self.bangs.clear();
        for (position, engine) in self.engines.iter().enumerate() {
            if !engine.bang().is_empty() {
                self.bangs.insert(engine.bang().to_owned(), position);
            }
        }
    }

    fn sorted_first_index(&self) -> usize {
        self.engines
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
            .map(|(position, _)| position)
            .unwrap_or(0)
    }

    fn emit(&self, event: ManagerEvent) {
        for (_, callback) in &self.observers {
            callback(event);
        }
    }
}

impl Default for SearchEngineManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SearchEngineManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngineManager")
            .field("engines", &self.engines)
            .field("default_index", &self.default_index)
            .finish_non_exhaustive()
    }
}
