use gloo_storage::{LocalStorage, Storage};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;

use crate::selector::WeightMap;

const FAVORITES_KEY: &str = "swipedeck_favorites";
const WEIGHTS_KEY: &str = "swipedeck_weights";
const HISTORY_KEY: &str = "swipedeck_history";
const TALLY_KEY: &str = "swipedeck_tally";

/// Key-value JSON persistence. Absence and failure both degrade to the
/// caller's default; the session keeps running on the in-memory copy.
pub trait Persistence {
    fn save<T: Serialize>(&self, key: &str, value: &T);
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T>;
}

impl<P: Persistence> Persistence for &P {
    fn save<T: Serialize>(&self, key: &str, value: &T) {
        P::save(self, key, value)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        P::load(self, key)
    }
}

/// Browser localStorage. Write failures are logged and swallowed; mutations
/// made while storage is unavailable live only for the session.
#[derive(Default)]
pub struct BrowserStore;

impl Persistence for BrowserStore {
    fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = LocalStorage::set(key, value) {
            warn!("Failed to persist {key}: {err}");
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        LocalStorage::get(key).ok()
    }
}

/// In-memory store used by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, serde_json::Value>>,
    saved_keys: RefCell<Vec<String>>,
}

impl MemoryStore {
    /// Keys written so far, in order, for asserting persist-per-mutation.
    pub fn saved_keys(&self) -> Vec<String> {
        self.saved_keys.borrow().clone()
    }
}

impl Persistence for MemoryStore {
    fn save<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.values.borrow_mut().insert(key.to_string(), json);
                self.saved_keys.borrow_mut().push(key.to_string());
            }
            Err(err) => warn!("Failed to persist {key}: {err}"),
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.values.borrow().get(key).cloned()?;
        serde_json::from_value(json).ok()
    }
}

/// User-owned mutable state: favorite flags, sampling weights, accepted
/// history, and the manual tally. Every mutation persists immediately; a
/// crash between mutation and write loses at most that mutation.
pub struct Preferences<S: Persistence> {
    store: S,
    favorites: HashSet<String>,
    weights: WeightMap,
    history: Vec<String>,
    tally: i64,
}

impl<S: Persistence> Preferences<S> {
    pub fn load(store: S) -> Self {
        let favorites: Vec<String> = store.load(FAVORITES_KEY).unwrap_or_default();
        let weights: WeightMap = store.load(WEIGHTS_KEY).unwrap_or_default();
        let history: Vec<String> = store.load(HISTORY_KEY).unwrap_or_default();
        let tally: i64 = store.load(TALLY_KEY).unwrap_or_default();
        Self {
            store,
            favorites: favorites.into_iter().collect(),
            weights,
            history,
            tally,
        }
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        self.favorites.contains(key)
    }

    pub fn favorites(&self) -> &HashSet<String> {
        &self.favorites
    }

    /// Flips membership and persists; returns the new state.
    pub fn toggle_favorite(&mut self, key: &str) -> bool {
        let favorite = if self.favorites.remove(key) {
            false
        } else {
            self.favorites.insert(key.to_string());
            true
        };
        let listed: Vec<&String> = self.favorites.iter().collect();
        self.store.save(FAVORITES_KEY, &listed);
        favorite
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn weight_of(&self, person: &str, default: u32) -> u32 {
        self.weights.get(person).copied().unwrap_or(default)
    }

    pub fn set_weight(&mut self, person: &str, weight: u32) {
        self.weights.insert(person.to_string(), weight);
        self.store.save(WEIGHTS_KEY, &self.weights);
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Appends to the accepted history; the first accept of a key wins and
    /// later accepts are no-ops. Returns whether the key was new.
    pub fn record_accept(&mut self, key: &str) -> bool {
        if self.history.iter().any(|seen| seen == key) {
            return false;
        }
        self.history.push(key.to_string());
        self.store.save(HISTORY_KEY, &self.history);
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.store.save(HISTORY_KEY, &self.history);
    }

    pub fn tally(&self) -> i64 {
        self.tally
    }

    pub fn tally_add(&mut self, delta: i64) {
        self.tally = self.tally.saturating_add(delta);
        self.store.save(TALLY_KEY, &self.tally);
    }

    pub fn tally_reset(&mut self) {
        self.tally = 0;
        self.store.save(TALLY_KEY, &self.tally);
    }
}
