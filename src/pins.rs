use anyhow::{Context, Result};

use crate::store::KeyValueStore;

pub const PIN_KEY: &str = "pinnedPlayers_v1";

/// Pinned player names in the order they were pinned. Never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinSet {
    order: Vec<String>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list, keeping the first occurrence of each name.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.pin(name);
        }
        set
    }

    /// Reads the persisted list. Missing or corrupt entries give an empty set.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        store
            .get(PIN_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .map(Self::from_names)
            .unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.order).context("encode pins")?;
        store.set(PIN_KEY, &json)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.order.iter().any(|p| p == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|p| p == name)
    }

    /// Returns false when the name was already pinned.
    pub fn pin(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.order.push(name);
        true
    }

    pub fn unpin(&mut self, name: &str) -> bool {
        let before = self.order.len();
        self.order.retain(|p| p != name);
        self.order.len() != before
    }

    /// Pins or unpins; returns whether the player is pinned afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.unpin(name) {
            false
        } else {
            self.pin(name)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}
