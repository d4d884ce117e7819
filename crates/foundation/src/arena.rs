use std::collections::BTreeMap;

/// Insertion-ordered storage addressed by index or by canonical key.
///
/// This is the lookup table used for cross-dataset joins: the datasets share
/// no identifiers, so units are found by their normalized key rather than
/// by reference. Inserting an existing key replaces the stored value in
/// place and keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedArena<T> {
    items: Vec<T>,
    index: BTreeMap<String, usize>,
}

impl<T> Default for KeyedArena<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T> KeyedArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot index of `key`.
    pub fn insert(&mut self, key: impl Into<String>, v: T) -> usize {
        let key = key.into();
        if let Some(&idx) = self.index.get(&key) {
            self.items[idx] = v;
            return idx;
        }
        self.items.push(v);
        let idx = self.items.len() - 1;
        self.index.insert(key, idx);
        idx
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn by_key(&self, key: &str) -> Option<&T> {
        self.index.get(key).and_then(|&idx| self.items.get(idx))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> FromIterator<(String, T)> for KeyedArena<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut arena = Self::new();
        for (k, v) in iter {
            arena.insert(k, v);
        }
        arena
    }
}
