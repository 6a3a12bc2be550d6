//! Run-scoped registry mapping product descriptions to small integers.
//!
//! Every genome task resolves products through one shared [`FeatureVocabulary`]
//! so that identical products across genomes collapse onto the same feature
//! identity. Integers for novel products are handed out first-come,
//! first-served and are only meaningful within a single run.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Uninformative product label pinned to integer 0
pub const PLACEHOLDER_PRODUCT: &str = "hypothetical protein";

#[derive(Debug, Default)]
struct Entries {
    ids: HashMap<String, usize>,
    products: Vec<String>,
}

/// Concurrency-safe product vocabulary
#[derive(Debug)]
pub struct FeatureVocabulary {
    entries: Mutex<Entries>,
}

impl FeatureVocabulary {
    /// Create a vocabulary seeded with [`PLACEHOLDER_PRODUCT`] at 0
    pub fn new() -> Self {
        let vocabulary = Self {
            entries: Mutex::new(Entries::default()),
        };
        vocabulary.resolve(PLACEHOLDER_PRODUCT);
        vocabulary
    }

    // Entries are only mutated by `resolve`, which cannot panic between its
    // two inserts, so a poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Integer for `product`, assigning the next free one if it is new.
    ///
    /// Lookup and insertion happen under one lock, so concurrent callers never
    /// assign two integers to the same product or one integer to two products.
    pub fn resolve(&self, product: &str) -> usize {
        let mut entries = self.lock();
        if let Some(&id) = entries.ids.get(product) {
            return id;
        }

        let id = entries.products.len();
        entries.ids.insert(product.to_string(), id);
        entries.products.push(product.to_string());
        id
    }

    /// Integer already assigned to `product`, if any
    pub fn get(&self, product: &str) -> Option<usize> {
        self.lock().ids.get(product).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().products.is_empty()
    }

    /// Products ordered by their assigned integer
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().products.clone()
    }
}

impl Default for FeatureVocabulary {
    fn default() -> Self {
        Self::new()
    }
}
