//! Enum catalog listings, served from the [`ReferenceCache`] without touching the store.

use crate::cache::{EnumKind, ReferenceCache};
use crate::models::StringList;

pub struct EnumQuery<'a> {
    cache: &'a ReferenceCache,
}

impl<'a> EnumQuery<'a> {
    pub fn new(cache: &'a ReferenceCache) -> Self {
        Self { cache }
    }

    /// Labels of one enum, in ascending order.
    pub fn list(&self, kind: EnumKind) -> StringList {
        StringList::from(self.cache.enum_values(kind).to_vec())
    }

    /// Every enum, in [`EnumKind::ALL`] order.
    pub fn all(&self) -> Vec<(EnumKind, StringList)> {
        EnumKind::ALL
            .into_iter()
            .map(|kind| (kind, self.list(kind)))
            .collect()
    }

    pub fn contains(&self, kind: EnumKind, value: &str) -> bool {
        self.cache.enum_contains(kind, &kind.canonicalize(value))
    }
}
