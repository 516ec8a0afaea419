//! Shared application state

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::schedule::SelectionStore;
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use rand::Rng;

/// State handed to every request handler.
pub struct AppState {
    pub catalog: Catalog,
    pub config: AppConfig,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(catalog: Catalog, config: AppConfig) -> Self {
        Self {
            catalog,
            config,
            sessions: SessionRegistry::default(),
        }
    }
}

/// Independent timetable drafts keyed by session id.
///
/// Each draft has exactly one owner at a time: handlers take the entry's
/// write guard for the duration of one operation.
#[derive(Default)]
pub struct SessionRegistry {
    stores: DashMap<String, SelectionStore>,
}

impl SessionRegistry {
    /// Starts an empty draft and returns its id.
    pub fn create(&self, store: SelectionStore) -> String {
        loop {
            let id = format!("{:032x}", rand::thread_rng().gen::<u128>());
            if !self.stores.contains_key(&id) {
                self.stores.insert(id.clone(), store);
                return id;
            }
        }
    }

    /// Exclusive access to one draft.
    pub fn get_mut(&self, id: &str) -> Option<RefMut<'_, String, SelectionStore>> {
        self.stores.get_mut(id)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.stores.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_independent() {
        let registry = SessionRegistry::default();
        let a = registry.create(SelectionStore::new());
        let b = registry.create(SelectionStore::new());
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        registry.get_mut(&a).unwrap().clear();
        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
        assert!(registry.get_mut(&b).is_some());
    }
}
