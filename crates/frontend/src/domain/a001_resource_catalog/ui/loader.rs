//! Catalog load lifecycle shared by the directory and home pages.

use crate::shared::api_utils::fetch_catalog;
use contracts::domain::a001_resource_catalog::{Catalog, LoadError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Failed(LoadError),
    Ready(Arc<Catalog>),
}

/// Monotonic load counter: a result is applied only if no newer load was
/// started after it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[derive(Clone, Copy)]
pub struct CatalogLoader {
    pub state: RwSignal<LoadState>,
    generation: StoredValue<LoadGeneration>,
    url: StoredValue<String>,
}

impl CatalogLoader {
    pub fn new(url: String) -> Self {
        Self {
            state: RwSignal::new(LoadState::Loading),
            generation: StoredValue::new(LoadGeneration::default()),
            url: StoredValue::new(url),
        }
    }

    /// Start a load (or retry). `on_ready` runs before the state flips to
    /// `Ready`, so views built from the new state see its side effects.
    pub fn load(self, on_ready: Callback<Arc<Catalog>>) {
        let mut ticket = 0;
        self.generation.update_value(|g| ticket = g.begin());
        self.state.set(LoadState::Loading);

        let url = self.url.get_value();
        spawn_local(async move {
            let result = fetch_catalog(&url).await;

            if !self.generation.with_value(|g| g.is_current(ticket)) {
                log::debug!("Discarding stale catalog load #{}", ticket);
                return;
            }

            match result {
                Ok(catalog) => {
                    let catalog = Arc::new(catalog);
                    on_ready.run(catalog.clone());
                    self.state.set(LoadState::Ready(catalog));
                }
                Err(err) => {
                    log::error!("资源加载错误: {} ({})", err, err.cause());
                    self.state.set(LoadState::Failed(err));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_load_is_current() {
        let mut generation = LoadGeneration::default();
        let first = generation.begin();
        let retry = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(retry));
    }
}
