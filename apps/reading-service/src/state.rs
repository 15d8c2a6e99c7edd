// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::ProgressStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ProgressStore>>,
}

impl AppState {
    pub fn new(store: ProgressStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProgressStore::new())
    }
}
