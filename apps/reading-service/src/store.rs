// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! In-memory reading progress store.
//!
//! Progress is unique per `(user_id, book_id)`: starting or stopping a
//! reading session upserts the current page for that pair.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingProgress {
    pub id: i64,
    pub user_id: String,
    pub book_id: i64,
    pub current_page: i64,
}

#[derive(Default)]
pub struct ProgressStore {
    progress: HashMap<(String, i64), ReadingProgress>,
    next_id: i64,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update the progress row for `(user_id, book_id)`.
    pub fn upsert(&mut self, user_id: String, book_id: i64, page: i64) -> ReadingProgress {
        let key = (user_id.clone(), book_id);
        match self.progress.get_mut(&key) {
            Some(existing) => {
                existing.current_page = page;
                existing.clone()
            }
            None => {
                self.next_id += 1;
                let row = ReadingProgress {
                    id: self.next_id,
                    user_id,
                    book_id,
                    current_page: page,
                };
                self.progress.insert(key, row.clone());
                row
            }
        }
    }

    /// All progress rows for one user, ordered by id for stable output.
    pub fn for_user(&self, user_id: &str) -> Vec<ReadingProgress> {
        let mut rows: Vec<ReadingProgress> = self
            .progress
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.id);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_creates_then_updates() {
        let mut store = ProgressStore::new();

        let created = store.upsert("user-1".to_string(), 7, 10);
        assert_eq!(created.current_page, 10);

        let updated = store.upsert("user-1".to_string(), 7, 25);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.current_page, 25);

        assert_eq!(store.for_user("user-1").len(), 1);
    }

    #[test]
    fn progress_is_scoped_per_user_and_book() {
        let mut store = ProgressStore::new();
        store.upsert("user-1".to_string(), 7, 10);
        store.upsert("user-1".to_string(), 8, 3);
        store.upsert("user-2".to_string(), 7, 99);

        let rows = store.for_user("user-1");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.user_id == "user-1"));

        assert_eq!(store.for_user("user-2").len(), 1);
        assert!(store.for_user("user-3").is_empty());
    }
}
