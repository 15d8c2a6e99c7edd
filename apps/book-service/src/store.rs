// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! In-memory book catalog.
//!
//! Books get monotonically increasing ids. Uploaded text content is kept
//! beside the catalog record as a list of pages.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Characters per page when paginating uploaded text.
pub const PAGE_SIZE_CHARS: usize = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub year: i32,
    pub pages: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub year: i32,
    #[serde(default)]
    pub pages: i64,
    #[serde(default)]
    pub cover_url: Option<String>,
}

#[derive(Default)]
pub struct BookStore {
    books: BTreeMap<i64, Book>,
    contents: HashMap<i64, Vec<String>>,
    next_id: i64,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalog with two classics, as long as it is empty.
    pub fn seed_if_empty(&mut self) {
        if !self.books.is_empty() {
            return;
        }

        self.create(BookCreate {
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            description: "A dystopia of a totalitarian future.".to_string(),
            year: 1949,
            pages: 328,
            cover_url: Some("https://covers.openlibrary.org/b/id/7222246-L.jpg".to_string()),
        });
        self.create(BookCreate {
            title: "The Master and Margarita".to_string(),
            author: "Mikhail Bulgakov".to_string(),
            description: "A mystical novel of good and evil.".to_string(),
            year: 1967,
            pages: 480,
            cover_url: Some("https://covers.openlibrary.org/b/id/8231856-L.jpg".to_string()),
        });
    }

    pub fn list(&self) -> Vec<Book> {
        self.books.values().cloned().collect()
    }

    pub fn get(&self, book_id: i64) -> Result<Book, ApiError> {
        self.books
            .get(&book_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Book not found"))
    }

    pub fn create(&mut self, book: BookCreate) -> Book {
        self.next_id += 1;
        let book = Book {
            id: self.next_id,
            title: book.title,
            author: book.author,
            description: book.description,
            year: book.year,
            pages: book.pages,
            cover_url: book.cover_url,
        };
        self.books.insert(book.id, book.clone());
        book
    }

    pub fn update(&mut self, book_id: i64, data: BookCreate) -> Result<Book, ApiError> {
        let book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| ApiError::not_found("Book not found"))?;

        book.title = data.title;
        book.author = data.author;
        book.description = data.description;
        book.year = data.year;
        book.pages = data.pages;
        book.cover_url = data.cover_url;
        Ok(book.clone())
    }

    pub fn delete(&mut self, book_id: i64) -> Result<(), ApiError> {
        if self.books.remove(&book_id).is_none() {
            return Err(ApiError::not_found("Book not found"));
        }
        self.contents.remove(&book_id);
        Ok(())
    }

    /// Attach paginated text content to an existing book.
    pub fn set_content(&mut self, book_id: i64, pages: Vec<String>) {
        self.contents.insert(book_id, pages);
    }

    pub fn content(&self, book_id: i64) -> Result<Vec<String>, ApiError> {
        self.contents
            .get(&book_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Content not found"))
    }
}

/// Split text into fixed-size pages, counting characters rather than bytes
/// so multi-byte text never splits mid-character.
pub fn paginate(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(PAGE_SIZE_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> BookCreate {
        BookCreate {
            title: "Title".to_string(),
            author: "Author".to_string(),
            description: "Description".to_string(),
            year: 2020,
            pages: 100,
            cover_url: None,
        }
    }

    #[test]
    fn ids_are_monotonic() {
        let mut store = BookStore::new();
        let first = store.create(sample_book());
        let second = store.create(sample_book());
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn seed_adds_two_books_once() {
        let mut store = BookStore::new();
        store.seed_if_empty();
        assert_eq!(store.list().len(), 2);

        // Seeding again is a no-op.
        store.seed_if_empty();
        assert_eq!(store.list().len(), 2);

        let titles: Vec<String> = store.list().into_iter().map(|b| b.title).collect();
        assert!(titles.contains(&"1984".to_string()));
    }

    #[test]
    fn get_update_delete_miss_returns_not_found() {
        let mut store = BookStore::new();
        assert!(store.get(99).is_err());
        assert!(store.update(99, sample_book()).is_err());
        assert!(store.delete(99).is_err());
    }

    #[test]
    fn update_replaces_all_fields() {
        let mut store = BookStore::new();
        let book = store.create(sample_book());

        let mut data = sample_book();
        data.title = "New Title".to_string();
        data.pages = 250;

        let updated = store.update(book.id, data).unwrap();
        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.pages, 250);
        assert_eq!(store.get(book.id).unwrap(), updated);
    }

    #[test]
    fn delete_removes_content_too() {
        let mut store = BookStore::new();
        let book = store.create(sample_book());
        store.set_content(book.id, vec!["page one".to_string()]);

        store.delete(book.id).unwrap();
        assert!(store.content(book.id).is_err());
    }

    #[test]
    fn paginate_splits_on_character_count() {
        let text = "a".repeat(PAGE_SIZE_CHARS * 2 + 10);
        let pages = paginate(&text);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].chars().count(), PAGE_SIZE_CHARS);
        assert_eq!(pages[2].chars().count(), 10);
    }

    #[test]
    fn paginate_counts_chars_not_bytes() {
        // Multi-byte characters; a byte-based split would panic or tear them.
        let text = "я".repeat(PAGE_SIZE_CHARS + 1);
        let pages = paginate(&text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].chars().count(), PAGE_SIZE_CHARS);
    }

    #[test]
    fn paginate_empty_text_has_no_pages() {
        assert!(paginate("").is_empty());
    }
}
