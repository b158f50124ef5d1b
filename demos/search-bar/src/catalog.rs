// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

/// Most suggestions a single lookup returns.
pub const MAX_RESULTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookInfo {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("query is blank")]
    BlankQuery,

    #[error("catalog is offline")]
    Offline,
}

/// In-memory stand-in for a remote book search service.
#[derive(Clone, Debug)]
pub struct BookCatalog {
    books: Vec<BookInfo>,
    online: bool,
}

impl BookCatalog {
    pub fn new(books: Vec<BookInfo>) -> Self {
        Self {
            books,
            online: true,
        }
    }

    pub fn with_titles(titles: &[&str]) -> Self {
        let books = titles
            .iter()
            .enumerate()
            .map(|(index, title)| BookInfo {
                id: format!("book-{}", index + 1),
                title: (*title).to_string(),
            })
            .collect();
        Self::new(books)
    }

    /// A catalog whose every lookup fails.
    #[cfg(test)]
    pub fn offline() -> Self {
        Self {
            books: Vec::new(),
            online: false,
        }
    }

    /// Case-insensitive title search, capped at [`MAX_RESULTS`].
    pub fn lookup(&self, query: &str) -> Result<Vec<BookInfo>, CatalogError> {
        if !self.online {
            return Err(CatalogError::Offline);
        }

        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(CatalogError::BlankQuery);
        }

        Ok(self
            .books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .take(MAX_RESULTS)
            .cloned()
            .collect())
    }
}
