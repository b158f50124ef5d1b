// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::catalog::{BookCatalog, BookInfo};
use coalesce::Debouncer;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Delay between the last keystroke and the lookup or clear it triggers.
pub const TYPING_PAUSE: Duration = Duration::from_millis(300);

/// A text input with a suggestion list fed by debounced catalog lookups.
pub struct SearchBar {
    input: Mutex<String>,
    suggestions: Arc<Mutex<Vec<BookInfo>>>,
    lookup: Debouncer<String, ()>,
    clear: Debouncer<(), ()>,
}

impl SearchBar {
    pub fn new(catalog: BookCatalog) -> coalesce::Result<Self> {
        let suggestions = Arc::new(Mutex::new(Vec::new()));

        let found = suggestions.clone();
        let lookup = Debouncer::builder(move |query: String| match catalog.lookup(&query) {
            Ok(books) => {
                println!("🔎 lookup {:?} -> {} suggestion(s)", query, books.len());
                *found.lock() = books;
            }
            Err(err) => println!("⚠️  lookup {:?} failed: {}", query, err),
        })
        .wait(TYPING_PAUSE)
        .build()?;

        let cleared = suggestions.clone();
        let clear = Debouncer::builder(move |()| {
            println!("🧹 suggestions cleared");
            cleared.lock().clear();
        })
        .wait(TYPING_PAUSE)
        .build()?;

        Ok(Self {
            input: Mutex::new(String::new()),
            suggestions,
            lookup,
            clear,
        })
    }

    /// Handles a change of the input's content.
    ///
    /// A non-empty input schedules a lookup, an empty one schedules clearing the
    /// suggestions. Whichever was scheduled for the other kind of input is dropped.
    pub fn handle_input(&self, content: &str) -> coalesce::Result<()> {
        *self.input.lock() = content.to_string();

        if content.is_empty() {
            self.lookup.cancel();
            self.clear.call(())?;
        } else {
            self.clear.cancel();
            self.lookup.call(content.to_string())?;
        }

        Ok(())
    }

    pub fn input(&self) -> String {
        self.input.lock().clone()
    }

    pub fn suggestions(&self) -> Vec<BookInfo> {
        self.suggestions.lock().clone()
    }

    pub fn lookups(&self) -> u64 {
        self.lookup.stats().invocations
    }
}
