// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Search Bar Demo
//!
//! Replays a user typing into a search box. Each keystroke changes the input;
//! lookups against the catalog are debounced so that only a pause in typing
//! reaches the catalog, and deleting the whole query clears the suggestions
//! after the same pause.

mod catalog;
mod search_bar;

use crate::catalog::BookCatalog;
use crate::search_bar::{SearchBar, TYPING_PAUSE};
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;

/// Input content after each keystroke, and the delay before the next one.
const SCRIPT: &[(&str, u64)] = &[
    ("m", 120),
    ("ma", 90),
    ("mat", 110),
    ("math", 450),
    ("math ", 80),
    ("math b", 100),
    ("math bo", 60),
    ("math boo", 70),
    ("math book", 500),
    ("math boo", 50),
    ("math bo", 40),
    ("math b", 40),
    ("math ", 40),
    ("math", 40),
    ("mat", 40),
    ("ma", 40),
    ("m", 40),
    ("", 400),
    ("rust", 400),
];

fn catalog() -> BookCatalog {
    BookCatalog::with_titles(&[
        "Math book",
        "Math book 2",
        "Applied Mathematics",
        "Discrete Math",
        "Math for Programmers",
        "Mathematical Logic",
        "Rust in Action",
        "Programming Rust",
        "The Rust Programming Language",
        "Zero To Production In Rust",
    ])
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("🚀 Search Bar Demo Starting...\n");
    println!(
        "⌨️  Replaying {} keystrokes, lookups wait for a {:?} pause\n",
        SCRIPT.len(),
        TYPING_PAUSE
    );
    println!("{}", "=".repeat(80));

    let search_bar = SearchBar::new(catalog())?;

    for &(content, pause_ms) in SCRIPT {
        search_bar.handle_input(content)?;
        println!("⌨️  input: {:?}", search_bar.input());
        sleep(Duration::from_millis(pause_ms)).await;

        let suggestions = search_bar.suggestions();
        if !suggestions.is_empty() {
            let titles: Vec<_> = suggestions.iter().map(|book| book.title.as_str()).collect();
            println!("📚 suggestions: {}", titles.join(" | "));
        }
    }

    sleep(TYPING_PAUSE + Duration::from_millis(50)).await;

    println!("{}", "=".repeat(80));
    println!(
        "✅ {} keystrokes produced {} catalog lookup(s)",
        SCRIPT.len(),
        search_bar.lookups()
    );

    Ok(())
}
