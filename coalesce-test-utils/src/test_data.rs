// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Successive contents of a text input while `word` is typed one key at a time.
///
/// `keystrokes("abc")` yields `["a", "ab", "abc"]`.
pub fn keystrokes(word: &str) -> Vec<String> {
    word.char_indices()
        .map(|(index, ch)| word[..index + ch.len_utf8()].to_string())
        .collect()
}

pub fn query_a() -> String {
    "a".to_string()
}

pub fn query_ab() -> String {
    "ab".to_string()
}

pub fn query_abc() -> String {
    "abc".to_string()
}
