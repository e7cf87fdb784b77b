// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Title sanitization pipeline.
//!
//! Every surviving item title runs through five stages in a fixed order:
//!
//! 1. [`strip_emojis`]
//! 2. [`replace_words`]
//! 3. [`replace_first_word`]
//! 4. [`style_words`]
//! 5. [`style_versions`]
//!
//! Text stages replace the first occurrence only. A stage whose setting is
//! empty leaves the title untouched.

use indexmap::IndexMap;

use crate::{
    error::Error,
    settings::{GeneratorSettings, TextStyle},
    version::style_versions
};

/// Runs the full pipeline over `title`.
///
/// # Errors
///
/// Returns [`Error::VersionResolution`] when the title contains a version
/// with more than three numeric groups.
///
/// # Examples
///
/// ```
/// use relnotes::{GeneratorSettings, sanitize};
///
/// let mut settings = GeneratorSettings::default();
/// settings.first_word_replacements.insert("Fix".into(), "Fixed".into());
/// settings.bolded_versions = true;
///
/// let title = sanitize("fix crash in v1.2", &settings)?;
/// assert_eq!(title, "Fixed crash in **v1.2.0**");
/// # Ok::<(), relnotes::Error>(())
/// ```
pub fn sanitize(title: &str, settings: &GeneratorSettings) -> Result<String, Error> {
    let title = strip_emojis(title, &settings.emojis_to_remove_from_title);
    let title = replace_words(&title, &settings.word_replacements);
    let title = replace_first_word(&title, &settings.first_word_replacements);
    let title = style_words(&title, &settings.styled_words_list);

    style_versions(&title, settings.version_style())
}

/// Removes the first occurrence of each emoji.
///
/// Surrounding whitespace is trimmed when at least one emoji was removed so
/// that a leading emoji does not leave an empty first word behind.
pub fn strip_emojis(title: &str, emojis: &[String]) -> String {
    let mut stripped = title.to_owned();
    let mut removed = false;

    for emoji in emojis.iter().filter(|emoji| !emoji.is_empty()) {
        if stripped.contains(emoji.as_str()) {
            stripped = stripped.replacen(emoji.as_str(), "", 1);
            removed = true;
        }
    }

    if removed {
        stripped.trim().to_owned()
    } else {
        stripped
    }
}

/// Replaces the first occurrence of each key with its value, in map order.
pub fn replace_words(title: &str, replacements: &IndexMap<String, String>) -> String {
    replacements
        .iter()
        .filter(|(from, _)| !from.is_empty())
        .fold(title.to_owned(), |text, (from, to)| text.replacen(from.as_str(), to, 1))
}

/// Capitalizes the first word and replaces it when the capitalized form
/// matches a key.
///
/// A first word with no matching key stays capitalized. The title is split
/// and rejoined on single spaces, so runs of spaces survive as empty words.
pub fn replace_first_word(title: &str, replacements: &IndexMap<String, String>) -> String {
    if replacements.is_empty() {
        return title.to_owned();
    }

    let mut words: Vec<String> = title.split(' ').map(str::to_owned).collect();
    let Some(first) = words.first_mut() else {
        return title.to_owned();
    };

    let capitalized = capitalize(first);
    *first = match replacements.get(capitalized.as_str()) {
        Some(replacement) => replacement.clone(),
        None => capitalized
    };
    words.join(" ")
}

/// Wraps the first occurrence of each configured word in Markdown emphasis.
///
/// Occurrences already wrapped in the same markers are left alone.
pub fn style_words(title: &str, styled_words: &IndexMap<String, String>) -> String {
    let mut styled = title.to_owned();

    for (word, styling) in styled_words {
        let style = TextStyle::parse(styling);
        if word.is_empty() || style.is_plain() {
            continue;
        }

        let Some(start) = styled.find(word.as_str()) else {
            continue;
        };
        let end = start + word.len();
        let (open, close) = style.markers();
        if styled[..start].ends_with(open) && styled[end..].starts_with(close) {
            continue;
        }

        styled.replace_range(start..end, &style.wrap(word));
    }

    styled
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
    }
}
