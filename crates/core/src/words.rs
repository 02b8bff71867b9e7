// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell-style word splitting for free-form command strings.
//!
//! Splits a raw command into an argument vector without invoking a shell:
//! whitespace separates words, single quotes preserve everything literally,
//! double quotes allow a small set of backslash escapes, and a backslash
//! outside quotes escapes the next character.

use thiserror::Error;

/// Errors that can occur while splitting a free-form command string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// A single-quoted section was never closed.
    #[error("unterminated single quote at position {pos}")]
    UnterminatedSingleQuote {
        /// Byte offset of the opening quote.
        pos: usize,
    },

    /// A double-quoted section was never closed.
    #[error("unterminated double quote at position {pos}")]
    UnterminatedDoubleQuote {
        /// Byte offset of the opening quote.
        pos: usize,
    },

    /// The string ends with a bare backslash.
    #[error("trailing backslash at end of command")]
    TrailingBackslash,
}

/// Split a free-form command string into words.
///
/// Empty quoted strings produce empty words (`a '' b` splits into three
/// words); runs of unquoted whitespace separate words and are discarded.
pub fn split(input: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                read_single_quoted(&mut chars, &mut current, pos)?;
            }
            '"' => {
                in_word = true;
                read_double_quoted(&mut chars, &mut current, pos)?;
            }
            '\\' => match chars.next() {
                Some((_, escaped)) => {
                    in_word = true;
                    current.push(escaped);
                }
                None => return Err(SplitError::TrailingBackslash),
            },
            _ => {
                in_word = true;
                current.push(ch);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Consume characters up to the closing single quote, copying them verbatim.
fn read_single_quoted<I>(chars: &mut I, out: &mut String, start: usize) -> Result<(), SplitError>
where
    I: Iterator<Item = (usize, char)>,
{
    for (_, ch) in chars.by_ref() {
        if ch == '\'' {
            return Ok(());
        }
        out.push(ch);
    }
    Err(SplitError::UnterminatedSingleQuote { pos: start })
}

/// Consume characters up to the closing double quote.
///
/// Inside double quotes a backslash escapes only `\`, `"`, `$` and a
/// backtick; before any other character it is kept literally.
fn read_double_quoted<I>(chars: &mut I, out: &mut String, start: usize) -> Result<(), SplitError>
where
    I: Iterator<Item = (usize, char)>,
{
    while let Some((_, ch)) = chars.next() {
        match ch {
            '"' => return Ok(()),
            '\\' => match chars.next() {
                Some((_, escaped @ ('\\' | '"' | '$' | '`'))) => out.push(escaped),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return Err(SplitError::UnterminatedDoubleQuote { pos: start }),
            },
            _ => out.push(ch),
        }
    }
    Err(SplitError::UnterminatedDoubleQuote { pos: start })
}

/// Quote one word for safe embedding in a shell command line.
///
/// Words made of safe characters pass through untouched; anything else is
/// single-quoted, with embedded single quotes rendered as `'"'"'`.
pub fn quote(word: &str) -> String {
    fn is_safe(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ',' | ':' | '/' | '@' | '+' | '=' | '%')
    }

    if !word.is_empty() && word.chars().all(is_safe) {
        return word.to_string();
    }
    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');
    for ch in word.chars() {
        if ch == '\'' {
            out.push_str("'\"'\"'");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Join words into one shell-safe command line.
pub fn join<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| quote(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "words_tests.rs"]
mod tests;
