//! Regex tokenizer for ABC notation.
//!
//! Splits a tune body into musical units: chords, tuplet openings, notes
//! with octave marks and durations, rests, bar lines, header fields and
//! residual symbols. Used for corpus statistics; the encoder itself is
//! character-level and does not go through this.

use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled once. Alternation order is significant: branches are tried
/// left to right at each position.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\[[^\]]+\]",          // chords like [CEG]
        r"|\([0-9]+[A-Za-z]+",  // tuplet openings like (3ABC
        r"|[A-Ga-g][,']*[0-9/]*", // note letters with octave marks and durations
        r"|z[0-9/]*",           // rests: z, z2, z/2
        r"|\|+",                // bar lines | ||
        r"|[A-Za-z]+:[^\s]+",   // headers K:C, M:4/4, Q:1/4=120
        r"|[0-9/]+",            // pure numbers (durations)
        r"|[^A-Za-z0-9\s]",     // any single leftover symbol
        r"|\S+",                // any other non-space run
    ))
    .expect("ABC token pattern is valid")
});

/// Tokenize one line. `%` comment lines yield no tokens.
pub fn tokenize_line(line: &str) -> Vec<String> {
    if line.starts_with('%') {
        return Vec::new();
    }

    TOKEN_PATTERN
        .find_iter(line)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize a full ABC file body.
pub fn tokenize_text(text: &str) -> Vec<String> {
    text.lines().flat_map(|line| tokenize_line(line)).collect()
}

/// Token count without materializing the tokens.
pub fn token_count(text: &str) -> usize {
    text.lines()
        .filter(|line| !line.starts_with('%'))
        .map(|line| TOKEN_PATTERN.find_iter(line).count())
        .sum()
}
