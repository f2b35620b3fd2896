//! Caption timing and SRT serialization.
//!
//! Text is split into groups of `words_per_chunk` words and the audio
//! duration is divided evenly between the groups. The last group absorbs the
//! remainder of the integer division so the windows always end exactly at the
//! total duration.

use std::fmt::Write as _;

use crate::{DomainError, SubtitleChunk};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtitleBuilder {
    words_per_chunk: usize,
    max_line_chars: usize,
}

impl SubtitleBuilder {
    pub fn new(words_per_chunk: usize, max_line_chars: usize) -> Result<Self, DomainError> {
        if words_per_chunk == 0 {
            return Err(DomainError::validation(
                "words_per_chunk must be greater than zero",
            ));
        }
        if max_line_chars == 0 {
            return Err(DomainError::validation(
                "max_line_chars must be greater than zero",
            ));
        }
        Ok(Self {
            words_per_chunk,
            max_line_chars,
        })
    }

    pub fn words_per_chunk(&self) -> usize {
        self.words_per_chunk
    }

    pub fn max_line_chars(&self) -> usize {
        self.max_line_chars
    }

    pub fn build(&self, text: &str, total_ms: u64) -> Result<SubtitleTrack, DomainError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Err(DomainError::validation("text contains no words"));
        }

        let groups: Vec<String> = words
            .chunks(self.words_per_chunk)
            .map(|group| group.join(" "))
            .collect();
        let count = groups.len() as u64;
        let slice_ms = total_ms / count;

        let chunks = groups
            .into_iter()
            .enumerate()
            .map(|(position, group)| {
                let position = position as u64;
                let start_ms = position * slice_ms;
                let end_ms = if position + 1 == count {
                    total_ms
                } else {
                    (position + 1) * slice_ms
                };
                SubtitleChunk {
                    index: position as usize + 1,
                    start_ms,
                    end_ms,
                    text: wrap_text(&group, self.max_line_chars),
                }
            })
            .collect();

        Ok(SubtitleTrack { chunks, total_ms })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    pub chunks: Vec<SubtitleChunk>,
    pub total_ms: u64,
}

impl SubtitleTrack {
    pub fn to_srt(&self) -> String {
        let mut out = String::new();
        for chunk in &self.chunks {
            // Writing into a String cannot fail.
            let _ = write!(
                out,
                "{}\n{} --> {}\n{}\n\n",
                chunk.index,
                format_timestamp(chunk.start_ms),
                format_timestamp(chunk.end_ms),
                chunk.text
            );
        }
        out
    }
}

/// `HH:MM:SS,mmm`
pub fn format_timestamp(ms: u64) -> String {
    let total_seconds = ms / 1_000;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02},{:03}", ms % 1_000)
}

/// Greedy wrap on whitespace. Words are never split, so a word wider than
/// `width` sits alone on its line.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}
