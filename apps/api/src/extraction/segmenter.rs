//! Section Segmenter: splits raw resume text into labeled blocks.
//!
//! A line is a heading when one of the section recognizers matches it and it
//! is shorter than [`MAX_HEADER_CHARS`]; longer lines are prose that merely
//! mentions a keyword. Heading lines themselves are consumed, every other
//! non-blank line lands in exactly one block.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extraction::patterns;
use crate::models::resume::SectionKey;

pub const MAX_HEADER_CHARS: usize = 100;

/// Section blocks keyed by section, in the order each section first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap(IndexMap<SectionKey, String>);

impl SectionMap {
    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a block to `key`. A revisited section keeps its earlier
    /// content; the new block follows after a blank line so the two stay
    /// separate entries.
    fn append(&mut self, key: SectionKey, block: String) {
        self.0
            .entry(key)
            .and_modify(|existing| {
                existing.push_str("\n\n");
                existing.push_str(&block);
            })
            .or_insert(block);
    }
}

/// Returns the section a line introduces, if it is a heading.
pub fn detect_header(line: &str) -> Option<SectionKey> {
    if line.chars().count() >= MAX_HEADER_CHARS {
        return None;
    }
    patterns::section_headers()
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(key, _)| *key)
}

/// Splits `text` into section blocks.
///
/// Lines are trimmed. Runs of blank lines collapse to one empty line inside a
/// block (entry separators for the entry splitter); leading and trailing
/// blanks are dropped. Content before the first heading belongs to
/// [`SectionKey::Header`].
pub fn segment(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut current = SectionKey::Header;
    let mut buffer: Vec<&str> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();

        if line.is_empty() {
            if buffer.last().is_some_and(|last| !last.is_empty()) {
                buffer.push("");
            }
            continue;
        }

        match detect_header(line) {
            Some(key) => {
                flush(&mut sections, current, &mut buffer);
                current = key;
            }
            None => buffer.push(line),
        }
    }
    flush(&mut sections, current, &mut buffer);

    sections
}

fn flush(sections: &mut SectionMap, key: SectionKey, buffer: &mut Vec<&str>) {
    while buffer.last().is_some_and(|last| last.is_empty()) {
        buffer.pop();
    }
    if !buffer.is_empty() {
        sections.append(key, buffer.join("\n"));
    }
    buffer.clear();
}
