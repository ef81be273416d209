//! Section extraction from heading-structured reference documents.
//!
//! A document is split on lines that start with the configured heading
//! prefix followed by whitespace (`## Lists`). Text before the first such
//! heading is preamble and is discarded. Deeper headings (`###`) do not
//! match and stay inside the enclosing section body.

use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

use crate::domain::Section;
use crate::error::{DatasetError, Result};

/// Default heading level used to delimit sections
pub const DEFAULT_HEADING_PREFIX: &str = "##";

static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("valid regex"));

static DEFAULT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&heading_pattern(DEFAULT_HEADING_PREFIX)).expect("valid regex"));

fn heading_pattern(prefix: &str) -> String {
    format!(r"(?m)^{}[ \t]+(.*)$", regex::escape(prefix))
}

/// Strip a leading "<integer>. " ordinal from a heading title
pub fn strip_ordinal(title: &str) -> String {
    ORDINAL_RE.replace(title.trim(), "").into_owned()
}

/// Read a reference document; failure here is fatal for extraction
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| DatasetError::DocumentRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits document text into [`Section`]s at a fixed heading level
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    heading: Regex,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING_RE.clone(),
        }
    }
}

impl SectionExtractor {
    /// Create an extractor for headings starting with `prefix` (e.g. "##")
    pub fn new(prefix: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            heading: Regex::new(&heading_pattern(prefix))?,
        })
    }

    /// Lazily iterate the sections of `text`.
    ///
    /// Calling this again on the same text starts over from the beginning.
    pub fn sections<'r, 'h>(&'r self, text: &'h str) -> Sections<'r, 'h> {
        Sections {
            text,
            headings: self.heading.captures_iter(text).peekable(),
        }
    }
}

/// Iterator returned by [`SectionExtractor::sections`]
pub struct Sections<'r, 'h> {
    text: &'h str,
    headings: Peekable<CaptureMatches<'r, 'h>>,
}

impl<'h> Iterator for Sections<'_, 'h> {
    type Item = Section<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let caps = self.headings.next()?;
            let heading_end = caps.get(0).map_or(0, |m| m.end());
            let title = caps.get(1).map_or("", |m| m.as_str());

            let body_end = self
                .headings
                .peek()
                .and_then(|next| next.get(0))
                .map_or(self.text.len(), |m| m.start());
            let body = self.text[heading_end..body_end].trim();

            if body.is_empty() {
                log::debug!("Dropping section '{}' with empty body", title.trim());
                continue;
            }

            return Some(Section {
                title: strip_ordinal(title),
                body,
            });
        }
    }
}
