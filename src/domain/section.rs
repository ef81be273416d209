//! Section - a heading and the body text beneath it.

/// One heading-delimited block of a reference document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading text with any leading ordinal ("3. ") removed
    pub title: String,
    /// Body text, trimmed; never empty
    pub body: &'a str,
}
