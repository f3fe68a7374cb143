//! Error adapter for converting GlyphworkError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Template errors
//! point at the offending position in the template source; every other
//! variant is reported with a code and, where useful, a help message.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use glyphwork::{GlyphworkError, kinds::KindRegistry};

/// Adapter for a malformed template document.
///
/// Wraps the JSON error together with the source it was raised on so the
/// report can show the surrounding snippet.
pub struct TemplateAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> TemplateAdapter<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the error position within the source.
    fn span(&self) -> SourceSpan {
        let offset = byte_offset(self.src, self.err.line(), self.err.column());
        let len = self.src[offset..].chars().next().map_or(0, char::len_utf8);
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for TemplateAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for TemplateAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid template document: {}", self.err)
    }
}

impl std::error::Error for TemplateAdapter<'_> {}

impl MietteDiagnostic for TemplateAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("glyphwork::template"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err.classify() {
            Category::Syntax => "the template is not well-formed JSON",
            Category::Eof => "the template ends before the document is complete",
            Category::Data => "template keys are camelCase, e.g. `topGlyph` and `glyphBoxes`",
            Category::Io => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        if self.src.is_empty() {
            return None;
        }
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.src.is_empty() || self.err.line() == 0 {
            return None;
        }
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`GlyphworkError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a GlyphworkError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            GlyphworkError::Io(_) => "glyphwork::io",
            GlyphworkError::Template { .. } => "glyphwork::template",
            GlyphworkError::UnknownKind(_) => "glyphwork::unknown_kind",
            GlyphworkError::Glyph(_) => "glyphwork::glyph",
            GlyphworkError::Config(_) => "glyphwork::config",
            GlyphworkError::Export(_) => "glyphwork::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            GlyphworkError::UnknownKind(_) => {
                let kinds: Vec<_> = KindRegistry::default().type_names().collect();
                Some(Box::new(format!("available glyph types: {}", kinds.join(", "))))
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A template error with source location information.
    Template(TemplateAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Template(t) => fmt::Display::fmt(t, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Template(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Template(t) => t.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Template(t) => t.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Template(t) => t.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Template(t) => t.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Byte offset of a one-based line and column, clamped to a char boundary within `src`.
fn byte_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Convert a [`GlyphworkError`] into a reportable error.
pub fn to_reportable(err: &GlyphworkError) -> Reportable<'_> {
    match err {
        GlyphworkError::Template { err, src } => Reportable::Template(TemplateAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
