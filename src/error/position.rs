use std::{fmt, rc::Rc};

/// A named source text.
///
/// Every [`Position`] pointing into a source shares the same `SourceFile`, so
/// diagnostics can quote the offending line without copying the text around.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceFile {
    name:        String,
    text:        String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Creates a shared source file and indexes the start of every line.
    ///
    /// # Example
    /// ```
    /// use blazescript::error::position::SourceFile;
    ///
    /// let source = SourceFile::new("main.bzs", "val a = 1\nval b = 2");
    /// assert_eq!(source.name(), "main.bzs");
    /// assert_eq!(source.line_text(1), "val b = 2");
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
        let text = text.into();
        let line_starts = std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1))
                                            .collect();

        Rc::new(Self { name: name.into(),
                       text,
                       line_starts })
    }

    /// The name the source was registered under, usually a file path.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The complete source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the zero-based line `line` without its line terminator.
    ///
    /// Lines past the end of the text are empty.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line) else {
            return "";
        };
        let end = self.line_starts.get(line + 1).map_or(self.text.len(), |&next| next - 1);

        self.text.get(start..end).unwrap_or_default().trim_end_matches('\r')
    }

    /// Converts a byte offset into a zero-based `(line, column)` pair, where
    /// the column counts characters.
    fn locate(&self, index: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let start = self.line_starts.get(line).copied().unwrap_or_default();
        let column = self.text.get(start..index).map_or(0, |prefix| prefix.chars().count());

        (line, column)
    }
}

/// A location in a source file.
///
/// `index` is a byte offset into the source text. `line` and `column` are
/// zero-based; rendering adds one to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Byte offset into the source text.
    pub index:  usize,
    /// Zero-based line.
    pub line:   usize,
    /// Zero-based column, counted in characters.
    pub column: usize,
    /// The source this position points into.
    pub source: Rc<SourceFile>,
}

impl Position {
    /// Creates the position of byte offset `index` in `source`.
    #[must_use]
    pub fn new(source: &Rc<SourceFile>, index: usize) -> Self {
        let (line, column) = source.locate(index);

        Self { index,
               line,
               column,
               source: Rc::clone(source) }
    }

    /// The 1-based line number shown to users.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line + 1
    }

    /// The name of the file this position points into.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.source.name()
    }
}

/// A half-open range of source text, from `start` up to but excluding `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// First character covered by the span.
    pub start: Position,
    /// Position just past the last character covered by the span.
    pub end:   Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the span from the start of `self` to the end of `other`.
    #[must_use]
    pub fn to(&self, other: &Self) -> Self {
        Self { start: self.start.clone(),
               end:   other.end.clone(), }
    }

    /// Quotes the source lines covered by the span and underlines the covered
    /// characters with `^`.
    ///
    /// # Example
    /// ```
    /// use blazescript::error::position::{Position, SourceFile, Span};
    ///
    /// let source = SourceFile::new("main.bzs", "val x = 1 / 0");
    /// let span = Span::new(Position::new(&source, 8), Position::new(&source, 13));
    /// assert_eq!(span.excerpt(), "val x = 1 / 0\n        ^^^^^\n");
    /// ```
    #[must_use]
    pub fn excerpt(&self) -> String {
        let source = &self.start.source;
        let mut excerpt = String::new();

        for line in self.start.line..=self.end.line {
            // A span ending right after a newline does not cover the next line.
            if line > self.start.line && line == self.end.line && self.end.column == 0 {
                break;
            }

            let text = source.line_text(line);
            let from = if line == self.start.line { self.start.column } else { 0 };
            let to = if line == self.end.line { self.end.column } else { text.chars().count() };

            excerpt.push_str(text);
            excerpt.push('\n');
            excerpt.push_str(&" ".repeat(from));
            excerpt.push_str(&"^".repeat(to.saturating_sub(from).max(1)));
            excerpt.push('\n');
        }

        excerpt
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File {}, line {}", self.start.file_name(), self.start.line_number())
    }
}
