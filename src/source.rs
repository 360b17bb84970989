/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Source documents and editor-position mapping.

/// One Element source unit handed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSource {
    /// Logical source path used in diagnostics.
    pub path: String,
    /// Full Element source text.
    pub source: String,
}

impl ElementSource {
    /// Creates a source unit.
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Human-editor cursor position (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number; a tab advances it by four.
    pub column: usize,
}

/// Maps a byte offset to the line/column an editor would show.
///
/// `\r`, `\n` and `\r\n` each count as a single line break.
pub fn locate(source: &str, offset: usize) -> Position {
    let mut line = 1;
    let mut column = 1;
    let mut chars = source.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if index >= offset {
            break;
        }
        match ch {
            '\r' => {
                line += 1;
                column = 1;
                let _ = chars.next_if(|&(_, next)| next == '\n');
            }
            '\n' => {
                line += 1;
                column = 1;
            }
            '\t' => column += 4,
            _ => column += 1,
        }
    }
    Position { line, column }
}

/// Rendered source line and caret marker for one span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Excerpt {
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) snippet: String,
    pub(crate) pointer: String,
}

/// In-memory source document used for diagnostics and provenance.
#[derive(Debug, Clone)]
pub(crate) struct SourceDocument {
    pub(crate) path: String,
    pub(crate) source: String,
}

impl SourceDocument {
    pub(crate) fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Builds the snippet/caret pair for a byte range of this document.
    pub(crate) fn excerpt(&self, start: usize, end: usize) -> Excerpt {
        let source = self.source.as_str();
        let mut start = start.min(source.len());
        while !source.is_char_boundary(start) {
            start -= 1;
        }
        let position = locate(source, start);

        let line_start = source[..start]
            .rfind(['\r', '\n'])
            .map(|index| index + 1)
            .unwrap_or(0);
        let line_end = source[start..]
            .find(['\r', '\n'])
            .map(|index| start + index)
            .unwrap_or(source.len());
        // Tabs are expanded so the caret lines up with the reported column.
        let snippet = source[line_start..line_end].replace('\t', "    ");

        let line_len = snippet.chars().count();
        let pointer_column = position.column.saturating_sub(1).min(line_len);
        let span_len = source
            .get(start..end.max(start).min(source.len()))
            .map(|text| text.chars().count())
            .unwrap_or(0)
            .max(1);
        let max_len = line_len.saturating_sub(pointer_column).max(1);
        let pointer = format!(
            "{}{}",
            " ".repeat(pointer_column),
            "^".repeat(span_len.min(max_len))
        );

        Excerpt {
            line: position.line,
            column: position.column,
            snippet,
            pointer,
        }
    }
}
