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

//! Compile-time diagnostics with stable codes, source snippets and
//! synthetic stack traces through user-defined functions.

use crate::ast::SourceSpan;
use crate::source::SourceDocument;
use std::fmt;

/// Stable diagnostic codes that tooling can match on instead of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Source text does not match the grammar.
    SyntaxError,
    /// Wrong number of arguments for the declared inputs.
    ArgumentCount,
    /// An argument does not satisfy its input's declared type.
    ArgumentType,
    /// A namespace was invoked with arguments.
    NamespaceNotConstructible,
    /// Member or output name does not exist on the value.
    UnknownMember,
    /// Expression chain that the parser should never produce.
    MalformedExpression,
    /// Name not found through any resolution path.
    UnresolvedIdentifier,
    /// Computed output does not satisfy its declared type.
    OutputNotSatisfied,
    /// Type annotation names no known type.
    UnknownType,
    /// Resolution nested deeper than the configured limit.
    RecursionLimit,
    /// Same name declared twice in one scope or port list.
    DuplicateDefinition,
    /// Value cannot be called with arguments.
    NotCallable,
}

impl ErrorCode {
    /// Returns the stable textual code (`ELExxxx`).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "ELE0001",
            ErrorCode::ArgumentCount => "ELE0002",
            ErrorCode::ArgumentType => "ELE0003",
            ErrorCode::NamespaceNotConstructible => "ELE0004",
            ErrorCode::UnknownMember => "ELE0005",
            ErrorCode::MalformedExpression => "ELE0006",
            ErrorCode::UnresolvedIdentifier => "ELE0007",
            ErrorCode::OutputNotSatisfied => "ELE0008",
            ErrorCode::UnknownType => "ELE0009",
            ErrorCode::RecursionLimit => "ELE0010",
            ErrorCode::DuplicateDefinition => "ELE0011",
            ErrorCode::NotCallable => "ELE0012",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One frame of the compile-time call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Qualified name of the function whose body contains the site.
    pub function: String,
    /// Source file/path label.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// Source line snippet.
    pub snippet: String,
    /// Caret pointer aligned to `snippet`.
    pub pointer: String,
}

impl CallSite {
    /// Records a site inside `function`'s body at `span`.
    pub(crate) fn new(
        function: impl Into<String>,
        doc: &SourceDocument,
        span: &SourceSpan,
    ) -> Self {
        let excerpt = doc.excerpt(span.start, span.end);
        Self {
            function: function.into(),
            file: doc.path.clone(),
            line: excerpt.line,
            column: excerpt.column,
            snippet: excerpt.snippet,
            pointer: excerpt.pointer,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = if self.function.is_empty() {
            "<global>"
        } else {
            &self.function
        };
        write!(f, "{}@{}:{}:{}", function, self.file, self.line, self.column)
    }
}

/// Rich compile error returned by parser and resolution stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Stable diagnostic code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Source file/path label (`""` when unavailable).
    pub file: String,
    /// 1-based line number (`0` when unavailable).
    pub line: usize,
    /// 1-based column number (`0` when unavailable).
    pub column: usize,
    /// Source line snippet where the error occurred.
    pub snippet: String,
    /// Caret pointer aligned to `snippet`.
    pub pointer: String,
    /// Active call sites when the error was reported, outermost first.
    pub traceback: Vec<CallSite>,
}

impl CompileError {
    /// Creates an error with no location information.
    pub fn message_only(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::message_in_file(code, message, "")
    }

    /// Creates an error with source-file label but no line/column info.
    pub fn message_in_file(
        code: ErrorCode,
        message: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            file: file.into(),
            line: 0,
            column: 0,
            snippet: String::new(),
            pointer: String::new(),
            traceback: Vec::new(),
        }
    }

    /// Creates a source-mapped diagnostic from a span of `doc`.
    pub(crate) fn from_span_in_source(
        code: ErrorCode,
        message: impl Into<String>,
        doc: &SourceDocument,
        span: &SourceSpan,
    ) -> Self {
        let excerpt = doc.excerpt(span.start, span.end);
        Self {
            code,
            message: message.into(),
            file: doc.path.clone(),
            line: excerpt.line,
            column: excerpt.column,
            snippet: excerpt.snippet,
            pointer: excerpt.pointer,
            traceback: Vec::new(),
        }
    }

    /// Creates a diagnostic anchored at the innermost of `call_stack`.
    pub(crate) fn at_call_stack(
        code: ErrorCode,
        message: impl Into<String>,
        call_stack: &[CallSite],
    ) -> Self {
        let Some(site) = call_stack.last() else {
            return Self::message_only(code, message);
        };
        Self {
            code,
            message: message.into(),
            file: site.file.clone(),
            line: site.line,
            column: site.column,
            snippet: site.snippet.clone(),
            pointer: site.pointer.clone(),
            traceback: call_stack.to_vec(),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 || self.column == 0 {
            if self.file.is_empty() {
                return write!(f, "error[{}]: {}", self.code, self.message);
            }
            return write!(f, "error[{}]: {} ({})", self.code, self.message, self.file);
        }

        let location = if self.file.is_empty() {
            format!("line {}, column {}", self.line, self.column)
        } else {
            format!("{}:{}:{}", self.file, self.line, self.column)
        };

        write!(
            f,
            "error[{}]: {}\n --> {}\n  |\n{:>3} | {}\n  | {}",
            self.code, self.message, location, self.line, self.snippet, self.pointer
        )?;
        if !self.traceback.is_empty() {
            let chain = self
                .traceback
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            write!(f, "\n  = trace: {chain}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {}
