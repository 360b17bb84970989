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

//! `nom` parser for Element source text.
//!
//! The grammar supports:
//! - function definitions with optional inputs (`f(x:Number)`) and outputs
//!   (`:Number` or `-> (x:Number, y:Number)`)
//! - block bodies (`{ ... }`) holding nested statements
//! - assignment bodies (`= expr;`)
//! - `type` statements declaring nominal records
//!
//! Expressions are chains of a number or identifier followed by member
//! accesses (`.name`) and calls (`(args...)`).

mod expr;
mod statements;
mod utils;

use crate::ast::{Program, SourceSpan, Span};
use crate::diagnostics::{CompileError, ErrorCode};
use crate::source::SourceDocument;
use nom::{
    IResult,
    combinator::all_consuming,
    error::{VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::delimited,
};

use self::statements::statement;
use self::utils::ws0;

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

/// Parses full Element source into a spanned AST program.
pub fn parse_program(source: &str) -> Result<Program, CompileError> {
    parse_document(&SourceDocument::new("<inline>", source))
}

/// Parses one source document, tagging diagnostics with its path.
pub(crate) fn parse_document(doc: &SourceDocument) -> Result<Program, CompileError> {
    let input = Span::new(doc.source.as_str());
    // `all_consuming` ensures trailing garbage is treated as syntax error.
    let (_, statements) = match all_consuming(delimited(ws0, many0(statement), ws0))(input) {
        Ok(v) => v,
        Err(err) => return Err(parse_error_to_compile_error(err, doc)),
    };
    Ok(Program { statements })
}

/// Converts a `nom` verbose error to crate-level compile diagnostics.
fn parse_error_to_compile_error(
    err: nom::Err<VerboseError<Span<'_>>>,
    doc: &SourceDocument,
) -> CompileError {
    match err {
        nom::Err::Incomplete(_) => {
            CompileError::message_in_file(ErrorCode::SyntaxError, "Incomplete input", &doc.path)
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            if let Some((span, kind)) = e.errors.last() {
                let span = SourceSpan::from_bounds(*span, *span);
                let detail = match kind {
                    VerboseErrorKind::Context(ctx) => format!("Syntax error: expected {ctx}"),
                    VerboseErrorKind::Char(c) => format!("Syntax error: expected '{c}'"),
                    VerboseErrorKind::Nom(kind) => format!("Syntax error near {kind:?}"),
                };
                CompileError::from_span_in_source(ErrorCode::SyntaxError, detail, doc, &span)
            } else {
                CompileError::message_in_file(ErrorCode::SyntaxError, "Syntax error", &doc.path)
            }
        }
    }
}
