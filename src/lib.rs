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

//! Semantic core of the Element dataflow language.
//!
//! This crate provides:
//! - A parser for Element source text producing a spanned AST.
//! - On-demand name resolution over nested namespaces, classes and closures.
//! - Memoised invocation of namespaces and zero-input functions.
//! - Nominal `type` records, classes usable as types and numeric intrinsics.
//! - Diagnostics with stable `ELExxxx` codes, line/column/caret output and a
//!   synthetic traceback through user functions.
//!
//! # Pipeline
//!
//! 1. Parse every source into an AST with byte spans.
//! 2. Validate duplicate definitions.
//! 3. Resolve requested names lazily from the global scope, compiling each
//!    definition the first time it is needed.
//! 4. Serialise results to flat float lists for the host.
//!
//! ```
//! use element_compiler::{evaluate_element, format_results};
//!
//! let results = evaluate_element("half(x:Number):Number = div(x, 2);", "half", &[5.0]).unwrap();
//! assert_eq!(format_results(&results), "2.5");
//! ```

mod ast;
mod compiler;
mod diagnostics;
mod host;
mod options;
mod parser;
mod source;
pub mod stdlib;

pub use ast::{
    Expr, ExprKind, ExprList, FunctionBody, FunctionDecl, FunctionShape, Port, Program, RETURN,
    SELF_PARAMETER, SourceSpan, Statement, TypeAnnotation, TypeDecl,
};
pub use compiler::{BinaryOp, Compilation, FunctionId, Intrinsic, TypeId, UnaryOp, Value};
pub use diagnostics::{CallSite, CompileError, ErrorCode};
pub use host::{EvaluateError, format_results};
pub use options::{CompileOptions, DEFAULT_MAX_DEPTH};
pub use source::{ElementSource, Position, locate};

/// Parses Element source into a spanned AST [`Program`].
pub fn parse_element(source: &str) -> Result<Program, CompileError> {
    parser::parse_program(source)
}

/// Compiles one source with default options.
///
/// # Errors
///
/// Returns [`CompileError`] when the source does not parse. Semantic errors
/// are collected in [`Compilation::diagnostics`] as names get resolved.
pub fn compile_element(source: &str) -> Result<Compilation, CompileError> {
    compile_element_sources(
        &[ElementSource::new(CompileOptions::default().source_name, source)],
        CompileOptions::default(),
    )
}

/// Compiles one source next to the embedded prelude.
pub fn compile_element_with_prelude(source: &str) -> Result<Compilation, CompileError> {
    let options = CompileOptions::new().with_prelude(true);
    compile_element_sources(
        &[ElementSource::new(options.source_name.clone(), source)],
        options,
    )
}

/// Compiles several sources into one global scope.
pub fn compile_element_sources(
    sources: &[ElementSource],
    options: CompileOptions,
) -> Result<Compilation, CompileError> {
    Compilation::new(sources, options)
}

/// Compiles `source` and evaluates the function at `path` in one step.
pub fn evaluate_element(
    source: &str,
    path: &str,
    arguments: &[f64],
) -> Result<Vec<f64>, EvaluateError> {
    let mut compilation = compile_element(source)?;
    compilation.evaluate_and_serialize(path, arguments)
}

#[cfg(test)]
mod tests;
