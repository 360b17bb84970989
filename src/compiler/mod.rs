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

//! On-demand resolution of Element programs.
//!
//! A [`Compilation`] owns an arena of functions and types. Nothing is
//! resolved up front: names are compiled when first requested (through
//! [`Compilation::resolve`] or the host entry points) and memoised where the
//! result cannot depend on call arguments.

mod context;
mod expr;
mod function;
mod intrinsics;
mod resolve;
mod stack;
mod types;
mod validate;
mod value;

use crate::diagnostics::CompileError;
use crate::options::CompileOptions;
use crate::parser::parse_document;
use crate::source::{ElementSource, SourceDocument};
use crate::stdlib::merge_with_prelude;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::debug;

pub use self::function::FunctionId;
pub use self::intrinsics::{BinaryOp, Intrinsic, UnaryOp};
pub use self::types::TypeId;
pub use self::value::Value;

pub(crate) use self::types::PortLayout;

use self::context::CompilationContext;
use self::function::CustomFunction;
use self::stack::CompilationStack;
use self::types::CustomType;

/// Compiled Element program.
///
/// Diagnostics accumulate in report order as names are resolved; see
/// [`Compilation::diagnostics`].
pub struct Compilation {
    pub(crate) functions: Vec<CustomFunction>,
    pub(crate) types: Vec<CustomType>,
    // Unknown type names already reported, keyed by the scope they were looked up from.
    pub(crate) unknown_types: HashSet<(FunctionId, String)>,
    pub(crate) context: CompilationContext,
    pub(crate) global: FunctionId,
}

impl Compilation {
    /// Parses and validates `sources` into one global scope.
    ///
    /// Syntax errors abort with the first error. Duplicate definitions are
    /// recorded as diagnostics and compilation continues.
    pub fn new(sources: &[ElementSource], options: CompileOptions) -> Result<Self, CompileError> {
        let sources = if options.include_prelude {
            merge_with_prelude(sources)
        } else {
            sources.to_vec()
        };

        let mut parsed = Vec::with_capacity(sources.len());
        for source in sources {
            let doc = Rc::new(SourceDocument::new(source.path, source.source));
            let program = parse_document(&doc)?;
            debug!(path = %doc.path, statements = program.statements.len(), "parsed source");
            parsed.push((program.statements, doc));
        }

        let mut context = CompilationContext::new(options);
        validate::validate_sources(&mut context, &parsed);

        Ok(Self {
            functions: vec![CustomFunction::global(&parsed)],
            types: Vec::new(),
            unknown_types: HashSet::new(),
            context,
            global: FunctionId(0),
        })
    }

    /// Resolves a dotted path (`ns.f`, `Vector2.length`) from the global scope.
    ///
    /// Failures are logged to [`Compilation::diagnostics`] and yield
    /// [`Value::Error`].
    pub fn resolve(&mut self, path: &str) -> Value {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let stack = self.global_stack();
        let mut value = self.compile_function(self.global, first, &stack);
        for segment in segments {
            value = self.member(value, segment);
        }
        value
    }

    /// Looks up a function by dotted path, or `None` when the first segment
    /// names nothing at the root or the lookup fails.
    pub fn get_function(&mut self, path: &str) -> Option<Value> {
        let root = path.split('.').next().unwrap_or_default();
        if !self.is_global_name(root) {
            return None;
        }
        Some(self.resolve(path)).filter(|value| !value.is_error())
    }

    /// Returns whether `name` is a top-level definition or an intrinsic.
    pub fn is_global_name(&self, name: &str) -> bool {
        self.function(self.global).has_member(name) || Intrinsic::from_name(name).is_some()
    }

    /// Errors reported so far, in report order.
    pub fn diagnostics(&self) -> &[CompileError] {
        self.context.errors()
    }

    /// Removes and returns the errors reported so far.
    pub fn take_diagnostics(&mut self) -> Vec<CompileError> {
        self.context.take_errors()
    }

    /// Number of functions allocated so far.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    fn global_stack(&self) -> CompilationStack {
        self.function(self.global)
            .cache
            .get_or_init(CompilationStack::new)
            .clone()
    }
}

/// Renders a number the way results are printed.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}
