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

//! Per-compilation state: error log, call-site stack and depth guard.

use crate::ast::SourceSpan;
use crate::diagnostics::{CallSite, CompileError, ErrorCode};
use crate::options::CompileOptions;
use crate::source::SourceDocument;
use tracing::debug;

use super::Value;

/// Marker for a failure that has already been written to the error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reported;

impl From<Reported> for Value {
    fn from(_: Reported) -> Self {
        Value::Error
    }
}

/// Compilation-wide diagnostics state.
///
/// Holds every reported error (in report order) and mirrors the recursive
/// resolution with an explicit call-site stack for tracebacks.
pub(crate) struct CompilationContext {
    pub(crate) options: CompileOptions,
    errors: Vec<CompileError>,
    call_stack: Vec<CallSite>,
    depth: usize,
    // Set once the limit has been reported for the current top-level resolution.
    tripped: bool,
}

impl CompilationContext {
    pub(crate) fn new(options: CompileOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
            call_stack: Vec::new(),
            depth: 0,
            tripped: false,
        }
    }

    pub(crate) fn push(&mut self, site: CallSite) {
        self.call_stack.push(site);
    }

    pub(crate) fn pop(&mut self) {
        let _ = self.call_stack.pop();
    }

    /// Enters one nested resolution, failing once the depth limit is hit.
    pub(crate) fn enter(&mut self) -> Result<(), Reported> {
        if self.depth >= self.options.max_depth {
            if self.tripped {
                return Err(Reported);
            }
            self.tripped = true;
            return Err(self.report(
                ErrorCode::RecursionLimit,
                format!(
                    "Resolution nested deeper than {} levels (circular definition?)",
                    self.options.max_depth
                ),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.tripped = false;
        }
    }

    /// Records an error at the innermost active call site.
    pub(crate) fn report(&mut self, code: ErrorCode, message: impl Into<String>) -> Reported {
        let error = CompileError::at_call_stack(code, message, &self.call_stack);
        self.record(error)
    }

    /// Records an error anchored at an explicit span.
    pub(crate) fn report_at(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        doc: &SourceDocument,
        span: &SourceSpan,
    ) -> Reported {
        let mut error = CompileError::from_span_in_source(code, message, doc, span);
        error.traceback = self.call_stack.clone();
        self.record(error)
    }

    /// Records an error and returns the error placeholder value.
    pub(crate) fn log_error(&mut self, code: ErrorCode, message: impl Into<String>) -> Value {
        self.report(code, message).into()
    }

    fn record(&mut self, error: CompileError) -> Reported {
        debug!(
            code = %error.code,
            line = error.line,
            column = error.column,
            message = %error.message,
            "compile error"
        );
        self.errors.push(error);
        Reported
    }

    pub(crate) fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    pub(crate) fn take_errors(&mut self) -> Vec<CompileError> {
        std::mem::take(&mut self.errors)
    }
}
