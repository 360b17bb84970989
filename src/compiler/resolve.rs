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

//! Name resolution, memoised invocation and argument checking.

use crate::ast::{FunctionBody, FunctionDecl, FunctionShape, RETURN, Statement};
use crate::diagnostics::ErrorCode;
use crate::source::SourceDocument;
use std::rc::Rc;
use tracing::{debug, trace};

use super::context::Reported;
use super::function::{CustomFunction, Driver, FunctionId};
use super::intrinsics::Intrinsic;
use super::stack::CompilationStack;
use super::types::{Satisfaction, TypeRef};
use super::{Compilation, Value};

impl Compilation {
    pub(crate) fn function(&self, id: FunctionId) -> &CustomFunction {
        &self.functions[id.0]
    }

    /// Allocates a function in the arena.
    pub(crate) fn define_function(
        &mut self,
        parent: Option<FunctionId>,
        decl: Rc<FunctionDecl>,
        captured: Option<CompilationStack>,
        doc: Rc<SourceDocument>,
    ) -> FunctionId {
        let id = FunctionId(self.functions.len());
        debug!(name = %decl.name, id = id.0, shape = ?decl.shape(), "define function");
        self.functions.push(CustomFunction::new(parent, decl, captured, doc));
        id
    }

    /// Dotted path of a function from the global scope.
    pub(crate) fn qualified_name(&self, id: FunctionId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let function = self.function(id);
            if !function.name.is_empty() {
                names.push(function.name.as_str());
            }
            current = function.parent;
        }
        names.reverse();
        names.join(".")
    }

    /// Resolves `name` as seen from function `id` with working frame `stack`.
    ///
    /// Lookup order: the local frame, the function's drivers, the assignment
    /// body (for `return`), ancestor frames, then the parent scope through the
    /// captured frame. At the root, intrinsics are the last resort. Whatever
    /// is found is forced through [`Compilation::resolve_returns`].
    pub(crate) fn compile_function(
        &mut self,
        id: FunctionId,
        name: &str,
        stack: &CompilationStack,
    ) -> Value {
        if self.context.enter().is_err() {
            return Value::Error;
        }
        trace!(scope = %self.qualified_name(id), name, "resolve");
        let value = match self.find_value(id, name, stack) {
            Some(value) => self.resolve_returns(value),
            None => self.context.log_error(
                ErrorCode::UnresolvedIdentifier,
                format!("Unable to find `{name}`"),
            ),
        };
        self.context.exit();
        value
    }

    fn find_value(
        &mut self,
        id: FunctionId,
        name: &str,
        stack: &CompilationStack,
    ) -> Option<Value> {
        if let Some(value) = stack.get_local(name) {
            return Some(value);
        }

        let function = self.function(id);
        let driver = function
            .drivers
            .as_ref()
            .and_then(|drivers| drivers.get(name))
            .cloned();
        let has_drivers = function.drivers.is_some();
        let decl = function.decl.clone();
        let (parent, captured) = (function.parent, function.captured.clone());

        if let Some(Driver { statement, doc }) = driver {
            let value = match statement {
                Statement::Type(_) => match self.find_type(id, name) {
                    Some(TypeRef::Custom(ty)) => Value::Constructor(ty),
                    _ => Value::Error,
                },
                Statement::Function(decl) => {
                    Value::Function(self.define_function(Some(id), decl, Some(stack.clone()), doc))
                }
            };
            stack.add(name, value.clone());
            return Some(value);
        }

        if !has_drivers && name == RETURN {
            if let FunctionBody::Assign(chain) = &decl.body {
                let value = self.compile_expression_list(id, chain, stack);
                stack.add(RETURN, value.clone());
                return Some(value);
            }
        }

        if let Some(value) = stack.get(name) {
            return Some(value);
        }

        match (parent, captured) {
            (Some(parent), Some(captured)) => self.find_value(parent, name, &captured),
            _ => Intrinsic::from_name(name).map(Value::Intrinsic),
        }
    }

    /// Resolves `output` of `id` in a frame with `arguments` bound to inputs.
    ///
    /// Namespaces and zero-input functions share one cached frame for their
    /// whole lifetime; everything else gets a fresh frame per call.
    pub(crate) fn compile_intermediate(
        &mut self,
        id: FunctionId,
        arguments: &[Value],
        output: &str,
    ) -> Value {
        let function = self.function(id);
        let stack = if function.is_memoizable() {
            function
                .cache
                .get_or_init(|| function.fresh_stack())
                .clone()
        } else {
            function.fresh_stack()
        };
        for (port, argument) in function.inputs.iter().zip(arguments) {
            stack.add(&port.name, argument.clone());
        }
        self.compile_function(id, output, &stack)
    }

    /// Invokes `id` with `arguments` and returns the requested output.
    pub(crate) fn call_internal(
        &mut self,
        id: FunctionId,
        arguments: &[Value],
        output: &str,
    ) -> Value {
        let function = self.function(id);
        let shape = function.shape;

        if shape.is_namespace() && arguments.is_empty() {
            if !function.has_member(output) {
                let name = self.qualified_name(id);
                return self.context.log_error(
                    ErrorCode::UnknownMember,
                    format!("`{name}` has no member `{output}`"),
                );
            }
            return self.compile_intermediate(id, arguments, output);
        }
        if shape == FunctionShape::Namespace {
            let name = self.qualified_name(id);
            return self.context.log_error(
                ErrorCode::NamespaceNotConstructible,
                format!("Namespace `{name}` cannot be called with arguments"),
            );
        }
        if shape == FunctionShape::Class
            && function.output_index(output).is_none()
            && function.has_member(output)
        {
            if let Some(method) = self.bind_method(id, arguments, output) {
                return method;
            }
        }

        let function = self.function(id);
        let Some(index) = function.output_index(output) else {
            let name = self.qualified_name(id);
            return self.context.log_error(
                ErrorCode::UnknownMember,
                format!("`{name}` has no output `{output}`"),
            );
        };
        if self.check_inputs(id, arguments).is_err() {
            return Value::Error;
        }
        if shape == FunctionShape::Class {
            return arguments.get(index).cloned().unwrap_or(Value::Error);
        }

        let value = self.compile_intermediate(id, arguments, output);
        let function = self.function(id);
        let (port, doc) = (function.outputs[index].clone(), function.doc.clone());
        match self.satisfied_by(id, &doc, &port, &value) {
            Satisfaction::Satisfied => value,
            Satisfaction::Error => Value::Error,
            Satisfaction::Unsatisfied => {
                let name = self.qualified_name(id);
                let shown = self.display_value(&value);
                let span = if port.span.is_empty() {
                    self.function(id).decl.span.clone()
                } else {
                    port.span.clone()
                };
                self.context
                    .report_at(
                        ErrorCode::OutputNotSatisfied,
                        format!("Output `{port}` of `{name}` is not satisfied by `{shown}`"),
                        &doc,
                        &span,
                    )
                    .into()
            }
        }
    }

    /// Method-call sugar: `instance.member(args)` where `member` takes `this`.
    fn bind_method(
        &mut self,
        class: FunctionId,
        arguments: &[Value],
        name: &str,
    ) -> Option<Value> {
        match self.compile_intermediate(class, &[], name) {
            Value::Function(method)
                if self
                    .function(method)
                    .inputs
                    .first()
                    .is_some_and(|port| port.is_self) =>
            {
                if self.check_inputs(class, arguments).is_err() {
                    return Some(Value::Error);
                }
                Some(Value::Method {
                    instance: Rc::new(Value::Applied {
                        function: class,
                        arguments: arguments.into(),
                    }),
                    function: method,
                })
            }
            Value::Error => Some(Value::Error),
            _ => None,
        }
    }

    /// Checks argument count and types against the inputs of `id`.
    pub(crate) fn check_inputs(
        &mut self,
        id: FunctionId,
        arguments: &[Value],
    ) -> Result<(), Reported> {
        let function = self.function(id);
        let (inputs, doc) = (function.inputs.clone(), function.doc.clone());
        if arguments.len() != inputs.len() {
            let name = self.qualified_name(id);
            return Err(self.context.report(
                ErrorCode::ArgumentCount,
                format!(
                    "`{name}` expects {} argument(s), found {}",
                    inputs.len(),
                    arguments.len()
                ),
            ));
        }
        for (port, argument) in inputs.iter().zip(arguments) {
            match self.satisfied_by(id, &doc, port, argument) {
                Satisfaction::Satisfied => {}
                Satisfaction::Error => return Err(Reported),
                Satisfaction::Unsatisfied => {
                    let name = self.qualified_name(id);
                    let shown = self.display_value(argument);
                    return Err(self.context.report(
                        ErrorCode::ArgumentType,
                        format!("Argument `{port}` of `{name}` cannot accept `{shown}`"),
                    ));
                }
            }
        }
        Ok(())
    }
}
