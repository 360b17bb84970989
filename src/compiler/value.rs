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

//! Resolved values and the operations that apply arguments or names to them.

use crate::ast::{FunctionShape, RETURN};
use crate::diagnostics::ErrorCode;
use std::rc::Rc;
use tracing::trace;

use super::function::FunctionId;
use super::intrinsics::Intrinsic;
use super::types::TypeId;
use super::{Compilation, format_number};

/// A resolved or partially applied value.
///
/// Values are immutable and cheap to clone; functions and types are referred
/// to by arena id.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric literal or computed number.
    Constant(f64),
    /// Reference to a user-defined function, namespace or class.
    Function(FunctionId),
    /// Function applied to arguments; class instances are applied classes.
    Applied {
        function: FunctionId,
        arguments: Rc<[Value]>,
    },
    /// Record built by a type constructor.
    Instance { ty: TypeId, members: Rc<[Value]> },
    /// Constructor of a `type` statement.
    Constructor(TypeId),
    /// Class member bound to its receiver.
    Method {
        instance: Rc<Value>,
        function: FunctionId,
    },
    /// Built-in numeric function.
    Intrinsic(Intrinsic),
    /// Placeholder for a value whose error has already been reported.
    Error,
}

impl Value {
    /// Returns whether this is the error placeholder.
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error)
    }

    /// Returns the number held by a constant.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Constant(value) => Some(*value),
            _ => None,
        }
    }
}

impl Compilation {
    /// Applies `arguments` to `callee`.
    pub(crate) fn call(&mut self, callee: Value, mut arguments: Vec<Value>) -> Value {
        match callee {
            Value::Error => Value::Error,
            Value::Function(id) => {
                let shape = self.function(id).shape;
                if shape == FunctionShape::Namespace {
                    if arguments.is_empty() {
                        return callee;
                    }
                    let name = self.qualified_name(id);
                    return self.context.log_error(
                        ErrorCode::NamespaceNotConstructible,
                        format!("Namespace `{name}` cannot be called with arguments"),
                    );
                }
                if shape == FunctionShape::Class
                    && self.check_inputs(id, &arguments).is_err()
                {
                    return Value::Error;
                }
                trace!(function = %self.qualified_name(id), arguments = arguments.len(), "apply");
                self.resolve_returns(Value::Applied {
                    function: id,
                    arguments: arguments.into(),
                })
            }
            Value::Method { instance, function } => {
                arguments.insert(0, Value::clone(&instance));
                self.call(Value::Function(function), arguments)
            }
            Value::Constructor(ty) => self.construct(ty, arguments),
            Value::Intrinsic(intrinsic) => self.apply_intrinsic(intrinsic, &arguments),
            Value::Constant(_) | Value::Applied { .. } | Value::Instance { .. }
                if arguments.is_empty() =>
            {
                callee
            }
            other => {
                let shown = self.display_value(&other);
                self.context
                    .log_error(ErrorCode::NotCallable, format!("`{shown}` is not callable"))
            }
        }
    }

    /// Applies one member name to `target`.
    pub(crate) fn member(&mut self, target: Value, name: &str) -> Value {
        match target {
            Value::Error => Value::Error,
            Value::Function(id) => self.call_internal(id, &[], name),
            Value::Applied {
                function,
                arguments,
            } => self.call_internal(function, &arguments, name),
            Value::Instance { ty, members } => {
                let index = self.ty(ty).decl.ports.iter().position(|p| p.name == name);
                match index.and_then(|index| members.get(index)) {
                    Some(member) => member.clone(),
                    None => {
                        let type_name = self.ty(ty).decl.name.clone();
                        self.context.log_error(
                            ErrorCode::UnknownMember,
                            format!("Type `{type_name}` has no field `{name}`"),
                        )
                    }
                }
            }
            other => {
                let shown = self.display_value(&other);
                self.context.log_error(
                    ErrorCode::UnknownMember,
                    format!("`{shown}` has no member `{name}`"),
                )
            }
        }
    }

    /// Forces functions whose only output is `return` down to that output.
    ///
    /// Applies to zero-input functions and to applied snapshots; every other
    /// value is returned unchanged.
    pub(crate) fn resolve_returns(&mut self, value: Value) -> Value {
        match &value {
            Value::Function(id) => {
                let function = self.function(*id);
                if !function.shape.is_namespace()
                    && function.inputs.is_empty()
                    && function.returns_single()
                {
                    return self.call_internal(*id, &[], RETURN);
                }
            }
            Value::Applied {
                function,
                arguments,
            } if self.function(*function).returns_single() => {
                let arguments = arguments.clone();
                return self.call_internal(*function, &arguments, RETURN);
            }
            _ => {}
        }
        value
    }

    /// Renders a value for diagnostics.
    pub fn display_value(&self, value: &Value) -> String {
        match value {
            Value::Constant(number) => format_number(*number),
            Value::Function(id) => self.qualified_name(*id),
            Value::Applied {
                function,
                arguments,
            } => format!(
                "{}({})",
                self.qualified_name(*function),
                self.display_list(arguments)
            ),
            Value::Instance { ty, members } => {
                format!("{}({})", self.ty(*ty).decl.name, self.display_list(members))
            }
            Value::Constructor(ty) => self.ty(*ty).decl.name.clone(),
            Value::Method { instance, function } => format!(
                "{}.{}",
                self.display_value(instance),
                self.function(*function).name
            ),
            Value::Intrinsic(intrinsic) => intrinsic.name().to_string(),
            Value::Error => "<error>".to_string(),
        }
    }

    fn display_list(&self, values: &[Value]) -> String {
        values
            .iter()
            .map(|value| self.display_value(value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
