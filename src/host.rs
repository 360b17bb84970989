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

//! Host-facing evaluation: argument deserialisation and result
//! serialisation over flat lists of floats.

use crate::ast::{FunctionShape, Port};
use crate::compiler::{Compilation, FunctionId, PortLayout, Value, format_number};
use crate::diagnostics::CompileError;
use crate::source::SourceDocument;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

/// Host-level evaluation failure.
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("function `{0}` was not found")]
    FunctionNotFound(String),
    #[error("`{path}` expects {expected} argument value(s), found {found}")]
    ArgumentCount {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("value `{0}` cannot be serialized")]
    NotSerializable(String),
    #[error("evaluation reported {} error(s)", .0.len())]
    Compile(Vec<CompileError>),
    #[error(transparent)]
    Parse(#[from] CompileError),
}

/// Flat float cursor; counts every request so shortfalls can be reported.
struct Arguments<'a> {
    values: std::slice::Iter<'a, f64>,
    consumed: usize,
}

impl Arguments<'_> {
    fn pull(&mut self) -> f64 {
        self.consumed += 1;
        self.values.next().copied().unwrap_or(f64::NAN)
    }
}

impl Compilation {
    /// Evaluates the function at `path` with flat `arguments` and flattens
    /// the result.
    ///
    /// Numeric inputs take one float each; class- and type-typed inputs
    /// take their fields recursively. Any diagnostic reported during the
    /// evaluation turns into [`EvaluateError::Compile`].
    pub fn evaluate_and_serialize(
        &mut self,
        path: &str,
        arguments: &[f64],
    ) -> Result<Vec<f64>, EvaluateError> {
        let errors_before = self.context.errors().len();
        let Some(function) = self.get_function(path) else {
            return Err(self.failure(errors_before, || {
                EvaluateError::FunctionNotFound(path.to_string())
            }));
        };

        let result = match function {
            Value::Function(id) if self.function(id).shape != FunctionShape::Namespace => {
                let mut cursor = Arguments {
                    values: arguments.iter(),
                    consumed: 0,
                };
                let inputs = self.function(id).inputs.clone();
                let doc = self.function(id).doc.clone();
                let values = self.deserialize_ports(id, &doc, &inputs, &mut cursor);
                if cursor.consumed != arguments.len() {
                    return Err(EvaluateError::ArgumentCount {
                        path: path.to_string(),
                        expected: cursor.consumed,
                        found: arguments.len(),
                    });
                }
                self.call(Value::Function(id), values)
            }
            Value::Intrinsic(intrinsic) if arguments.len() == intrinsic.arity() => {
                let values = arguments.iter().copied().map(Value::Constant).collect();
                self.call(function, values)
            }
            other if arguments.is_empty() => other,
            _ => {
                return Err(EvaluateError::ArgumentCount {
                    path: path.to_string(),
                    expected: 0,
                    found: arguments.len(),
                });
            }
        };

        let mut out = Vec::new();
        self.serialize(&result, &mut out)?;
        if let Some(errors) = self.context.errors().get(errors_before..) {
            if !errors.is_empty() {
                return Err(EvaluateError::Compile(errors.to_vec()));
            }
        }
        debug!(path, results = out.len(), "evaluated");
        Ok(out)
    }

    /// Prefers newly reported diagnostics over `otherwise`.
    fn failure(
        &self,
        errors_before: usize,
        otherwise: impl FnOnce() -> EvaluateError,
    ) -> EvaluateError {
        match self.context.errors().get(errors_before..) {
            Some(errors) if !errors.is_empty() => EvaluateError::Compile(errors.to_vec()),
            _ => otherwise(),
        }
    }

    fn deserialize_ports(
        &mut self,
        scope: FunctionId,
        doc: &Rc<SourceDocument>,
        ports: &[Port],
        cursor: &mut Arguments<'_>,
    ) -> Vec<Value> {
        ports
            .iter()
            .map(|port| self.deserialize_port(scope, doc, port, cursor))
            .collect()
    }

    fn deserialize_port(
        &mut self,
        scope: FunctionId,
        doc: &Rc<SourceDocument>,
        port: &Port,
        cursor: &mut Arguments<'_>,
    ) -> Value {
        match self.port_layout(scope, doc, port) {
            PortLayout::Scalar => Value::Constant(cursor.pull()),
            PortLayout::Class(class) => {
                let inputs = self.function(class).inputs.clone();
                let doc = self.function(class).doc.clone();
                let arguments = self.deserialize_ports(class, &doc, &inputs, cursor);
                Value::Applied {
                    function: class,
                    arguments: arguments.into(),
                }
            }
            PortLayout::Record(ty) => {
                let record = self.ty(ty);
                let (fields, scope, doc) = (record.decl.clone(), record.scope, record.doc.clone());
                let members = self.deserialize_ports(scope, &doc, &fields.ports, cursor);
                Value::Instance {
                    ty,
                    members: members.into(),
                }
            }
            PortLayout::Unresolved => Value::Error,
        }
    }

    fn serialize(&mut self, value: &Value, out: &mut Vec<f64>) -> Result<(), EvaluateError> {
        match value {
            Value::Constant(number) => out.push(*number),
            Value::Applied {
                function,
                arguments,
            } => {
                let outputs = self.function(*function).outputs.clone();
                for port in outputs.iter() {
                    let output = self.call_internal(*function, arguments, &port.name);
                    self.serialize(&output, out)?;
                }
            }
            Value::Instance { members, .. } => {
                for member in members.iter() {
                    self.serialize(member, out)?;
                }
            }
            Value::Error => {}
            other => return Err(EvaluateError::NotSerializable(self.display_value(other))),
        }
        Ok(())
    }
}

/// Joins results with `", "`, spelling infinities as `Infinity`.
pub fn format_results(results: &[f64]) -> String {
    results
        .iter()
        .map(|value| format_number(*value))
        .collect::<Vec<_>>()
        .join(", ")
}
