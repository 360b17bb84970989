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

//! Type lookup, satisfaction checks and record construction.

use crate::ast::{FunctionDecl, FunctionShape, Port, Statement, TypeDecl};
use crate::diagnostics::ErrorCode;
use crate::source::SourceDocument;
use std::rc::Rc;
use tracing::debug;

use super::context::Reported;
use super::function::{Driver, FunctionId};
use super::{Compilation, Value};

/// Arena index of a [`CustomType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) usize);

/// A type usable in a port annotation.
#[derive(Debug, Clone)]
pub(crate) enum TypeRef {
    Any,
    Number,
    Integer,
    Custom(TypeId),
    /// Class used as a type; identity is the class declaration.
    Class {
        decl: Rc<FunctionDecl>,
        scope: FunctionId,
    },
}

impl TypeRef {
    fn builtin(name: &str) -> Option<Self> {
        match name {
            "Any" => Some(TypeRef::Any),
            "Number" | "Num" => Some(TypeRef::Number),
            "Integer" | "Int" => Some(TypeRef::Integer),
            _ => None,
        }
    }
}

/// Nominal record declared by a `type` statement.
pub(crate) struct CustomType {
    pub(crate) decl: Rc<TypeDecl>,
    pub(crate) scope: FunctionId,
    pub(crate) doc: Rc<SourceDocument>,
}

/// How a port's values are laid out in a flat float list.
pub(crate) enum PortLayout {
    Scalar,
    Class(FunctionId),
    Record(TypeId),
    Unresolved,
}

/// Result of checking a value against a port type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Satisfaction {
    Satisfied,
    Unsatisfied,
    /// The check could not run because an error was already reported.
    Error,
}

impl Compilation {
    /// Resolves a type name visible from `scope`, caching the answer there.
    pub(crate) fn find_type(&mut self, scope: FunctionId, name: &str) -> Option<TypeRef> {
        let function = self.function(scope);
        if let Some(found) = function.types.get(name) {
            return Some(found.clone());
        }
        let driver = function
            .drivers
            .as_ref()
            .and_then(|drivers| drivers.get(name))
            .cloned();
        let parent = function.parent;

        let found = match driver {
            Some(Driver {
                statement: Statement::Type(decl),
                doc,
            }) => {
                let id = TypeId(self.types.len());
                debug!(name = %decl.name, id = id.0, "define type");
                self.types.push(CustomType { decl, scope, doc });
                Some(TypeRef::Custom(id))
            }
            Some(Driver {
                statement: Statement::Function(decl),
                ..
            }) if decl.shape() == FunctionShape::Class => {
                Some(TypeRef::Class { decl, scope })
            }
            _ => match parent {
                Some(parent) => self.find_type(parent, name),
                None => TypeRef::builtin(name),
            },
        };
        if let Some(found) = &found {
            self.functions[scope.0]
                .types
                .insert(name.to_string(), found.clone());
        }
        found
    }

    /// Resolves the declared type of `port`, reporting unknown names.
    pub(crate) fn port_type(
        &mut self,
        scope: FunctionId,
        doc: &SourceDocument,
        port: &Port,
    ) -> Result<TypeRef, Reported> {
        let Some(annotation) = &port.ty else {
            return Ok(TypeRef::Any);
        };
        if let Some(found) = self.find_type(scope, &annotation.name) {
            return Ok(found);
        }
        if !self
            .unknown_types
            .insert((scope, annotation.name.clone()))
        {
            return Err(Reported);
        }
        Err(self.context.report_at(
            ErrorCode::UnknownType,
            format!("Unknown type `{}`", annotation.name),
            doc,
            &annotation.span,
        ))
    }

    /// Checks `value` against the type of `port` as seen from `scope`.
    pub(crate) fn satisfied_by(
        &mut self,
        scope: FunctionId,
        doc: &SourceDocument,
        port: &Port,
        value: &Value,
    ) -> Satisfaction {
        if value.is_error() {
            return Satisfaction::Error;
        }
        match self.port_type(scope, doc, port) {
            Ok(ty) if self.accepts(&ty, value) => Satisfaction::Satisfied,
            Ok(_) => Satisfaction::Unsatisfied,
            Err(Reported) => Satisfaction::Error,
        }
    }

    fn accepts(&self, ty: &TypeRef, value: &Value) -> bool {
        match (ty, value) {
            (TypeRef::Any, _) => true,
            (TypeRef::Number, Value::Constant(_)) => true,
            (TypeRef::Integer, Value::Constant(number)) => {
                number.is_finite() && number.fract() == 0.0
            }
            (TypeRef::Custom(expected), Value::Instance { ty, .. }) => expected == ty,
            (TypeRef::Class { decl, .. }, Value::Applied { function, .. }) => {
                Rc::ptr_eq(decl, &self.function(*function).decl)
            }
            _ => false,
        }
    }

    /// Classifies `port` for flat (de)serialisation.
    pub(crate) fn port_layout(
        &mut self,
        scope: FunctionId,
        doc: &SourceDocument,
        port: &Port,
    ) -> PortLayout {
        match self.port_type(scope, doc, port) {
            Ok(TypeRef::Any | TypeRef::Number | TypeRef::Integer) => PortLayout::Scalar,
            Ok(TypeRef::Custom(ty)) => PortLayout::Record(ty),
            Ok(TypeRef::Class { decl, scope }) => {
                match self.compile_intermediate(scope, &[], &decl.name) {
                    Value::Function(class) => PortLayout::Class(class),
                    _ => PortLayout::Unresolved,
                }
            }
            Err(Reported) => PortLayout::Unresolved,
        }
    }

    /// Builds an instance of `ty` after checking arity and field types.
    pub(crate) fn construct(&mut self, ty: TypeId, arguments: Vec<Value>) -> Value {
        let CustomType { decl, scope, doc } = self.ty(ty);
        let (decl, scope, doc) = (decl.clone(), *scope, doc.clone());

        if arguments.len() != decl.ports.len() {
            return self.context.log_error(
                ErrorCode::ArgumentCount,
                format!(
                    "Type `{}` expects {} argument(s), found {}",
                    decl.name,
                    decl.ports.len(),
                    arguments.len()
                ),
            );
        }
        for (port, argument) in decl.ports.iter().zip(&arguments) {
            match self.satisfied_by(scope, &doc, port, argument) {
                Satisfaction::Satisfied => {}
                Satisfaction::Unsatisfied => {
                    let shown = self.display_value(argument);
                    return self.context.log_error(
                        ErrorCode::ArgumentType,
                        format!(
                            "Field `{port}` of type `{}` cannot hold `{shown}`",
                            decl.name
                        ),
                    );
                }
                Satisfaction::Error => return Value::Error,
            }
        }
        Value::Instance {
            ty,
            members: arguments.into(),
        }
    }

    pub(crate) fn ty(&self, id: TypeId) -> &CustomType {
        &self.types[id.0]
    }
}
