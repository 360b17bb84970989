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

//! User-defined functions, namespaces and classes.

use crate::ast::{FunctionBody, FunctionDecl, FunctionShape, Port, SourceSpan, Statement};
use crate::source::SourceDocument;
use indexmap::IndexMap;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::stack::CompilationStack;
use super::types::TypeRef;

/// Arena index of a [`CustomFunction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub(crate) usize);

/// One named sub-statement of a block body.
#[derive(Debug, Clone)]
pub(crate) struct Driver {
    pub(crate) statement: Statement,
    pub(crate) doc: Rc<SourceDocument>,
}

/// A user-defined function (which may or may not have a block body).
pub(crate) struct CustomFunction {
    pub(crate) name: String,
    pub(crate) parent: Option<FunctionId>,
    pub(crate) decl: Rc<FunctionDecl>,
    pub(crate) doc: Rc<SourceDocument>,
    pub(crate) shape: FunctionShape,
    pub(crate) inputs: Rc<[Port]>,
    pub(crate) outputs: Rc<[Port]>,
    // Present iff the body is a block; first definition wins on duplicates.
    pub(crate) drivers: Option<IndexMap<String, Driver>>,
    // Frame live at the point of definition, read for closure fallback.
    pub(crate) captured: Option<CompilationStack>,
    pub(crate) types: HashMap<String, TypeRef>,
    // Shared frame for namespaces and zero-input functions.
    pub(crate) cache: OnceCell<CompilationStack>,
}

impl CustomFunction {
    pub(crate) fn new(
        parent: Option<FunctionId>,
        decl: Rc<FunctionDecl>,
        captured: Option<CompilationStack>,
        doc: Rc<SourceDocument>,
    ) -> Self {
        let drivers = match &decl.body {
            FunctionBody::Block(statements) => Some(collect_drivers(
                statements.iter().map(|statement| (statement, &doc)),
            )),
            FunctionBody::Assign(_) => None,
        };
        Self::with_drivers(parent, decl, captured, doc, drivers)
    }

    /// Builds the root namespace holding the top-level statements of every
    /// compiled source.
    pub(crate) fn global(sources: &[(Vec<Statement>, Rc<SourceDocument>)]) -> Self {
        let decl = Rc::new(FunctionDecl {
            name: String::new(),
            inputs: None,
            outputs: None,
            body: FunctionBody::Block(Vec::new()),
            span: SourceSpan::default(),
        });
        let doc = sources
            .first()
            .map(|(_, doc)| doc.clone())
            .unwrap_or_else(|| Rc::new(SourceDocument::new("<inline>", "")));
        let drivers = collect_drivers(
            sources
                .iter()
                .flat_map(|(statements, doc)| statements.iter().map(move |s| (s, doc))),
        );
        Self::with_drivers(None, decl, None, doc, Some(drivers))
    }

    fn with_drivers(
        parent: Option<FunctionId>,
        decl: Rc<FunctionDecl>,
        captured: Option<CompilationStack>,
        doc: Rc<SourceDocument>,
        drivers: Option<IndexMap<String, Driver>>,
    ) -> Self {
        let shape = decl.shape();
        let outputs: Rc<[Port]> = match (&decl.outputs, shape) {
            (Some(outputs), _) => outputs.as_slice().into(),
            (None, FunctionShape::Namespace) => Rc::from(Vec::new()),
            (None, _) => Rc::from(vec![Port::implicit_return()]),
        };
        // Classes are identity constructors: their outputs are their inputs.
        let inputs: Rc<[Port]> = match shape {
            FunctionShape::Class => outputs.clone(),
            _ => decl.inputs.as_deref().unwrap_or_default().into(),
        };
        Self {
            name: decl.name.clone(),
            parent,
            decl,
            doc,
            shape,
            inputs,
            outputs,
            drivers,
            captured,
            types: HashMap::new(),
            cache: OnceCell::new(),
        }
    }

    /// Returns whether every invocation of this function sees the same values.
    pub(crate) fn is_memoizable(&self) -> bool {
        self.shape.is_namespace() || self.inputs.is_empty()
    }

    /// Returns whether `name` is a member of this namespace or class.
    pub(crate) fn has_member(&self, name: &str) -> bool {
        self.shape.is_namespace()
            && self
                .drivers
                .as_ref()
                .is_some_and(|drivers| drivers.contains_key(name))
    }

    /// Returns whether the only output is the implicit/explicit `return`.
    pub(crate) fn returns_single(&self) -> bool {
        matches!(&*self.outputs, [port] if port.name == crate::ast::RETURN)
    }

    pub(crate) fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|port| port.name == name)
    }

    /// Frame a fresh invocation starts from.
    pub(crate) fn fresh_stack(&self) -> CompilationStack {
        self.captured
            .as_ref()
            .map(CompilationStack::push)
            .unwrap_or_default()
    }
}

fn collect_drivers<'a>(
    statements: impl Iterator<Item = (&'a Statement, &'a Rc<SourceDocument>)>,
) -> IndexMap<String, Driver> {
    let mut drivers = IndexMap::new();
    for (statement, doc) in statements {
        drivers
            .entry(statement.name().to_string())
            .or_insert_with(|| Driver {
                statement: statement.clone(),
                doc: doc.clone(),
            });
    }
    drivers
}
