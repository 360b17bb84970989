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

//! Duplicate-definition checks run once before resolution.

use crate::ast::{FunctionBody, Port, Statement};
use crate::diagnostics::ErrorCode;
use crate::source::SourceDocument;
use std::collections::HashSet;
use std::rc::Rc;

use super::context::CompilationContext;

/// Reports duplicate statement names and duplicate port identifiers.
///
/// Top-level statements of every source share one namespace.
pub(super) fn validate_sources(
    context: &mut CompilationContext,
    sources: &[(Vec<Statement>, Rc<SourceDocument>)],
) {
    let mut seen = HashSet::new();
    for (statements, doc) in sources {
        for statement in statements {
            check_name(context, &mut seen, statement, doc);
            validate_statement(context, statement, doc);
        }
    }
}

fn validate_statement(
    context: &mut CompilationContext,
    statement: &Statement,
    doc: &SourceDocument,
) {
    match statement {
        Statement::Function(decl) => {
            for ports in [&decl.inputs, &decl.outputs].into_iter().flatten() {
                check_ports(context, ports, doc);
            }
            if let FunctionBody::Block(statements) = &decl.body {
                let mut seen = HashSet::new();
                for statement in statements {
                    check_name(context, &mut seen, statement, doc);
                    validate_statement(context, statement, doc);
                }
            }
        }
        Statement::Type(decl) => check_ports(context, &decl.ports, doc),
    }
}

fn check_name<'a>(
    context: &mut CompilationContext,
    seen: &mut HashSet<&'a str>,
    statement: &'a Statement,
    doc: &SourceDocument,
) {
    if !seen.insert(statement.name()) {
        context.report_at(
            ErrorCode::DuplicateDefinition,
            format!("`{}` is defined more than once in this scope", statement.name()),
            doc,
            statement.span(),
        );
    }
}

fn check_ports(context: &mut CompilationContext, ports: &[Port], doc: &SourceDocument) {
    let mut seen = HashSet::new();
    for port in ports {
        if !seen.insert(port.name.as_str()) {
            context.report_at(
                ErrorCode::DuplicateDefinition,
                format!("Port `{}` is declared more than once", port.name),
                doc,
                &port.span,
            );
        }
    }
}
