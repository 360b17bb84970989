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

//! Expression-chain compilation.

use crate::ast::{ExprKind, ExprList, SourceSpan};
use crate::diagnostics::{CallSite, ErrorCode};

use super::function::FunctionId;
use super::stack::CompilationStack;
use super::{Compilation, Value};

impl Compilation {
    /// Left-folds an expression chain inside function `id`.
    ///
    /// The first link must be a number or a variable and every later link a
    /// member access or a call; anything else is reported locally and the
    /// chain continues with an error placeholder.
    pub(crate) fn compile_expression_list(
        &mut self,
        id: FunctionId,
        chain: &ExprList,
        stack: &CompilationStack,
    ) -> Value {
        let mut links = chain.exprs.iter();
        let Some(first) = links.next() else {
            return self.malformed(id, &chain.span, "Empty expression");
        };

        let mut previous = match &first.kind {
            ExprKind::Number(number) => Value::Constant(*number),
            ExprKind::Variable(name) => self.with_call_site(id, &first.span, |this| {
                this.compile_function(id, name, stack)
            }),
            ExprKind::Member(_) | ExprKind::Call(_) => {
                self.malformed(id, &first.span, "Expression cannot start with a member or call")
            }
        };

        for link in links {
            previous = match &link.kind {
                ExprKind::Member(name) => {
                    self.with_call_site(id, &link.span, |this| this.member(previous, name))
                }
                ExprKind::Call(arguments) => {
                    let mut values = Vec::with_capacity(arguments.len());
                    for argument in arguments {
                        values.push(self.compile_expression_list(id, argument, stack));
                    }
                    self.with_call_site(id, &link.span, |this| this.call(previous, values))
                }
                ExprKind::Number(_) | ExprKind::Variable(_) => {
                    self.malformed(id, &link.span, "Literal or name cannot follow an expression")
                }
            };
        }
        previous
    }

    /// Runs `f` with a call site for `span` inside `id` on the call-site stack.
    fn with_call_site(
        &mut self,
        id: FunctionId,
        span: &SourceSpan,
        f: impl FnOnce(&mut Self) -> Value,
    ) -> Value {
        let site = CallSite::new(self.qualified_name(id), &self.function(id).doc, span);
        self.context.push(site);
        let value = f(self);
        self.context.pop();
        value
    }

    fn malformed(&mut self, id: FunctionId, span: &SourceSpan, message: &str) -> Value {
        let doc = self.function(id).doc.clone();
        self.context
            .report_at(ErrorCode::MalformedExpression, message, &doc, span)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    fn link(kind: ExprKind) -> Expr {
        Expr {
            kind,
            span: SourceSpan { start: 4, end: 5 },
        }
    }

    fn chain(kinds: Vec<ExprKind>) -> ExprList {
        ExprList {
            exprs: kinds.into_iter().map(link).collect(),
            span: SourceSpan { start: 4, end: 5 },
        }
    }

    fn compile_chain(c: &mut Compilation, list: &ExprList) -> Value {
        let stack = CompilationStack::new();
        c.compile_expression_list(c.global, list, &stack)
    }

    fn codes(c: &Compilation) -> Vec<ErrorCode> {
        c.diagnostics().iter().map(|error| error.code).collect()
    }

    #[test]
    fn chain_cannot_start_with_member_or_call() {
        let mut c = crate::compile_element("a = 1;").expect("parse");
        let value = compile_chain(&mut c, &chain(vec![ExprKind::Member("x".to_string())]));
        assert_eq!(value, Value::Error);
        assert_eq!(codes(&c), vec![ErrorCode::MalformedExpression]);

        let value = compile_chain(&mut c, &chain(vec![ExprKind::Call(Vec::new())]));
        assert_eq!(value, Value::Error);
        assert_eq!(codes(&c).len(), 2);
    }

    #[test]
    fn literal_after_first_link_is_malformed() {
        let mut c = crate::compile_element("a = 1;").expect("parse");
        let list = chain(vec![
            ExprKind::Variable("a".to_string()),
            ExprKind::Number(3.0),
        ]);
        assert_eq!(compile_chain(&mut c, &list), Value::Error);
        let [err] = c.diagnostics() else {
            panic!("expected exactly one diagnostic, got {:?}", c.diagnostics());
        };
        assert_eq!(err.code, ErrorCode::MalformedExpression);
        assert_eq!((err.line, err.column), (1, 5));
    }

    #[test]
    fn malformed_argument_stays_local() {
        let mut c = crate::compile_element("a = 1;").expect("parse");
        let bad = chain(vec![ExprKind::Member("x".to_string())]);
        let good = chain(vec![ExprKind::Number(2.0)]);
        let list = chain(vec![
            ExprKind::Variable("add".to_string()),
            ExprKind::Call(vec![bad, good]),
        ]);
        assert_eq!(compile_chain(&mut c, &list), Value::Error);
        assert_eq!(codes(&c), vec![ErrorCode::MalformedExpression]);

        let list = chain(vec![
            ExprKind::Variable("add".to_string()),
            ExprKind::Call(vec![
                chain(vec![ExprKind::Variable("a".to_string())]),
                chain(vec![ExprKind::Number(2.0)]),
            ]),
        ]);
        assert_eq!(compile_chain(&mut c, &list), Value::Constant(3.0));
        assert_eq!(codes(&c).len(), 1);
    }
}
