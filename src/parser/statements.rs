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

//! Statement parsers: functions, namespaces, classes and type statements.

use crate::ast::{
    FunctionBody, FunctionDecl, Port, RETURN, SELF_PARAMETER, SourceSpan, Span, Statement,
    TypeDecl,
};
use nom::Parser;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, opt},
    error::context,
    multi::{many0, separated_list0},
    sequence::{delimited, preceded},
};
use std::rc::Rc;

use super::PResult;
use super::expr::expression_list;
use super::utils::{identifier, keyword, type_annotation, ws, ws0, ws_char};

/// Parses one statement.
pub(super) fn statement(input: Span<'_>) -> PResult<'_, Statement> {
    // Type statements first so `type` is never read as a function name.
    alt((
        map(type_statement, |decl| Statement::Type(Rc::new(decl))),
        map(function_statement, |decl| Statement::Function(Rc::new(decl))),
    ))
    .parse(input)
}

/// Parses `type Name(ports...);`.
fn type_statement(input: Span<'_>) -> PResult<'_, TypeDecl> {
    let (input, _) = ws0(input)?;
    let start = input;
    let (input, _) = keyword("type").parse(input)?;
    let (input, name) = context("type name", identifier).parse(input)?;
    let (input, ports) = opt(port_list).parse(input)?;
    let (input, _) = context("';'", ws_char(';')).parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        TypeDecl {
            name,
            ports: ports.unwrap_or_default(),
            span,
        },
    ))
}

/// Parses a function, namespace or class definition.
fn function_statement(input: Span<'_>) -> PResult<'_, FunctionDecl> {
    let (input, _) = ws0(input)?;
    let start = input;
    let (input, name) = identifier(input)?;
    let (input, inputs) = opt(port_list).parse(input)?;
    let (input, outputs) = opt(output_clause).parse(input)?;
    let (input, body) = context("function body", function_body).parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        FunctionDecl {
            name,
            inputs,
            outputs,
            body,
            span,
        },
    ))
}

/// Parses either `{ statements }` or `= chain;`.
fn function_body(input: Span<'_>) -> PResult<'_, FunctionBody> {
    alt((
        map(
            delimited(
                ws_char('{'),
                many0(statement),
                context("'}'", ws_char('}')),
            ),
            FunctionBody::Block,
        ),
        map(
            delimited(
                ws_char('='),
                context("expression", expression_list),
                context("';'", ws_char(';')),
            ),
            FunctionBody::Assign,
        ),
    ))
    .parse(input)
}

/// Parses `:Type` (single `return` output) or `-> (ports...)`.
fn output_clause(input: Span<'_>) -> PResult<'_, Vec<Port>> {
    alt((
        preceded(ws(tag("->")), context("output ports", port_list)),
        map(preceded(ws_char(':'), type_annotation), |ty| {
            let span = ty.span.clone();
            vec![Port {
                name: RETURN.to_string(),
                ty: Some(ty),
                is_self: false,
                span,
            }]
        }),
    ))
    .parse(input)
}

/// Parses a parenthesised port list.
fn port_list(input: Span<'_>) -> PResult<'_, Vec<Port>> {
    delimited(
        ws_char('('),
        separated_list0(ws_char(','), port),
        context("')'", ws_char(')')),
    )
    .parse(input)
}

/// Parses one port (`name` or `name:Type`).
fn port(input: Span<'_>) -> PResult<'_, Port> {
    let (input, _) = ws0(input)?;
    let start = input;
    let (input, name) = context("port name", identifier).parse(input)?;
    let end = input;
    let (input, ty) = opt(preceded(ws_char(':'), context("type", type_annotation))).parse(input)?;
    let (input, _) = ws0(input)?;
    Ok((
        input,
        Port {
            is_self: name == SELF_PARAMETER,
            name,
            ty,
            span: SourceSpan::from_bounds(start, end),
        },
    ))
}
