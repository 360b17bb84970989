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

//! Expression chain parser.

use crate::ast::{Expr, ExprKind, ExprList, SourceSpan, Span};
use nom::Parser;
use nom::{
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{map_res, opt, recognize},
    error::context,
    multi::separated_list0,
    sequence::{pair, tuple},
};

use super::PResult;
use super::utils::{identifier, symbol, ws, ws0, ws_char};

/// Parses one chain: an atom followed by member accesses and calls.
pub(super) fn expression_list(input: Span<'_>) -> PResult<'_, ExprList> {
    let (input, _) = ws0(input)?;
    let start = input;
    let (mut input, first) = atom(input)?;
    let mut exprs = vec![first];
    loop {
        let (next, link) = opt(alt((member, call))).parse(input)?;
        let Some(link) = link else {
            break;
        };
        exprs.push(link);
        input = next;
    }
    let span = SourceSpan::from_bounds(start, input);
    Ok((input, ExprList { exprs, span }))
}

/// Parses the leading number or identifier of a chain.
fn atom(input: Span<'_>) -> PResult<'_, Expr> {
    alt((number, variable)).parse(input)
}

/// Parses numeric literals (`-1`, `2.5`, `3e-2`).
fn number(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, value) = float_literal(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Expr {
            kind: ExprKind::Number(value),
            span,
        },
    ))
}

/// Parses the digits of a numeric literal.
fn float_literal(input: Span<'_>) -> PResult<'_, f64> {
    // Hand-rolled so `3.x` stays a number followed by a member access.
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: Span<'_>| s.fragment().parse::<f64>(),
    )
    .parse(input)
}

/// Parses an identifier reference.
fn variable(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, name) = identifier(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Expr {
            kind: ExprKind::Variable(name),
            span,
        },
    ))
}

/// Parses a member access link (`.name`).
fn member(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, _) = ws0(input)?;
    let start = input;
    let (input, _) = symbol('.').parse(input)?;
    let (input, _) = ws0(input)?;
    let (input, name) = context("member name", identifier).parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Expr {
            kind: ExprKind::Member(name),
            span,
        },
    ))
}

/// Parses a call link (`(arg, ...)`).
fn call(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, _) = ws0(input)?;
    let start = input;
    let (input, _) = symbol('(').parse(input)?;
    let (input, arguments) = separated_list0(ws_char(','), expression_list).parse(input)?;
    let (input, _) = context("')'", ws(char(')'))).parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Expr {
            kind: ExprKind::Call(arguments),
            span,
        },
    ))
}
