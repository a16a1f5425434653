// Dweve Logo - Logo Language Server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recursive-descent parser for Logo.
//!
//! # Error Recovery
//!
//! The parser never fails. When input does not fit the grammar it records a
//! [`SyntaxError`] and carries on:
//!
//! - A single unexpected token before the one required is deleted
//!   ("extraneous input").
//! - A required token that is absent is assumed present ("missing X at Y").
//! - Stray tokens between statements are skipped up to the next token that
//!   can start a statement or close the enclosing construct.
//!
//! After an error the parser stays in recovery mode until it matches a token,
//! which keeps one mistake from producing a cascade of diagnostics.
//!
//! Nesting deeper than [`MAX_NESTING_DEPTH`] is reported once per document
//! and the offending construct is skipped up to its closer, so both this
//! parser and the tree walk stay within a bounded stack.
//!
//! Source text is lower-cased character by character before lexing, so
//! keywords and names are case-insensitive and every column still points
//! into the original text.

use crate::ast::{
    Argument, Binding, BindingForm, Block, Call, Command, Datum, Definition, DefinitionForm,
    Expr, Loop, LoopForm, ParseTree, SetPosition, Statement,
};
use crate::error::SyntaxError;
use crate::lexer::tokenize;
use crate::limits::MAX_NESTING_DEPTH;
use crate::token::{Keyword, Token, TokenKind, VOCABULARY};

/// Result of parsing one document: a best-effort tree plus every error found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub tree: ParseTree,
    /// Lexical and syntax errors in source order.
    pub errors: Vec<SyntaxError>,
}

impl ParsedDocument {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a complete Logo document.
///
/// # Examples
///
/// ```
/// let parsed = logo_core::parse("repeat 4 [forward 10 right 90]");
/// assert!(parsed.errors.is_empty());
/// assert_eq!(parsed.tree.statements.len(), 1);
///
/// let broken = logo_core::parse("forward");
/// assert_eq!(broken.errors.len(), 1);
/// ```
pub fn parse(text: &str) -> ParsedDocument {
    let lowered: String = text.chars().map(fold_case).collect();
    let (tokens, mut errors) = tokenize(&lowered);
    let mut parser = Parser::new(tokens);
    let statements = parser.statements(Scope::Document);
    errors.append(&mut parser.errors);
    errors.sort_by_key(|error| (error.line, error.column));
    ParsedDocument {
        tree: ParseTree { statements },
        errors,
    }
}

/// Lower-case `c` unless that would change the number of characters.
///
/// Positions are reported against the original text, so folding must map
/// every character to exactly one character (`İ` lower-cases to two).
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Where a statement list lives, which decides what may end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Document,
    Block,
    ProcedureBody,
}

impl Scope {
    fn is_terminator(self, kind: TokenKind) -> bool {
        match self {
            Scope::Document => kind == TokenKind::Eof,
            Scope::Block => kind == TokenKind::RBracket,
            Scope::ProcedureBody => kind == TokenKind::Keyword(Keyword::End),
        }
    }

    /// Opening and closing tokens of the enclosing construct.
    fn delimiters(self) -> (TokenKind, TokenKind) {
        match self {
            Scope::Document => (TokenKind::Eof, TokenKind::Eof),
            Scope::Block => (TokenKind::LBracket, TokenKind::RBracket),
            Scope::ProcedureBody => (
                TokenKind::Keyword(Keyword::To),
                TokenKind::Keyword(Keyword::End),
            ),
        }
    }
}

/// Argument layout of a built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Exprs(usize),
    ExprBlock,
    ExprBlockBlock,
    Block,
    BlockExpr,
}

fn command_shape(keyword: Keyword) -> Option<Shape> {
    use Keyword::*;
    let shape = match keyword {
        Forward | Fd | Back | Bk | Left | Lt | Right | Rt | Setx | Sety | Setheading | Seth
        | Label | Print | Show | Setlabelheight | Setcolor | Setpencolor | Setwidth
        | Setpensize | Changeshape | Csh | Test | Wait => Shape::Exprs(1),
        Setxy | Arc | Ellipse => Shape::Exprs(2),
        Home | Showturtle | St | Hideturtle | Ht | Clean | Clearscreen | Cs | Fill | Wrap
        | Window | Fence | Penup | Pu | Pendown | Pd | Repcount | Bye => Shape::Exprs(0),
        Filled | Repeat | If | While | Until => Shape::ExprBlock,
        Ifelse => Shape::ExprBlockBlock,
        Iftrue | Iffalse => Shape::Block,
        DoWhile | DoUntil => Shape::BlockExpr,
        _ => return None,
    };
    Some(shape)
}

fn is_special_statement(keyword: Keyword) -> bool {
    use Keyword::*;
    matches!(
        keyword,
        Set | To | Define | Make | Name | Localmake | For | Dotimes
    )
}

fn is_statement_start(kind: TokenKind) -> bool {
    match kind {
        TokenKind::Name => true,
        TokenKind::Keyword(keyword) => {
            command_shape(keyword).is_some() || is_special_statement(keyword)
        }
        _ => false,
    }
}

/// Minimum and maximum argument count of a built-in reporter.
fn query_arity(keyword: Keyword) -> Option<(usize, usize)> {
    use Keyword::*;
    let arity = match keyword {
        Pos | Xcor | Ycor | Heading | Shownp | ShownQ | Labelsize | Pendownp | PendownQ
        | Pencolor | Pc | Pensize => (0, 0),
        Towards => (0, 1),
        Def | Thing | First | Butfirst | Last | Butlast | Pick | Wordp | WordQ | Listp
        | ListQ | Arrayp | ArrayQ | Numberp | NumberQ | Emptyp | EmptyQ => (1, 1),
        Item | Sum | Minus | Modulo | Power | Equalp | EqualQ | Notequalp | NotequalQ
        | Beforep | BeforeQ | Substringp | SubstringQ => (2, 2),
        Random => (1, 2),
        _ => return None,
    };
    Some(arity)
}

/// Reporters that only appear right after `(`, taking any number of inputs.
fn is_parenthesized_query(keyword: Keyword) -> bool {
    matches!(keyword, Keyword::List | Keyword::Readword | Keyword::Readlist)
        || query_arity(keyword).is_some()
}

fn is_expression_start(kind: TokenKind) -> bool {
    match kind {
        TokenKind::Number
        | TokenKind::Word
        | TokenKind::ColonName
        | TokenKind::LBracket
        | TokenKind::LParen => true,
        TokenKind::Keyword(keyword) => query_arity(keyword).is_some(),
        _ => false,
    }
}

fn is_comparison(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Equal
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEqual
            | TokenKind::GreaterEqual
            | TokenKind::NotEqual
    )
}

/// Render the set of kinds accepted by `accepts`, in vocabulary order.
fn expecting(accepts: impl Fn(TokenKind) -> bool) -> String {
    let names: Vec<String> = VOCABULARY
        .iter()
        .copied()
        .filter(|kind| accepts(*kind))
        .map(TokenKind::display_name)
        .collect();
    match names.as_slice() {
        [single] => single.clone(),
        _ => format!("{{{}}}", names.join(", ")),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
    errors: Vec<SyntaxError>,
    recovering: bool,
    depth: usize,
    /// Whether the nesting limit has already been reported.
    too_deep: bool,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        let eof = tokens
            .last()
            .filter(|token| token.kind == TokenKind::Eof)
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, "", 1, 0));
        Self {
            tokens,
            pos: 0,
            eof,
            errors: Vec::new(),
            recovering: false,
            depth: 0,
            too_deep: false,
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn kind_at(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Consume the current token as part of a match.
    fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        self.recovering = false;
        token
    }

    /// Discard the current token during recovery.
    fn skip(&mut self) {
        if self.kind() != TokenKind::Eof {
            self.pos += 1;
        }
    }

    fn report(&mut self, message: String) {
        if !self.recovering {
            let error = SyntaxError::at_token(message, self.current());
            self.errors.push(error);
        }
        self.recovering = true;
    }

    /// Run `deep` one nesting level down, or `shallow` once the limit is hit.
    fn nested<T>(
        &mut self,
        shallow: impl FnOnce(&mut Self) -> T,
        deep: impl FnOnce(&mut Self) -> T,
    ) -> T {
        if self.depth >= MAX_NESTING_DEPTH {
            self.report_too_deep();
            return shallow(self);
        }
        self.depth += 1;
        let result = deep(self);
        self.depth -= 1;
        result
    }

    fn report_too_deep(&mut self) {
        if !self.too_deep {
            let message = format!(
                "input nested too deeply at {}: limit is {} levels",
                self.current().quoted(),
                MAX_NESTING_DEPTH
            );
            let error = SyntaxError::at_token(message, self.current());
            self.errors.push(error);
            self.too_deep = true;
        }
        // Silences the missing closers of every enclosing construct.
        self.recovering = true;
    }

    /// Discard tokens up to, not including, the `closer` matching this level.
    fn skip_to_closer(&mut self, opener: TokenKind, closer: TokenKind) {
        let mut open = 0usize;
        while !self.at(TokenKind::Eof) {
            let kind = self.kind();
            if kind == closer {
                if open == 0 {
                    return;
                }
                open -= 1;
            } else if kind == opener {
                open += 1;
            }
            self.skip();
        }
    }

    /// Discard the construct starting at the current token, closer included.
    fn skip_construct(&mut self) {
        let (opener, closer) = match self.kind() {
            TokenKind::LBracket => (TokenKind::LBracket, TokenKind::RBracket),
            TokenKind::LParen => (TokenKind::LParen, TokenKind::RParen),
            _ => {
                self.skip();
                return;
            }
        };
        self.skip();
        self.skip_to_closer(opener, closer);
        if self.at(closer) {
            self.skip();
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            return Some(self.bump());
        }
        let found = self.current().quoted();
        if self.kind() != TokenKind::Eof && self.kind_at(1) == kind {
            self.report(format!(
                "extraneous input {} expecting {}",
                found,
                kind.display_name()
            ));
            self.skip();
            return Some(self.bump());
        }
        self.report(format!("missing {} at {}", kind.display_name(), found));
        None
    }

    fn statements(&mut self, scope: Scope) -> Vec<Statement> {
        self.nested(
            |parser| {
                let (opener, closer) = scope.delimiters();
                parser.skip_to_closer(opener, closer);
                Vec::new()
            },
            |parser| parser.statement_list(scope),
        )
    }

    fn statement_list(&mut self, scope: Scope) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            let kind = self.kind();
            if is_statement_start(kind) {
                statements.push(self.statement());
                continue;
            }
            if scope.is_terminator(kind) {
                break;
            }
            let expected = expecting(|k| is_statement_start(k) || scope.is_terminator(k));
            let found = self.current().quoted();
            self.report(format!("extraneous input {} expecting {}", found, expected));
            if kind == TokenKind::Eof {
                break;
            }
            self.skip();
            while !is_statement_start(self.kind())
                && !scope.is_terminator(self.kind())
                && !self.at(TokenKind::Eof)
            {
                self.skip();
            }
        }
        statements
    }

    fn statement(&mut self) -> Statement {
        let keyword = match self.kind() {
            TokenKind::Keyword(keyword) => keyword,
            _ => return Statement::Call(self.call()),
        };
        match keyword {
            Keyword::To => Statement::Definition(self.to_definition()),
            Keyword::Define => Statement::Definition(self.define_definition()),
            Keyword::Make => Statement::Binding(self.make_binding(BindingForm::Make)),
            Keyword::Localmake => Statement::Binding(self.make_binding(BindingForm::Localmake)),
            Keyword::Name => Statement::Binding(self.name_binding()),
            Keyword::Set => Statement::SetPosition(self.set_position()),
            Keyword::For => Statement::Loop(self.for_loop()),
            Keyword::Dotimes => Statement::Loop(self.dotimes_loop()),
            other => Statement::Command(self.command(command_shape(other))),
        }
    }

    fn command(&mut self, shape: Option<Shape>) -> Command {
        let keyword = self.bump();
        let mut args = Vec::new();
        match shape.unwrap_or(Shape::Exprs(0)) {
            Shape::Exprs(count) => {
                for _ in 0..count {
                    args.push(Argument::Expr(self.expression()));
                }
            }
            Shape::ExprBlock => {
                args.push(Argument::Expr(self.expression()));
                args.push(Argument::Block(self.block()));
            }
            Shape::ExprBlockBlock => {
                args.push(Argument::Expr(self.expression()));
                args.push(Argument::Block(self.block()));
                args.push(Argument::Block(self.block()));
            }
            Shape::Block => {
                args.push(Argument::Block(self.block()));
            }
            Shape::BlockExpr => {
                args.push(Argument::Block(self.block()));
                args.push(Argument::Expr(self.expression()));
            }
        }
        Command { keyword, args }
    }

    fn block(&mut self) -> Block {
        self.expect(TokenKind::LBracket);
        let statements = self.statements(Scope::Block);
        self.expect(TokenKind::RBracket);
        Block { statements }
    }

    fn to_definition(&mut self) -> Definition {
        let keyword = self.bump();
        let name = self.expect(TokenKind::Name);
        let mut params = Vec::new();
        while self.at(TokenKind::ColonName) {
            params.push(self.bump());
        }
        let body = self.statements(Scope::ProcedureBody);
        let end = self.expect(TokenKind::Keyword(Keyword::End));
        Definition {
            form: DefinitionForm::To,
            keyword,
            name,
            params,
            body,
            end,
        }
    }

    fn define_definition(&mut self) -> Definition {
        let keyword = self.bump();
        let name = self.expect(TokenKind::Word);
        self.expect(TokenKind::LBracket);
        self.expect(TokenKind::LBracket);
        let mut params = Vec::new();
        while self.at(TokenKind::Name) {
            params.push(self.bump());
        }
        self.expect(TokenKind::RBracket);
        let body = self.block().statements;
        self.expect(TokenKind::RBracket);
        let end = if self.at(TokenKind::Keyword(Keyword::End)) {
            Some(self.bump())
        } else {
            None
        };
        Definition {
            form: DefinitionForm::Define,
            keyword,
            name,
            params,
            body,
            end,
        }
    }

    fn make_binding(&mut self, form: BindingForm) -> Binding {
        let keyword = self.bump();
        let name = self.expect(TokenKind::Word);
        let value = self.expression();
        Binding {
            form,
            keyword,
            name,
            value,
        }
    }

    fn name_binding(&mut self) -> Binding {
        let keyword = self.bump();
        let value = self.expression();
        let name = self.expect(TokenKind::Word);
        Binding {
            form: BindingForm::Name,
            keyword,
            name,
            value,
        }
    }

    fn set_position(&mut self) -> SetPosition {
        let keyword = self.bump();
        let subcommand = self.expect(TokenKind::Keyword(Keyword::Pos));
        let value = self.expression();
        SetPosition {
            keyword,
            subcommand,
            value,
        }
    }

    fn for_loop(&mut self) -> Loop {
        let keyword = self.bump();
        self.expect(TokenKind::LBracket);
        let variable = self.expect(TokenKind::Name);
        let mut bounds = vec![self.expression(), self.expression()];
        if is_expression_start(self.kind()) {
            bounds.push(self.expression());
        }
        self.expect(TokenKind::RBracket);
        let body = self.block();
        Loop {
            form: LoopForm::For,
            keyword,
            variable,
            bounds,
            body,
        }
    }

    fn dotimes_loop(&mut self) -> Loop {
        let keyword = self.bump();
        self.expect(TokenKind::LBracket);
        let variable = self.expect(TokenKind::Name);
        let bounds = vec![self.expression()];
        self.expect(TokenKind::RBracket);
        let body = self.block();
        Loop {
            form: LoopForm::Dotimes,
            keyword,
            variable,
            bounds,
            body,
        }
    }

    fn call(&mut self) -> Call {
        let name = self.bump();
        let mut args = Vec::new();
        while is_expression_start(self.kind()) {
            args.push(self.expression());
        }
        Call { name, args }
    }

    fn expression(&mut self) -> Expr {
        let mut lhs = self.additive();
        let mut links = 0;
        while is_comparison(self.kind()) {
            let op = self.bump();
            let rhs = self.additive();
            lhs = self.binary(lhs, op, rhs, &mut links);
        }
        lhs
    }

    fn additive(&mut self) -> Expr {
        let mut lhs = self.multiplicative();
        let mut links = 0;
        while matches!(self.kind(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.bump();
            let rhs = self.multiplicative();
            lhs = self.binary(lhs, op, rhs, &mut links);
        }
        lhs
    }

    fn multiplicative(&mut self) -> Expr {
        let mut lhs = self.primary();
        let mut links = 0;
        while matches!(self.kind(), TokenKind::Star | TokenKind::Slash) {
            let op = self.bump();
            let rhs = self.primary();
            lhs = self.binary(lhs, op, rhs, &mut links);
        }
        lhs
    }

    /// Extend a left-associative chain; every link nests the tree one level.
    fn binary(&mut self, lhs: Expr, op: Token, rhs: Expr, links: &mut usize) -> Expr {
        if self.depth + *links >= MAX_NESTING_DEPTH {
            self.report_too_deep();
            return lhs;
        }
        *links += 1;
        Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    fn primary(&mut self) -> Expr {
        self.nested(Parser::skip_expression, Parser::term)
    }

    fn skip_expression(&mut self) -> Expr {
        if is_expression_start(self.kind()) {
            self.skip_construct();
        }
        Expr::Missing
    }

    fn term(&mut self) -> Expr {
        match self.kind() {
            TokenKind::Number => Expr::Number(self.bump()),
            TokenKind::Word => Expr::Word(self.bump()),
            TokenKind::ColonName => Expr::Variable(self.bump()),
            TokenKind::LBracket => Expr::List(self.data_list()),
            TokenKind::LParen => self.parenthesized(),
            TokenKind::Keyword(keyword) => match query_arity(keyword) {
                Some(arity) => self.query(arity),
                None => self.missing_expression(),
            },
            _ => self.missing_expression(),
        }
    }

    fn missing_expression(&mut self) -> Expr {
        let expected = expecting(is_expression_start);
        let found = self.current().quoted();
        let kind = self.kind();
        let closes_something = matches!(
            kind,
            TokenKind::Eof
                | TokenKind::RBracket
                | TokenKind::RParen
                | TokenKind::Keyword(Keyword::End)
        );
        if !closes_something && !is_statement_start(kind) && is_expression_start(self.kind_at(1))
        {
            self.report(format!("extraneous input {} expecting {}", found, expected));
            self.skip();
            return self.primary();
        }
        self.report(format!("mismatched input {} expecting {}", found, expected));
        Expr::Missing
    }

    fn query(&mut self, (min, max): (usize, usize)) -> Expr {
        let keyword = self.bump();
        let mut args = Vec::new();
        for index in 0..max {
            if index >= min && !is_expression_start(self.kind()) {
                break;
            }
            args.push(self.additive());
        }
        Expr::Query { keyword, args }
    }

    fn parenthesized(&mut self) -> Expr {
        self.bump();
        let expr = match self.kind() {
            TokenKind::Keyword(keyword) if is_parenthesized_query(keyword) => {
                let keyword = self.bump();
                let mut args = Vec::new();
                while is_expression_start(self.kind()) {
                    args.push(self.expression());
                }
                Expr::Query { keyword, args }
            }
            _ => Expr::Group(Box::new(self.expression())),
        };
        self.expect(TokenKind::RParen);
        expr
    }

    fn data_list(&mut self) -> Vec<Datum> {
        self.bump();
        let mut items = Vec::new();
        loop {
            match self.kind() {
                TokenKind::RBracket | TokenKind::Eof => break,
                TokenKind::LBracket => {
                    let datum = self.nested(
                        |parser| {
                            let token = parser.current().clone();
                            parser.skip_construct();
                            Datum::Atom(token)
                        },
                        |parser| Datum::List(parser.data_list()),
                    );
                    items.push(datum);
                }
                TokenKind::Number => items.push(Datum::Number(self.bump())),
                TokenKind::Word => items.push(Datum::Word(self.bump())),
                _ => items.push(Datum::Atom(self.bump())),
            }
        }
        self.expect(TokenKind::RBracket);
        items
    }
}
