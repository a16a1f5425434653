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

//! Parse tree for Logo documents.
//!
//! The tree keeps the original [`Token`]s of every construct that carries
//! meaning for an editor (keywords, names, literals), so positions survive
//! all the way to diagnostics and highlighting. Tokens the parser had to
//! invent during error recovery are represented as `None`.

use crate::token::Token;

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseTree {
    pub statements: Vec<Statement>,
}

/// A bracketed list of statements, e.g. the body of `repeat`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A built-in command such as `forward 10` or `repeat 4 [...]`.
    Command(Command),
    /// `set pos [x y]`.
    SetPosition(SetPosition),
    /// `to name :a :b ... end` or `define "name [[a b] [...]]`.
    Definition(Definition),
    /// `make "x 1`, `name 1 "x` or `localmake "x 1`.
    Binding(Binding),
    /// `for [i 1 10] [...]` or `dotimes [i 10] [...]`.
    Loop(Loop),
    /// A call of a user-defined procedure.
    Call(Call),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub keyword: Token,
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Expr(Expr),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetPosition {
    pub keyword: Token,
    pub subcommand: Option<Token>,
    pub value: Expr,
}

/// How a procedure is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionForm {
    To,
    Define,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub form: DefinitionForm,
    pub keyword: Token,
    /// Bare `NAME` for `to`, quoted `"name` for `define`.
    pub name: Option<Token>,
    /// `:param` tokens for `to`, bare names for `define`.
    pub params: Vec<Token>,
    pub body: Vec<Statement>,
    pub end: Option<Token>,
}

/// How a variable is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingForm {
    /// `make "x value`
    Make,
    /// `name value "x`
    Name,
    /// `localmake "x value`
    Localmake,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub form: BindingForm,
    pub keyword: Token,
    /// The quoted word naming the variable.
    pub name: Option<Token>,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopForm {
    For,
    Dotimes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub form: LoopForm,
    pub keyword: Token,
    pub variable: Option<Token>,
    /// Start, end and optional step for `for`; the count for `dotimes`.
    pub bounds: Vec<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Token,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Token),
    Word(Token),
    /// `:name`
    Variable(Token),
    /// Literal data list such as `[1 2 3]`.
    List(Vec<Datum>),
    /// A built-in reporter such as `sum 1 2` or `(list 1 2 3)`.
    Query { keyword: Token, args: Vec<Expr> },
    Binary {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    Group(Box<Expr>),
    /// Placeholder for an expression that could not be parsed.
    Missing,
}

/// An element of a literal data list.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Number(Token),
    Word(Token),
    /// Anything else appearing inside a data list, kept as plain data.
    Atom(Token),
    List(Vec<Datum>),
}
