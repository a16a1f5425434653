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

//! Parse tree traversal for analyses.
//!
//! # Architecture
//!
//! The visitor pattern separates the walk from what is collected. Analyses
//! implement [`TreeVisitor`], overriding only the callbacks they care about,
//! while [`walk`] handles the recursive structure.
//!
//! Callbacks fire in source order: a token with a smaller `(line, column)`
//! is always reported before one with a larger position, so `name value "x`
//! reports `value` before `"x`.
//!
//! # Example
//!
//! ```
//! use logo_core::traverse::{walk, TreeVisitor};
//! use logo_core::Token;
//!
//! #[derive(Default)]
//! struct NumberCounter {
//!     count: usize,
//! }
//!
//! impl TreeVisitor for NumberCounter {
//!     fn visit_number(&mut self, _token: &Token) {
//!         self.count += 1;
//!     }
//! }
//!
//! let parsed = logo_core::parse("setxy 10 20\nforward :x");
//! let mut counter = NumberCounter::default();
//! walk(&parsed.tree, &mut counter);
//! assert_eq!(counter.count, 2);
//! ```

use crate::ast::{
    Argument, Binding, BindingForm, Datum, Definition, DefinitionForm, Expr, Loop, LoopForm,
    ParseTree, Statement,
};
use crate::token::Token;

/// Callbacks for the constructs of a Logo parse tree.
///
/// All methods default to doing nothing.
pub trait TreeVisitor {
    /// A built-in keyword: commands, reporters, `to`, `end`, `set`, `pos`...
    fn visit_keyword(&mut self, _token: &Token) {}

    /// A number literal in an expression or data list.
    fn visit_number(&mut self, _token: &Token) {}

    /// A quoted word used as a value.
    fn visit_word(&mut self, _token: &Token) {}

    /// A `:name` variable reference.
    fn visit_variable_reference(&mut self, _token: &Token) {}

    /// The name of a user-defined procedure being called.
    fn visit_call(&mut self, _token: &Token) {}

    /// The quoted word naming a variable in `make`, `name` or `localmake`.
    fn visit_variable_binding(&mut self, _form: BindingForm, _name: &Token) {}

    /// The name of a procedure introduced by `to` or `define`.
    fn visit_procedure_definition(&mut self, _form: DefinitionForm, _name: &Token) {}

    /// A formal parameter of a procedure definition.
    fn visit_parameter(&mut self, _form: DefinitionForm, _name: &Token) {}

    /// The control variable of `for` or `dotimes`.
    fn visit_loop_variable(&mut self, _form: LoopForm, _name: &Token) {}
}

/// Walk every statement of `tree` in source order.
pub fn walk<V: TreeVisitor + ?Sized>(tree: &ParseTree, visitor: &mut V) {
    walk_statements(&tree.statements, visitor);
}

fn walk_statements<V: TreeVisitor + ?Sized>(statements: &[Statement], visitor: &mut V) {
    for statement in statements {
        walk_statement(statement, visitor);
    }
}

fn walk_statement<V: TreeVisitor + ?Sized>(statement: &Statement, visitor: &mut V) {
    match statement {
        Statement::Command(command) => {
            visitor.visit_keyword(&command.keyword);
            for arg in &command.args {
                match arg {
                    Argument::Expr(expr) => walk_expr(expr, visitor),
                    Argument::Block(block) => walk_statements(&block.statements, visitor),
                }
            }
        }
        Statement::SetPosition(set) => {
            visitor.visit_keyword(&set.keyword);
            if let Some(subcommand) = &set.subcommand {
                visitor.visit_keyword(subcommand);
            }
            walk_expr(&set.value, visitor);
        }
        Statement::Definition(definition) => walk_definition(definition, visitor),
        Statement::Binding(binding) => walk_binding(binding, visitor),
        Statement::Loop(lp) => walk_loop(lp, visitor),
        Statement::Call(call) => {
            visitor.visit_call(&call.name);
            for arg in &call.args {
                walk_expr(arg, visitor);
            }
        }
    }
}

fn walk_definition<V: TreeVisitor + ?Sized>(definition: &Definition, visitor: &mut V) {
    visitor.visit_keyword(&definition.keyword);
    if let Some(name) = &definition.name {
        visitor.visit_procedure_definition(definition.form, name);
    }
    for param in &definition.params {
        visitor.visit_parameter(definition.form, param);
    }
    walk_statements(&definition.body, visitor);
    if let Some(end) = &definition.end {
        visitor.visit_keyword(end);
    }
}

fn walk_binding<V: TreeVisitor + ?Sized>(binding: &Binding, visitor: &mut V) {
    visitor.visit_keyword(&binding.keyword);
    match binding.form {
        BindingForm::Name => {
            walk_expr(&binding.value, visitor);
            if let Some(name) = &binding.name {
                visitor.visit_variable_binding(binding.form, name);
            }
        }
        BindingForm::Make | BindingForm::Localmake => {
            if let Some(name) = &binding.name {
                visitor.visit_variable_binding(binding.form, name);
            }
            walk_expr(&binding.value, visitor);
        }
    }
}

fn walk_loop<V: TreeVisitor + ?Sized>(lp: &Loop, visitor: &mut V) {
    visitor.visit_keyword(&lp.keyword);
    if let Some(variable) = &lp.variable {
        visitor.visit_loop_variable(lp.form, variable);
    }
    for bound in &lp.bounds {
        walk_expr(bound, visitor);
    }
    walk_statements(&lp.body.statements, visitor);
}

fn walk_expr<V: TreeVisitor + ?Sized>(expr: &Expr, visitor: &mut V) {
    match expr {
        Expr::Number(token) => visitor.visit_number(token),
        Expr::Word(token) => visitor.visit_word(token),
        Expr::Variable(token) => visitor.visit_variable_reference(token),
        Expr::List(items) => walk_data(items, visitor),
        Expr::Query { keyword, args } => {
            visitor.visit_keyword(keyword);
            for arg in args {
                walk_expr(arg, visitor);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            walk_expr(lhs, visitor);
            walk_expr(rhs, visitor);
        }
        Expr::Group(inner) => walk_expr(inner, visitor),
        Expr::Missing => {}
    }
}

fn walk_data<V: TreeVisitor + ?Sized>(items: &[Datum], visitor: &mut V) {
    for item in items {
        match item {
            Datum::Number(token) => visitor.visit_number(token),
            Datum::Word(token) => visitor.visit_word(token),
            Datum::Atom(_) => {}
            Datum::List(nested) => walk_data(nested, visitor),
        }
    }
}
