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

//! Symbol references in a parse tree.
//!
//! A reference is either a `:name` variable reference in expression position
//! or the name token of a procedure call. Tokens are collected in walk order,
//! which is source order, so the result is sorted by `(line, column)` and can
//! be binary searched.

use logo_core::traverse::{walk, TreeVisitor};
use logo_core::{ParseTree, Token};

/// Collect every symbol-use token of `tree`, sorted by position.
pub fn references_from(tree: &ParseTree) -> Vec<Token> {
    let mut collector = Collector::default();
    walk(tree, &mut collector);
    collector.references
}

#[derive(Default)]
struct Collector {
    references: Vec<Token>,
}

impl TreeVisitor for Collector {
    fn visit_variable_reference(&mut self, token: &Token) {
        self.references.push(token.clone());
    }

    fn visit_call(&mut self, token: &Token) {
        self.references.push(token.clone());
    }
}
