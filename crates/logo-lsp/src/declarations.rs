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

//! Declaration index for go-to-declaration.
//!
//! # Architecture
//!
//! The index maintains two independent namespaces:
//!
//! 1. **Variables**: introduced by `make "x`, `name value "x` and `localmake "x`
//!    - Format: `name -> Vec<Range>` (range of the quoted word)
//! 2. **Procedures**: introduced by `to name` and `define "name`
//!    - Format: `name -> Vec<Range>` (range of the name token)
//!
//! Keys carry no sigil: `"x` is stored as `x`. Ranges for one name are kept
//! in source order. Since the parser lower-cases its input, lookups are
//! case-insensitive with respect to the original text.

use crate::utils::token_range;
use logo_core::traverse::{walk, TreeVisitor};
use logo_core::{BindingForm, DefinitionForm, ParseTree, Token};
use std::collections::HashMap;
use tower_lsp::lsp_types::Range;

/// Every declaration in one parse, by namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub variables: HashMap<String, Vec<Range>>,
    pub procedures: HashMap<String, Vec<Range>>,
}

impl Declarations {
    /// Build the index from a parse tree.
    pub fn from_tree(tree: &ParseTree) -> Self {
        let mut collector = Collector::default();
        walk(tree, &mut collector);
        collector.declarations
    }

    /// Declarations of the variable `name` (without `:` or `"`).
    pub fn variable(&self, name: &str) -> &[Range] {
        self.variables.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Declarations of the procedure `name`.
    pub fn procedure(&self, name: &str) -> &[Range] {
        self.procedures.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.procedures.is_empty()
    }
}

fn strip_quote(text: &str) -> &str {
    text.strip_prefix('"').unwrap_or(text)
}

#[derive(Default)]
struct Collector {
    declarations: Declarations,
}

impl TreeVisitor for Collector {
    fn visit_variable_binding(&mut self, _form: BindingForm, name: &Token) {
        self.declarations
            .variables
            .entry(strip_quote(&name.text).to_string())
            .or_default()
            .push(token_range(name));
    }

    fn visit_procedure_definition(&mut self, form: DefinitionForm, name: &Token) {
        let key = match form {
            DefinitionForm::To => name.text.as_str(),
            DefinitionForm::Define => strip_quote(&name.text),
        };
        self.declarations
            .procedures
            .entry(key.to_string())
            .or_default()
            .push(token_range(name));
    }
}
