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

//! Cursor position to declaration lookup.
//!
//! # Performance
//!
//! - **Reference lookup**: O(log n) binary search over the sorted reference list
//! - **Declaration lookup**: O(1) hash map access
//!
//! A cursor counts as "on" a reference when it sits anywhere from the first
//! character of the token up to and including the position just past its
//! last character, so a cursor placed right after `:x` still resolves `:x`.

use crate::constants::LINE_NUMBER_OFFSET;
use crate::declarations::Declarations;
use logo_core::Token;
use std::cmp::Ordering;
use tower_lsp::lsp_types::Range;

/// Resolves the symbol under a cursor to its declarations.
#[derive(Debug, Clone)]
pub struct DeclarationFinder {
    references: Vec<Token>,
    declarations: Declarations,
}

impl DeclarationFinder {
    /// `references` must be sorted by `(line, column)`.
    pub fn new(references: Vec<Token>, declarations: Declarations) -> Self {
        Self {
            references,
            declarations,
        }
    }

    /// Declarations of the symbol referenced at the 0-based `line` and `character`.
    ///
    /// Returns an empty list when no reference is under the cursor or the
    /// referenced name was never declared.
    pub fn find_declarations_of(&self, line: u32, character: u32) -> Vec<Range> {
        let line = line as usize + LINE_NUMBER_OFFSET;
        let Some(reference) = self.reference_at(line, character as usize) else {
            return Vec::new();
        };
        match reference.text.strip_prefix(':') {
            Some(variable) => self.declarations.variable(variable).to_vec(),
            None => self.declarations.procedure(&reference.text).to_vec(),
        }
    }

    /// The reference under a 1-based `line` and 0-based `column`.
    fn reference_at(&self, line: usize, column: usize) -> Option<&Token> {
        let search = self.references.binary_search_by(|token| {
            match token.line.cmp(&line) {
                Ordering::Equal => token.column.cmp(&column),
                other => other,
            }
        });
        match search {
            Ok(index) => self.references.get(index),
            Err(0) => None,
            Err(insertion) => self
                .references
                .get(insertion - 1)
                .filter(|token| token.line == line && column <= token.column + token.len()),
        }
    }
}
