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

//! Semantic highlighting.
//!
//! # Classification
//!
//! | Construct                                   | Type       | Modifiers     |
//! |---------------------------------------------|------------|---------------|
//! | built-in commands and reporters, `end`      | `keyword`  |               |
//! | quoted word used as a value                 | `string`   |               |
//! | number                                      | `number`   |               |
//! | procedure call                              | `function` |               |
//! | `to` / `define` procedure name              | `function` | `definition`  |
//! | `define` input name, `for` variable         | `variable` | `declaration` |
//! | `make` / `name` / `localmake` word          | `variable` | `definition`  |
//! | `dotimes` variable                          | `variable` | `definition`  |
//! | `:name` reference                           | `variable` |               |
//!
//! `to` inputs, operators, brackets and bare words inside data lists are
//! not highlighted.
//!
//! # Encoding
//!
//! Tokens are emitted in source order as groups of five integers
//! `[delta_line, delta_start, length, type, modifier_mask]` where
//! `delta_start` is relative to the previous token only when both are on the
//! same line. The modifier mask sets bit `n` for the modifier with ordinal `n`.

use crate::constants::SEMANTIC_TOKEN_WIDTH;
use crate::utils::{lsp_line, to_lsp};
use logo_core::traverse::{walk, TreeVisitor};
use logo_core::{BindingForm, DefinitionForm, LoopForm, ParseTree, Token};
use tower_lsp::lsp_types::{
    SemanticToken, SemanticTokenModifier, SemanticTokenType, SemanticTokens,
    SemanticTokensLegend,
};

/// Token types in ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Keyword,
    String,
    Number,
    Function,
    Variable,
}

impl TokenType {
    pub const ALL: [TokenType; 5] = [
        TokenType::Keyword,
        TokenType::String,
        TokenType::Number,
        TokenType::Function,
        TokenType::Variable,
    ];

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Name advertised in the legend.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Keyword => "keyword",
            TokenType::String => "string",
            TokenType::Number => "number",
            TokenType::Function => "function",
            TokenType::Variable => "variable",
        }
    }
}

/// Token modifiers in ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenModifier {
    Declaration,
    Definition,
}

impl TokenModifier {
    pub const ALL: [TokenModifier; 2] = [TokenModifier::Declaration, TokenModifier::Definition];

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenModifier::Declaration => "declaration",
            TokenModifier::Definition => "definition",
        }
    }
}

/// OR of `1 << ordinal` over `modifiers`.
pub fn modifier_mask(modifiers: &[TokenModifier]) -> u32 {
    modifiers
        .iter()
        .fold(0, |mask, modifier| mask | (1 << modifier.ordinal()))
}

/// The legend advertised to clients; indices match the ordinals above.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: TokenType::ALL
            .iter()
            .map(|t| SemanticTokenType::new(t.as_str()))
            .collect(),
        token_modifiers: TokenModifier::ALL
            .iter()
            .map(|m| SemanticTokenModifier::new(m.as_str()))
            .collect(),
    }
}

/// Accumulates tokens and serializes them with relative delta encoding.
///
/// Tokens must be added in ascending `(line, start)` order.
#[derive(Debug, Clone, Default)]
pub struct SemanticTokensEncoder {
    data: Vec<u32>,
    previous_line: u32,
    previous_start: u32,
}

impl SemanticTokensEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token at a 0-based `line` and `start` column.
    pub fn add(
        &mut self,
        line: u32,
        start: u32,
        length: u32,
        token_type: TokenType,
        modifiers: &[TokenModifier],
    ) -> &mut Self {
        let delta_line = line.saturating_sub(self.previous_line);
        let delta_start = if delta_line == 0 {
            start.saturating_sub(self.previous_start)
        } else {
            start
        };
        self.data.extend_from_slice(&[
            delta_line,
            delta_start,
            length,
            token_type.ordinal(),
            modifier_mask(modifiers),
        ]);
        self.previous_line = line;
        self.previous_start = start;
        self
    }

    /// Number of tokens added so far.
    pub fn len(&self) -> usize {
        self.data.len() / SEMANTIC_TOKEN_WIDTH
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn build(self) -> Vec<u32> {
        self.data
    }
}

/// Encoded semantic tokens of a whole parse tree.
pub fn semantic_tokens_of(tree: &ParseTree) -> Vec<u32> {
    let mut highlighter = Highlighter::default();
    walk(tree, &mut highlighter);
    highlighter.encoder.build()
}

/// Regroup a flat encoded stream into protocol tokens.
pub fn to_lsp_tokens(data: &[u32]) -> SemanticTokens {
    let data = data
        .chunks_exact(SEMANTIC_TOKEN_WIDTH)
        .map(|chunk| SemanticToken {
            delta_line: chunk[0],
            delta_start: chunk[1],
            length: chunk[2],
            token_type: chunk[3],
            token_modifiers_bitset: chunk[4],
        })
        .collect();
    SemanticTokens {
        result_id: None,
        data,
    }
}

#[derive(Default)]
struct Highlighter {
    encoder: SemanticTokensEncoder,
}

impl Highlighter {
    fn add(&mut self, token: &Token, token_type: TokenType, modifiers: &[TokenModifier]) {
        self.encoder.add(
            lsp_line(token.line),
            to_lsp(token.column),
            to_lsp(token.len()),
            token_type,
            modifiers,
        );
    }
}

impl TreeVisitor for Highlighter {
    fn visit_keyword(&mut self, token: &Token) {
        self.add(token, TokenType::Keyword, &[]);
    }

    fn visit_number(&mut self, token: &Token) {
        self.add(token, TokenType::Number, &[]);
    }

    fn visit_word(&mut self, token: &Token) {
        self.add(token, TokenType::String, &[]);
    }

    fn visit_variable_reference(&mut self, token: &Token) {
        self.add(token, TokenType::Variable, &[]);
    }

    fn visit_call(&mut self, token: &Token) {
        self.add(token, TokenType::Function, &[]);
    }

    fn visit_variable_binding(&mut self, _form: BindingForm, name: &Token) {
        self.add(name, TokenType::Variable, &[TokenModifier::Definition]);
    }

    fn visit_procedure_definition(&mut self, _form: DefinitionForm, name: &Token) {
        self.add(name, TokenType::Function, &[TokenModifier::Definition]);
    }

    fn visit_parameter(&mut self, form: DefinitionForm, name: &Token) {
        if form == DefinitionForm::Define {
            self.add(name, TokenType::Variable, &[TokenModifier::Declaration]);
        }
    }

    fn visit_loop_variable(&mut self, form: LoopForm, name: &Token) {
        let modifier = match form {
            LoopForm::For => TokenModifier::Declaration,
            LoopForm::Dotimes => TokenModifier::Definition,
        };
        self.add(name, TokenType::Variable, &[modifier]);
    }
}
