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

//! Error types for Logo lexing and parsing.

use crate::token::{Token, TokenKind};
use thiserror::Error;

/// A lexical or syntactic error found while parsing a document.
///
/// Syntax errors never abort a parse; the parser records them and keeps
/// building a best-effort tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at line {line}, column {column}: {message}")]
pub struct SyntaxError {
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based).
    pub line: usize,
    /// Column number in characters (0-based).
    pub column: usize,
    /// Length of the offending token in characters (0 at end of input).
    pub length: usize,
}

impl SyntaxError {
    /// Create a new error.
    pub fn new(message: impl Into<String>, line: usize, column: usize, length: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            length,
        }
    }

    /// Create an error whose span is the offending token.
    pub fn at_token(message: impl Into<String>, token: &Token) -> Self {
        let length = match token.kind {
            TokenKind::Eof => 0,
            _ => token.len(),
        };
        Self::new(message, token.line, token.column, length)
    }
}
