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

//! Core lexer and parser for the Logo language.
//!
//! This crate turns Logo source text into a [`ParseTree`] plus a list of
//! [`SyntaxError`]s. Parsing never fails outright: malformed input still
//! yields a best-effort tree, which lets editors keep highlighting and
//! navigating a document while it is being typed.
//!
//! # Modules
//!
//! - [`token`]: keyword vocabulary and token types
//! - [`lexer`]: character stream to tokens
//! - [`limits`]: nesting bound for untrusted input
//! - [`parser`]: tokens to parse tree, with error recovery
//! - [`ast`]: parse tree types
//! - [`traverse`]: visitor-based walk over the parse tree
//!
//! # Example
//!
//! ```
//! let parsed = logo_core::parse("to square :size\n  repeat 4 [fd :size rt 90]\nend");
//! assert!(parsed.errors.is_empty());
//! ```

pub mod ast;
mod error;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod token;
pub mod traverse;

pub use ast::{BindingForm, DefinitionForm, LoopForm, ParseTree};
pub use error::SyntaxError;
pub use limits::MAX_NESTING_DEPTH;
pub use parser::{parse, ParsedDocument};
pub use token::{Keyword, Token, TokenKind};
pub use traverse::{walk, TreeVisitor};
