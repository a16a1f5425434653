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

//! Logo Language Server Protocol (LSP) implementation.
//!
//! This crate provides editor support for Logo through the Language Server
//! Protocol.
//!
//! # Features
//!
//! - **Diagnostics**: Syntax errors reported as they are typed
//! - **Semantic Highlighting**: Keywords, numbers, words, procedures and variables,
//!   with declaration and definition modifiers
//! - **Go to Declaration**: Jump from a `:name` reference or a procedure call to
//!   every `make`/`name`/`localmake` or `to`/`define` that declares it
//!
//! # Usage
//!
//! ```bash
//! # Run the language server (stdio transport)
//! logo-lsp
//!
//! # With debug logging
//! RUST_LOG=debug logo-lsp
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use logo_lsp::LogoLanguageServer;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stdin = tokio::io::stdin();
//!     let stdout = tokio::io::stdout();
//!
//!     let (service, socket) = LspService::new(LogoLanguageServer::new);
//!
//!     Server::new(stdin, stdout, socket).serve(service).await;
//! }
//! ```
//!
//! # Architecture
//!
//! - `backend`: LSP server implementation
//! - [`registry`]: URI to worker map with delayed recycling of closed documents
//! - [`actor`]: one worker thread and FIFO task queue per document
//! - [`document`]: per-document facade over the latest parse
//! - [`declarations`], [`references`], [`declaration_finder`]: go-to-declaration
//! - [`semantic_tokens`]: token classification and delta encoding
//! - [`utils`]: position and diagnostic conversions

pub mod actor;
mod backend;
pub mod constants;
pub mod declaration_finder;
pub mod declarations;
pub mod document;
pub mod error;
pub mod references;
pub mod registry;
pub mod semantic_tokens;
pub mod utils;

pub use actor::{DocumentActor, Pending};
pub use backend::LogoLanguageServer;
pub use document::DocumentHandler;
pub use error::{AnalysisError, AnalysisResult};
pub use registry::{DocumentRegistry, RegistryStatistics};

/// LSP server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
