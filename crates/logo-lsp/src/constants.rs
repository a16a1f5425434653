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

//! LSP constants and magic number definitions.
//!
//! This module centralizes the tunable values of the server with a short
//! note on how each one was chosen.
//!
//! # Organization
//!
//! Constants are organized by category:
//! - **Document Lifecycle**: Recycling of per-document workers
//! - **Memory Limits**: Document size constraints
//! - **LSP Protocol**: Position conversions and token encoding

use std::time::Duration;

// ============================================================================
// Document Lifecycle
// ============================================================================

/// Grace period between closing a document and destroying its worker (5 minutes).
///
/// **Rationale**: Editors frequently close and reopen the same file, for example
/// when switching tabs or previewing search results. Keeping the worker alive
/// for a while lets a reopen reuse it instead of spawning a new thread.
///
/// **Trade-offs**:
/// - Longer delays keep idle threads around for documents that never return
/// - Shorter delays churn threads during normal tab switching
///
/// Expiry is checked whenever the registry is accessed, so an idle server can
/// hold a closed document's worker past this delay until the next request.
pub const DEFAULT_RECYCLE_DELAY: Duration = Duration::from_secs(5 * 60);

/// Prefix of the name given to each document worker thread.
///
/// **Usage**: Worker threads are named `logo-document-<n>`, which makes them
/// easy to spot in debuggers and thread dumps.
pub const WORKER_THREAD_PREFIX: &str = "logo-document";

// ============================================================================
// Memory Limits
// ============================================================================

/// Default maximum document size in bytes (16 MB).
///
/// **Rationale**: Logo programs are small; even generated ones rarely exceed a
/// few hundred kilobytes. 16 MB leaves ample headroom while refusing files
/// that would make a full re-parse on every keystroke noticeably slow.
///
/// **Trade-offs**:
/// - Larger limits accept bigger files at the cost of parse latency
/// - Smaller limits protect responsiveness but reject unusual inputs
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 16 * BYTES_PER_MEGABYTE;

/// Bytes per megabyte (1024 * 1024).
pub const BYTES_PER_MEGABYTE: usize = 1024 * 1024;

// ============================================================================
// LSP Protocol Constants
// ============================================================================

/// Line numbering offset for LSP positions.
///
/// **Rationale**: LSP uses 0-based line numbering (first line is line 0),
/// but the Logo lexer reports 1-based line numbers (first line is line 1).
/// This constant makes the conversion explicit.
///
/// **Usage**: `lsp_line = logo_line - LINE_NUMBER_OFFSET`
pub const LINE_NUMBER_OFFSET: usize = 1;

/// Number of integers per token in an encoded semantic token stream.
///
/// **Usage**: `[delta_line, delta_start, length, token_type, modifier_mask]`
pub const SEMANTIC_TOKEN_WIDTH: usize = 5;
