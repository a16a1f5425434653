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

//! Resource limits for parsing untrusted documents.
//!
//! The parser and the tree walk both recurse once per nesting level, and a
//! stack overflow aborts the whole process. Documents come straight from the
//! editor, so nesting is bounded before it can get that far.

/// Maximum nesting depth of blocks, procedure bodies, parentheses, data lists
/// and operator chains.
///
/// A construct that would nest deeper is reported once as a syntax error and
/// skipped up to its closing token, or to the end of input when there is none.
///
/// # Trade-offs
///
/// Hand-written Logo rarely nests beyond a dozen levels. One hundred levels
/// keep the deepest parse a small fraction of a worker thread's stack, even in
/// debug builds.
pub const MAX_NESTING_DEPTH: usize = 100;
