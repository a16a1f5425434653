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

//! Per-document analysis facade.
//!
//! A [`DocumentHandler`] owns the latest parse of one document and answers
//! every query from it. It is not synchronized; [`crate::actor::DocumentActor`]
//! confines each handler to a single worker thread.
//!
//! # Lifecycle
//!
//! A new handler has no parse. Until the first [`DocumentHandler::set_text`]
//! every query fails with [`AnalysisError::NotReady`]. Each `set_text`
//! replaces the previous parse wholesale.

use crate::declaration_finder::DeclarationFinder;
use crate::declarations::Declarations;
use crate::error::{AnalysisError, AnalysisResult};
use crate::references::references_from;
use crate::semantic_tokens::semantic_tokens_of;
use crate::utils::to_diagnostic;
use logo_core::{parse, ParsedDocument};
use tower_lsp::lsp_types::{Diagnostic, Location, Url};
use tracing::debug;

/// Analysis state of one document.
#[derive(Debug)]
pub struct DocumentHandler {
    uri: Url,
    parsed: Option<ParsedDocument>,
}

impl DocumentHandler {
    pub fn new(uri: Url) -> Self {
        Self { uri, parsed: None }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Whether `set_text` has been called at least once.
    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    /// Re-parse the document from its full text.
    pub fn set_text(&mut self, text: &str) {
        let parsed = parse(text);
        debug!(
            "Parsed {}: {} statements, {} syntax errors",
            self.uri,
            parsed.tree.statements.len(),
            parsed.errors.len()
        );
        self.parsed = Some(parsed);
    }

    /// One error diagnostic per syntax error of the latest parse.
    pub fn diagnostics(&self) -> AnalysisResult<Vec<Diagnostic>> {
        Ok(self.parsed()?.errors.iter().map(to_diagnostic).collect())
    }

    /// Delta-encoded semantic tokens of the latest parse.
    pub fn semantic_tokens_full(&self) -> AnalysisResult<Vec<u32>> {
        Ok(semantic_tokens_of(&self.parsed()?.tree))
    }

    /// Declarations of the symbol at the 0-based `line` and `character`.
    ///
    /// References and declarations are rebuilt from the current parse on
    /// every call.
    pub fn declaration(&self, line: u32, character: u32) -> AnalysisResult<Vec<Location>> {
        let tree = &self.parsed()?.tree;
        let finder = DeclarationFinder::new(references_from(tree), Declarations::from_tree(tree));
        Ok(finder
            .find_declarations_of(line, character)
            .into_iter()
            .map(|range| Location::new(self.uri.clone(), range))
            .collect())
    }

    fn parsed(&self) -> AnalysisResult<&ParsedDocument> {
        self.parsed.as_ref().ok_or_else(|| AnalysisError::NotReady {
            uri: self.uri.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri() -> Url {
        Url::parse("file:///test.logo").unwrap()
    }

    #[test]
    fn test_queries_before_text_are_not_ready() {
        let handler = DocumentHandler::new(uri());
        assert!(!handler.is_parsed());
        assert!(matches!(handler.diagnostics(), Err(AnalysisError::NotReady { .. })));
        assert!(matches!(
            handler.semantic_tokens_full(),
            Err(AnalysisError::NotReady { .. })
        ));
        assert!(matches!(
            handler.declaration(0, 0),
            Err(AnalysisError::NotReady { .. })
        ));
    }

    #[test]
    fn test_set_text_replaces_previous_parse() {
        let mut handler = DocumentHandler::new(uri());
        handler.set_text("repeat 4 [forward 10");
        assert_eq!(handler.diagnostics().unwrap().len(), 1);
        handler.set_text("repeat 4 [forward 10]");
        assert!(handler.diagnostics().unwrap().is_empty());
    }

    #[test]
    fn test_declaration_locations_carry_uri() {
        let mut handler = DocumentHandler::new(uri());
        handler.set_text("make \"x 1\nshow :x");
        let locations = handler.declaration(1, 6).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].uri, uri());
        assert_eq!(locations[0].range.start.character, 5);
    }

    #[test]
    fn test_semantic_tokens_of_simple_command() {
        let mut handler = DocumentHandler::new(uri());
        handler.set_text("forward 10");
        assert_eq!(
            handler.semantic_tokens_full().unwrap(),
            vec![0, 0, 7, 0, 0, 0, 8, 2, 2, 0]
        );
    }
}
