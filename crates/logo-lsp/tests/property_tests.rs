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

//! Property-based tests for highlighting and declaration lookup.

use logo_core::parse;
use logo_lsp::constants::SEMANTIC_TOKEN_WIDTH;
use logo_lsp::declaration_finder::DeclarationFinder;
use logo_lsp::declarations::Declarations;
use logo_lsp::references::references_from;
use logo_lsp::semantic_tokens::semantic_tokens_of;
use proptest::prelude::*;

/// Complete statements, so every generated program is valid Logo.
fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("forward 10".to_string()),
        Just("make \"x 1".to_string()),
        Just("name 2 \"y".to_string()),
        Just("show :x + :y".to_string()),
        Just("to square :size\nrepeat 4 [fd :size rt 90]\nend".to_string()),
        Just("define \"tri [[a] [fd :a]]".to_string()),
        Just("square 5".to_string()),
        Just("tri 3".to_string()),
        Just("for [i 1 3] [fd :i]".to_string()),
        Just("dotimes [j 2] [show :j]".to_string()),
        Just("set pos [1 2]".to_string()),
        Just("show (list 1 \"a :x)".to_string()),
        Just("if :x > 1 [label \"big]".to_string()),
    ]
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("\n"), Just("\n\n  ")]
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec((statement(), separator()), 0..12).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(statement, separator)| format!("{statement}{separator}"))
            .collect()
    })
}

/// Absolute `(line, start, length)` of every encoded token.
fn decode(data: &[u32]) -> Vec<(u32, u32, u32)> {
    let mut line = 0;
    let mut start = 0;
    data.chunks_exact(SEMANTIC_TOKEN_WIDTH)
        .map(|chunk| {
            if chunk[0] == 0 {
                start += chunk[1];
            } else {
                line += chunk[0];
                start = chunk[1];
            }
            (line, start, chunk[2])
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: Decoded tokens are strictly ordered and lie within their line.
    #[test]
    fn prop_decoded_tokens_fit_source(text in program()) {
        let parsed = parse(&text);
        prop_assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);

        let lines: Vec<&str> = text.split('\n').collect();
        let decoded = decode(&semantic_tokens_of(&parsed.tree));
        for pair in decoded.windows(2) {
            prop_assert!((pair[0].0, pair[0].1) < (pair[1].0, pair[1].1));
        }
        for (line, start, length) in decoded {
            let width = lines[line as usize].chars().count() as u32;
            prop_assert!(length > 0);
            prop_assert!(start + length <= width);
        }
    }

    /// Property: The modifier mask only uses the two advertised modifier bits.
    #[test]
    fn prop_modifier_masks_are_valid(text in program()) {
        let data = semantic_tokens_of(&parse(&text).tree);
        for chunk in data.chunks_exact(SEMANTIC_TOKEN_WIDTH) {
            prop_assert!(chunk[3] < 5);
            prop_assert!(chunk[4] < 4);
        }
    }

    /// Property: Looking up a reference anywhere from its first character to
    /// just past its last returns the declarations indexed under its name.
    #[test]
    fn prop_lookup_at_reference_matches_index(text in program()) {
        let tree = parse(&text).tree;
        let references = references_from(&tree);
        let declarations = Declarations::from_tree(&tree);
        let finder = DeclarationFinder::new(references.clone(), declarations.clone());

        for reference in &references {
            let line = (reference.line - 1) as u32;
            let expected = match reference.text.strip_prefix(':') {
                Some(variable) => declarations.variable(variable),
                None => declarations.procedure(&reference.text),
            };
            for column in reference.column..=reference.column + reference.len() {
                let next_starts_here = column != reference.column
                    && references
                        .iter()
                        .any(|other| other.line == reference.line && other.column == column);
                if next_starts_here {
                    continue;
                }
                let found = finder.find_declarations_of(line, column as u32);
                prop_assert_eq!(found.as_slice(), expected, "column {}", column);
            }
        }
    }

    /// Property: Arbitrary text never makes highlighting or lookup panic.
    #[test]
    fn prop_arbitrary_text_never_panics(text in "\\PC{0,120}", line in 0u32..4, character in 0u32..40) {
        let tree = parse(&text).tree;
        let _ = semantic_tokens_of(&tree);
        let finder = DeclarationFinder::new(references_from(&tree), Declarations::from_tree(&tree));
        let _ = finder.find_declarations_of(line, character);
    }
}
