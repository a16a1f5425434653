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

//! Semantic token classification and encoding tests.

use logo_core::parse;
use logo_lsp::semantic_tokens::semantic_tokens_of;

fn assert_tokens(source: &str, expected: &[u32]) {
    let parsed = parse(source);
    assert!(parsed.errors.is_empty(), "unexpected errors: {:?}", parsed.errors);
    assert_eq!(semantic_tokens_of(&parsed.tree), expected, "source: {source}");
}

// ============================================================================
// Movement and drawing commands
// ============================================================================

#[test]
fn test_forward_command() {
    assert_tokens("forward 10", &[0, 0, 7, 0, 0, 0, 8, 2, 2, 0]);
}

#[test]
fn test_short_form_commands_on_separate_lines() {
    assert_tokens(
        "fd 10\nbk 20\nlt 30\nrt 40",
        &[
            0, 0, 2, 0, 0, // fd
            0, 3, 2, 2, 0, // 10
            1, 0, 2, 0, 0, // bk
            0, 3, 2, 2, 0, // 20
            1, 0, 2, 0, 0, // lt
            0, 3, 2, 2, 0, // 30
            1, 0, 2, 0, 0, // rt
            0, 3, 2, 2, 0, // 40
        ],
    );
}

#[test]
fn test_negative_and_decimal_numbers() {
    assert_tokens("forward -10", &[0, 0, 7, 0, 0, 0, 8, 3, 2, 0]);
    assert_tokens("forward 10.5", &[0, 0, 7, 0, 0, 0, 8, 4, 2, 0]);
}

#[test]
fn test_commands_without_arguments() {
    assert_tokens("home", &[0, 0, 4, 0, 0]);
    assert_tokens("repcount", &[0, 0, 8, 0, 0]);
    assert_tokens("bye", &[0, 0, 3, 0, 0]);
}

#[test]
fn test_setxy_command() {
    assert_tokens("setxy 70 80", &[0, 0, 5, 0, 0, 0, 6, 2, 2, 0, 0, 3, 2, 2, 0]);
}

#[test]
fn test_set_pos_command() {
    assert_tokens(
        "set pos [90 100]",
        &[
            0, 0, 3, 0, 0, // set
            0, 4, 3, 0, 0, // pos
            0, 5, 2, 2, 0, // 90
            0, 3, 3, 2, 0, // 100
        ],
    );
}

#[test]
fn test_label_with_word() {
    assert_tokens("label \"hello", &[0, 0, 5, 0, 0, 0, 6, 6, 1, 0]);
}

// ============================================================================
// Procedures and variables
// ============================================================================

#[test]
fn test_to_command() {
    assert_tokens(
        "to square :size\n  repeat 4 [forward :size right 90]\nend",
        &[
            0, 0, 2, 0, 0, // to
            0, 3, 6, 3, 2, // square
            1, 2, 6, 0, 0, // repeat
            0, 7, 1, 2, 0, // 4
            0, 3, 7, 0, 0, // forward
            0, 8, 5, 4, 0, // :size
            0, 6, 5, 0, 0, // right
            0, 6, 2, 2, 0, // 90
            1, 0, 3, 0, 0, // end
        ],
    );
}

#[test]
fn test_define_command() {
    assert_tokens(
        "define \"square [[size] [repeat 4 [forward :size right 90]]]\nend",
        &[
            0, 0, 6, 0, 0, // define
            0, 7, 7, 3, 2, // "square
            0, 10, 4, 4, 1, // size
            0, 7, 6, 0, 0, // repeat
            0, 7, 1, 2, 0, // 4
            0, 3, 7, 0, 0, // forward
            0, 8, 5, 4, 0, // :size
            0, 6, 5, 0, 0, // right
            0, 6, 2, 2, 0, // 90
            1, 0, 3, 0, 0, // end
        ],
    );
}

#[test]
fn test_procedure_call() {
    assert_tokens(
        "to square\nend\nsquare",
        &[
            0, 0, 2, 0, 0, // to
            0, 3, 6, 3, 2, // square
            1, 0, 3, 0, 0, // end
            1, 0, 6, 3, 0, // square
        ],
    );
}

#[test]
fn test_make_command() {
    assert_tokens("make \"x 100", &[0, 0, 4, 0, 0, 0, 5, 2, 4, 2, 0, 3, 3, 2, 0]);
}

#[test]
fn test_name_command_binds_after_value() {
    assert_tokens("name 100 \"x", &[0, 0, 4, 0, 0, 0, 5, 3, 2, 0, 0, 4, 2, 4, 2]);
}

#[test]
fn test_localmake_command() {
    assert_tokens(
        "localmake \"y 200",
        &[0, 0, 9, 0, 0, 0, 10, 2, 4, 2, 0, 3, 3, 2, 0],
    );
}

#[test]
fn test_for_command() {
    assert_tokens(
        "for [i 1 5] [forward :i]",
        &[
            0, 0, 3, 0, 0, // for
            0, 5, 1, 4, 1, // i
            0, 2, 1, 2, 0, // 1
            0, 2, 1, 2, 0, // 5
            0, 4, 7, 0, 0, // forward
            0, 8, 2, 4, 0, // :i
        ],
    );
}

#[test]
fn test_dotimes_command() {
    assert_tokens(
        "dotimes [i 5] [forward :i]",
        &[
            0, 0, 7, 0, 0, // dotimes
            0, 9, 1, 4, 2, // i
            0, 2, 1, 2, 0, // 5
            0, 4, 7, 0, 0, // forward
            0, 8, 2, 4, 0, // :i
        ],
    );
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
fn test_if_command() {
    assert_tokens(
        "if 1 > 0 [forward 10]",
        &[
            0, 0, 2, 0, 0, // if
            0, 3, 1, 2, 0, // 1
            0, 4, 1, 2, 0, // 0
            0, 3, 7, 0, 0, // forward
            0, 8, 2, 2, 0, // 10
        ],
    );
}

#[test]
fn test_ifelse_command() {
    assert_tokens(
        "ifelse 1 > 0 [forward 10] [back 20]",
        &[
            0, 0, 6, 0, 0, // ifelse
            0, 7, 1, 2, 0, // 1
            0, 4, 1, 2, 0, // 0
            0, 3, 7, 0, 0, // forward
            0, 8, 2, 2, 0, // 10
            0, 5, 4, 0, 0, // back
            0, 5, 2, 2, 0, // 20
        ],
    );
}

#[test]
fn test_iffalse_command() {
    assert_tokens(
        "iffalse [back 20]",
        &[0, 0, 7, 0, 0, 0, 9, 4, 0, 0, 0, 5, 2, 2, 0],
    );
}

#[test]
fn test_do_while_command() {
    assert_tokens(
        "do.while [forward 10] 1 > 0",
        &[
            0, 0, 8, 0, 0, // do.while
            0, 10, 7, 0, 0, // forward
            0, 8, 2, 2, 0, // 10
            0, 4, 1, 2, 0, // 1
            0, 4, 1, 2, 0, // 0
        ],
    );
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_queries_without_arguments() {
    for query in ["pos", "xcor", "heading", "towards", "shown?", "pc", "pensize"] {
        let length = query.len() as u32;
        assert_tokens(&format!("show {query}"), &[0, 0, 4, 0, 0, 0, 5, length, 0, 0]);
    }
}

#[test]
fn test_thing_and_def_with_words() {
    assert_tokens("show def \"square", &[0, 0, 4, 0, 0, 0, 5, 3, 0, 0, 0, 4, 7, 1, 0]);
    assert_tokens("show thing \"x", &[0, 0, 4, 0, 0, 0, 5, 5, 0, 0, 0, 6, 2, 1, 0]);
    assert_tokens("show :x", &[0, 0, 4, 0, 0, 0, 5, 2, 4, 0]);
}

#[test]
fn test_list_in_parentheses() {
    assert_tokens(
        "show (list 1 2 3)",
        &[
            0, 0, 4, 0, 0, // show
            0, 6, 4, 0, 0, // list
            0, 5, 1, 2, 0, // 1
            0, 2, 1, 2, 0, // 2
            0, 2, 1, 2, 0, // 3
        ],
    );
}

#[test]
fn test_data_list_numbers() {
    assert_tokens(
        "show first [1 2 3]",
        &[
            0, 0, 4, 0, 0, // show
            0, 5, 5, 0, 0, // first
            0, 7, 1, 2, 0, // 1
            0, 2, 1, 2, 0, // 2
            0, 2, 1, 2, 0, // 3
        ],
    );
}

#[test]
fn test_bare_atoms_in_data_lists_are_skipped() {
    assert_tokens("show (readword [prompt])", &[0, 0, 4, 0, 0, 0, 6, 8, 0, 0]);
    assert_tokens("show emptyp []", &[0, 0, 4, 0, 0, 0, 5, 6, 0, 0]);
}

#[test]
fn test_predicates_with_two_words() {
    assert_tokens(
        "show beforep \"a \"b",
        &[
            0, 0, 4, 0, 0, // show
            0, 5, 7, 0, 0, // beforep
            0, 8, 2, 1, 0, // "a
            0, 3, 2, 1, 0, // "b
        ],
    );
}

#[test]
fn test_empty_document() {
    assert_tokens("", &[]);
}
