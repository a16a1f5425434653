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

//! Conversions between parser positions and LSP positions.
//!
//! The parser counts lines from 1 and columns from 0; LSP counts both from 0.
//!
//! Columns are counted in Unicode scalar values, which LSP calls the UTF-32
//! position encoding. The server asks for it during `initialize`; a client
//! that cannot use it falls back to UTF-16, where columns agree only for
//! lines without characters outside the Basic Multilingual Plane.

use crate::constants::LINE_NUMBER_OFFSET;
use logo_core::{SyntaxError, Token};
use tower_lsp::lsp_types::{
    ClientCapabilities, Diagnostic, DiagnosticSeverity, Position, PositionEncodingKind, Range,
};

/// Convert a count to an LSP coordinate, saturating at `u32::MAX`.
pub fn to_lsp(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// 0-based LSP line of a 1-based parser line.
pub fn lsp_line(line: usize) -> u32 {
    to_lsp(line.saturating_sub(LINE_NUMBER_OFFSET))
}

/// Range on a single line starting at a 1-based `line` and 0-based `column`.
///
/// # Example
///
/// ```
/// use logo_lsp::utils::line_range;
///
/// let range = line_range(1, 5, 2);
/// assert_eq!((range.start.line, range.start.character), (0, 5));
/// assert_eq!((range.end.line, range.end.character), (0, 7));
/// ```
pub fn line_range(line: usize, column: usize, length: usize) -> Range {
    let line = lsp_line(line);
    Range {
        start: Position {
            line,
            character: to_lsp(column),
        },
        end: Position {
            line,
            character: to_lsp(column.saturating_add(length)),
        },
    }
}

/// Range covering the whole text of `token`.
pub fn token_range(token: &Token) -> Range {
    line_range(token.line, token.column, token.len())
}

/// UTF-32 if the client offers it, otherwise `None` for the UTF-16 default.
pub fn negotiate_position_encoding(
    capabilities: &ClientCapabilities,
) -> Option<PositionEncodingKind> {
    capabilities
        .general
        .as_ref()?
        .position_encodings
        .as_ref()?
        .contains(&PositionEncodingKind::UTF32)
        .then_some(PositionEncodingKind::UTF32)
}

/// Diagnostic reported for a syntax error.
///
/// Severity is always error and no source is set.
pub fn to_diagnostic(error: &SyntaxError) -> Diagnostic {
    Diagnostic {
        range: line_range(error.line, error.column, error.length),
        severity: Some(DiagnosticSeverity::ERROR),
        message: error.message.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logo_core::TokenKind;
    use tower_lsp::lsp_types::GeneralClientCapabilities;

    #[test]
    fn test_token_range_covers_text() {
        let token = Token::new(TokenKind::Word, "\"square", 3, 7);
        let range = token_range(&token);
        assert_eq!(range.start, Position { line: 2, character: 7 });
        assert_eq!(range.end, Position { line: 2, character: 14 });
    }

    #[test]
    fn test_diagnostic_has_no_source() {
        let error = SyntaxError::new("missing '[' at 'forward'", 1, 9, 7);
        let diagnostic = to_diagnostic(&error);
        assert_eq!(diagnostic.source, None);
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.range.start, Position { line: 0, character: 9 });
        assert_eq!(diagnostic.range.end, Position { line: 0, character: 16 });
    }

    #[test]
    fn test_utf32_is_chosen_when_offered() {
        let mut capabilities = ClientCapabilities::default();
        assert_eq!(negotiate_position_encoding(&capabilities), None);

        capabilities.general = Some(GeneralClientCapabilities {
            position_encodings: Some(vec![PositionEncodingKind::UTF16]),
            ..Default::default()
        });
        assert_eq!(negotiate_position_encoding(&capabilities), None);

        capabilities.general = Some(GeneralClientCapabilities {
            position_encodings: Some(vec![
                PositionEncodingKind::UTF8,
                PositionEncodingKind::UTF32,
            ]),
            ..Default::default()
        });
        assert_eq!(
            negotiate_position_encoding(&capabilities),
            Some(PositionEncodingKind::UTF32)
        );
    }

    #[test]
    fn test_to_lsp_saturates() {
        assert_eq!(to_lsp(usize::MAX), u32::MAX);
        assert_eq!(lsp_line(0), 0);
    }
}
