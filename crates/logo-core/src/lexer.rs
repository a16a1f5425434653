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

//! Lexical analysis for Logo source text.
//!
//! The lexer expects text that has already been lower-cased. Positions are
//! tracked in characters, not bytes: lines are 1-based, columns 0-based.
//!
//! Unknown characters are reported as syntax errors and skipped, so the
//! token stream always ends with exactly one [`TokenKind::Eof`].

use crate::error::SyntaxError;
use crate::token::{Keyword, Token, TokenKind};

/// Split `text` into tokens, collecting lexical errors along the way.
pub fn tokenize(text: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    let mut lexer = Lexer::new(text);
    lexer.run();
    (lexer.tokens, lexer.errors)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn run(&mut self) {
        while let Some(c) = self.peek() {
            let (line, column) = (self.line, self.column);
            match c {
                c if c.is_whitespace() => {
                    self.advance();
                }
                ';' => self.skip_comment(),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '+' => self.single(TokenKind::Plus),
                '*' => self.single(TokenKind::Star),
                '/' => self.single(TokenKind::Slash),
                '=' => self.single(TokenKind::Equal),
                '<' => match self.peek_at(1) {
                    Some('=') => self.double(TokenKind::LessEqual),
                    Some('>') => self.double(TokenKind::NotEqual),
                    _ => self.single(TokenKind::Less),
                },
                '>' => match self.peek_at(1) {
                    Some('=') => self.double(TokenKind::GreaterEqual),
                    _ => self.single(TokenKind::Greater),
                },
                '-' => {
                    let signed = !self.previous_is_value()
                        && self.peek_at(1).is_some_and(|d| d.is_ascii_digit());
                    if signed {
                        self.number();
                    } else {
                        self.single(TokenKind::Minus);
                    }
                }
                c if c.is_ascii_digit() => self.number(),
                ':' if self.peek_at(1).is_some_and(is_name_start) => {
                    self.advance();
                    let name = self.take_while(is_name_char);
                    self.push(TokenKind::ColonName, format!(":{}", name), line, column);
                }
                '"' => {
                    self.advance();
                    let word = self.take_while(is_word_char);
                    self.push(TokenKind::Word, format!("\"{}", word), line, column);
                }
                c if is_name_start(c) => {
                    let text = self.take_while(is_name_char);
                    let kind = match Keyword::lookup(&text) {
                        Some(keyword) => TokenKind::Keyword(keyword),
                        None => TokenKind::Name,
                    };
                    self.push(kind, text, line, column);
                }
                other => {
                    self.advance();
                    self.errors.push(SyntaxError::new(
                        format!("token recognition error at: '{}'", other),
                        line,
                        column,
                        0,
                    ));
                }
            }
        }
        let (line, column) = (self.line, self.column);
        self.push(TokenKind::Eof, String::new(), line, column);
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn single(&mut self, kind: TokenKind) {
        let (line, column) = (self.line, self.column);
        let text: String = self.advance().into_iter().collect();
        self.push(kind, text, line, column);
    }

    fn double(&mut self, kind: TokenKind) {
        let (line, column) = (self.line, self.column);
        let text: String = [self.advance(), self.advance()].into_iter().flatten().collect();
        self.push(kind, text, line, column);
    }

    fn number(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.extend(self.advance());
        }
        text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        let has_fraction = self.peek() == Some('.')
            && self.peek_at(1).is_some_and(|d| d.is_ascii_digit());
        if has_fraction {
            text.extend(self.advance());
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }
        self.push(TokenKind::Number, text, line, column);
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            text.extend(self.advance());
        }
        text
    }

    fn push(&mut self, kind: TokenKind, text: String, line: usize, column: usize) {
        self.tokens.push(Token::new(kind, text, line, column));
    }

    /// A `-` right after a value is subtraction, not a sign.
    fn previous_is_value(&self) -> bool {
        matches!(
            self.tokens.last().map(|token| token.kind),
            Some(
                TokenKind::Number
                    | TokenKind::ColonName
                    | TokenKind::Word
                    | TokenKind::RBracket
                    | TokenKind::RParen
            )
        )
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '?')
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '[' | ']' | '(' | ')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_command_with_number() {
        let (tokens, errors) = tokenize("forward 10");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Forward));
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!((tokens[1].line, tokens[1].column), (1, 8));
        assert_eq!(tokens[2].kind, TokenKind::Eof);
        assert_eq!((tokens[2].line, tokens[2].column), (1, 10));
    }

    #[test]
    fn test_words_and_variables() {
        let (tokens, _) = tokenize("make \"x :y");
        assert_eq!(tokens[1].kind, TokenKind::Word);
        assert_eq!(tokens[1].text, "\"x");
        assert_eq!(tokens[2].kind, TokenKind::ColonName);
        assert_eq!(tokens[2].text, ":y");
    }

    #[test]
    fn test_negative_and_decimal_numbers() {
        let (tokens, _) = tokenize("forward -10 fd 10.5");
        assert_eq!(tokens[1].text, "-10");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[3].text, "10.5");
    }

    #[test]
    fn test_minus_after_value_is_operator() {
        assert_eq!(
            kinds("10 -5"),
            vec![TokenKind::Number, TokenKind::Minus, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_question_mark_and_dot_keywords() {
        assert_eq!(
            kinds("shown? do.while word?"),
            vec![
                TokenKind::Keyword(Keyword::ShownQ),
                TokenKind::Keyword(Keyword::DoWhile),
                TokenKind::Keyword(Keyword::WordQ),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("< <= <> > >= ="),
            vec![
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::NotEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Equal,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_comment_is_skipped() {
        let (tokens, errors) = tokenize("fd 10 ; go forward\nrt 90");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn test_eof_after_trailing_newline() {
        let (tokens, _) = tokenize("fd 10\n");
        let eof = tokens.last().map(|t| (t.line, t.column));
        assert_eq!(eof, Some((2, 0)));
    }

    #[test]
    fn test_unknown_character_is_reported_and_skipped() {
        let (tokens, errors) = tokenize("fd ! 10");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "token recognition error at: '!'");
        assert_eq!((errors[0].line, errors[0].column, errors[0].length), (1, 3, 0));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_columns_count_characters() {
        let (tokens, _) = tokenize("show \"żółw :x");
        assert_eq!(tokens[2].column, 11);
    }
}
