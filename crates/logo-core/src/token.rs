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

//! Tokens and the Logo keyword vocabulary.
//!
//! Every spelling of a built-in is its own [`Keyword`], so `fd` and `forward`
//! are distinct keywords that the parser treats identically. The order of
//! [`VOCABULARY`] is the order in which expected tokens are listed in syntax
//! error messages.

use std::fmt;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// A reserved word of the Logo language.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// All keywords in vocabulary order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            /// Source spelling of the keyword (always lower case).
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            /// Look up a keyword by its lower-case spelling.
            pub fn lookup(text: &str) -> Option<Keyword> {
                match text {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Forward => "forward",
    Fd => "fd",
    Back => "back",
    Bk => "bk",
    Left => "left",
    Lt => "lt",
    Right => "right",
    Rt => "rt",
    Home => "home",
    Setx => "setx",
    Sety => "sety",
    Setxy => "setxy",
    Set => "set",
    Pos => "pos",
    Setheading => "setheading",
    Seth => "seth",
    Arc => "arc",
    Ellipse => "ellipse",
    Showturtle => "showturtle",
    St => "st",
    Hideturtle => "hideturtle",
    Ht => "ht",
    Clean => "clean",
    Clearscreen => "clearscreen",
    Cs => "cs",
    Fill => "fill",
    Filled => "filled",
    Label => "label",
    Print => "print",
    Show => "show",
    Setlabelheight => "setlabelheight",
    Wrap => "wrap",
    Window => "window",
    Fence => "fence",
    Penup => "penup",
    Pu => "pu",
    Pendown => "pendown",
    Pd => "pd",
    Setcolor => "setcolor",
    Setpencolor => "setpencolor",
    Setwidth => "setwidth",
    Setpensize => "setpensize",
    Changeshape => "changeshape",
    Csh => "csh",
    To => "to",
    End => "end",
    Define => "define",
    Make => "make",
    Name => "name",
    Localmake => "localmake",
    Repeat => "repeat",
    For => "for",
    Repcount => "repcount",
    If => "if",
    Ifelse => "ifelse",
    Test => "test",
    Iftrue => "iftrue",
    Iffalse => "iffalse",
    Wait => "wait",
    Bye => "bye",
    Dotimes => "dotimes",
    DoWhile => "do.while",
    While => "while",
    DoUntil => "do.until",
    Until => "until",
    Xcor => "xcor",
    Ycor => "ycor",
    Heading => "heading",
    Towards => "towards",
    Shownp => "shownp",
    ShownQ => "shown?",
    Labelsize => "labelsize",
    Pendownp => "pendownp",
    PendownQ => "pendown?",
    Pencolor => "pencolor",
    Pc => "pc",
    Pensize => "pensize",
    Def => "def",
    Thing => "thing",
    List => "list",
    First => "first",
    Butfirst => "butfirst",
    Last => "last",
    Butlast => "butlast",
    Item => "item",
    Pick => "pick",
    Sum => "sum",
    Minus => "minus",
    Random => "random",
    Modulo => "modulo",
    Power => "power",
    Readword => "readword",
    Readlist => "readlist",
    Wordp => "wordp",
    WordQ => "word?",
    Listp => "listp",
    ListQ => "list?",
    Arrayp => "arrayp",
    ArrayQ => "array?",
    Numberp => "numberp",
    NumberQ => "number?",
    Emptyp => "emptyp",
    EmptyQ => "empty?",
    Equalp => "equalp",
    EqualQ => "equal?",
    Notequalp => "notequalp",
    NotequalQ => "notequal?",
    Beforep => "beforep",
    BeforeQ => "before?",
    Substringp => "substringp",
    SubstringQ => "substring?",
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    LBracket,
    RBracket,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    NotEqual,
    /// Bare identifier such as a procedure name.
    Name,
    /// Variable reference such as `:size`.
    ColonName,
    /// Quoted word such as `"square`.
    Word,
    Number,
    Eof,
}

impl TokenKind {
    /// Name used when listing this kind in an "expecting" clause.
    pub fn display_name(self) -> String {
        match self {
            TokenKind::Keyword(keyword) => format!("'{}'", keyword),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Equal => "'='".to_string(),
            TokenKind::Less => "'<'".to_string(),
            TokenKind::Greater => "'>'".to_string(),
            TokenKind::LessEqual => "'<='".to_string(),
            TokenKind::GreaterEqual => "'>='".to_string(),
            TokenKind::NotEqual => "'<>'".to_string(),
            TokenKind::Name => "NAME".to_string(),
            TokenKind::ColonName => "COLON_NAME".to_string(),
            TokenKind::Word => "WORD".to_string(),
            TokenKind::Number => "NUMBER".to_string(),
            TokenKind::Eof => "<EOF>".to_string(),
        }
    }

    /// Position of this kind in [`VOCABULARY`].
    pub fn rank(self) -> usize {
        VOCABULARY
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(VOCABULARY.len())
    }
}

/// Every token kind in message order. `<EOF>` sorts first.
pub static VOCABULARY: &[TokenKind] = &{
    use Keyword as K;
    use TokenKind as T;
    [
        T::Eof,
        T::Keyword(K::Forward),
        T::Keyword(K::Fd),
        T::Keyword(K::Back),
        T::Keyword(K::Bk),
        T::Keyword(K::Left),
        T::Keyword(K::Lt),
        T::Keyword(K::Right),
        T::Keyword(K::Rt),
        T::Keyword(K::Home),
        T::Keyword(K::Setx),
        T::Keyword(K::Sety),
        T::Keyword(K::Setxy),
        T::Keyword(K::Set),
        T::Keyword(K::Pos),
        T::LBracket,
        T::RBracket,
        T::Keyword(K::Setheading),
        T::Keyword(K::Seth),
        T::Keyword(K::Arc),
        T::Keyword(K::Ellipse),
        T::Keyword(K::Showturtle),
        T::Keyword(K::St),
        T::Keyword(K::Hideturtle),
        T::Keyword(K::Ht),
        T::Keyword(K::Clean),
        T::Keyword(K::Clearscreen),
        T::Keyword(K::Cs),
        T::Keyword(K::Fill),
        T::Keyword(K::Filled),
        T::Keyword(K::Label),
        T::Keyword(K::Print),
        T::Keyword(K::Show),
        T::Keyword(K::Setlabelheight),
        T::Keyword(K::Wrap),
        T::Keyword(K::Window),
        T::Keyword(K::Fence),
        T::Keyword(K::Penup),
        T::Keyword(K::Pu),
        T::Keyword(K::Pendown),
        T::Keyword(K::Pd),
        T::Keyword(K::Setcolor),
        T::Keyword(K::Setpencolor),
        T::Keyword(K::Setwidth),
        T::Keyword(K::Setpensize),
        T::Keyword(K::Changeshape),
        T::Keyword(K::Csh),
        T::Keyword(K::To),
        T::Keyword(K::End),
        T::Keyword(K::Define),
        T::Keyword(K::Make),
        T::Keyword(K::Name),
        T::Keyword(K::Localmake),
        T::Keyword(K::Repeat),
        T::Keyword(K::For),
        T::Keyword(K::Repcount),
        T::Keyword(K::If),
        T::Keyword(K::Ifelse),
        T::Keyword(K::Test),
        T::Keyword(K::Iftrue),
        T::Keyword(K::Iffalse),
        T::Keyword(K::Wait),
        T::Keyword(K::Bye),
        T::Keyword(K::Dotimes),
        T::Keyword(K::DoWhile),
        T::Keyword(K::While),
        T::Keyword(K::DoUntil),
        T::Keyword(K::Until),
        T::Keyword(K::Xcor),
        T::Keyword(K::Ycor),
        T::Keyword(K::Heading),
        T::Keyword(K::Towards),
        T::Keyword(K::Shownp),
        T::Keyword(K::ShownQ),
        T::Keyword(K::Labelsize),
        T::Keyword(K::Pendownp),
        T::Keyword(K::PendownQ),
        T::Keyword(K::Pencolor),
        T::Keyword(K::Pc),
        T::Keyword(K::Pensize),
        T::Keyword(K::Def),
        T::Keyword(K::Thing),
        T::LParen,
        T::RParen,
        T::Keyword(K::List),
        T::Keyword(K::First),
        T::Keyword(K::Butfirst),
        T::Keyword(K::Last),
        T::Keyword(K::Butlast),
        T::Keyword(K::Item),
        T::Keyword(K::Pick),
        T::Keyword(K::Sum),
        T::Keyword(K::Minus),
        T::Keyword(K::Random),
        T::Keyword(K::Modulo),
        T::Keyword(K::Power),
        T::Keyword(K::Readword),
        T::Keyword(K::Readlist),
        T::Keyword(K::Wordp),
        T::Keyword(K::WordQ),
        T::Keyword(K::Listp),
        T::Keyword(K::ListQ),
        T::Keyword(K::Arrayp),
        T::Keyword(K::ArrayQ),
        T::Keyword(K::Numberp),
        T::Keyword(K::NumberQ),
        T::Keyword(K::Emptyp),
        T::Keyword(K::EmptyQ),
        T::Keyword(K::Equalp),
        T::Keyword(K::EqualQ),
        T::Keyword(K::Notequalp),
        T::Keyword(K::NotequalQ),
        T::Keyword(K::Beforep),
        T::Keyword(K::BeforeQ),
        T::Keyword(K::Substringp),
        T::Keyword(K::SubstringQ),
        T::Plus,
        T::Minus,
        T::Star,
        T::Slash,
        T::Equal,
        T::Less,
        T::Greater,
        T::LessEqual,
        T::GreaterEqual,
        T::NotEqual,
        T::Name,
        T::ColonName,
        T::Word,
        T::Number,
    ]
};

/// A lexed token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token; empty for end-of-input.
    pub text: String,
    /// Line number (1-based).
    pub line: usize,
    /// Column in characters (0-based).
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Length of the token text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The token as it appears in error messages, e.g. `'forward'` or `'<EOF>'`.
    pub fn quoted(&self) -> String {
        match self.kind {
            TokenKind::Eof => "'<EOF>'".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) at {}:{}", self.kind, self.text, self.line, self.column)
    }
}
