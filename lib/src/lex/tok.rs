use std::fmt;

use crate::lex::cradle::SourceLoc;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub val: TokenValue,
	pub loc: SourceLoc,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenValue {
	Name(String),
	KeyWord(KeyWord),
	IntLit(i64),
	StrLit(String),
	Op(String),
	Punc(char),
	Eof,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyWord {
	If,
	Then,
	Else,
	Let,
	Val,
	In,
	End,
	Fn,
	OrElse,
	AndAlso,
	Div,
	Mod,
	Not,
	True,
	False,
}

pub const KEYWORD_DICT: &[(KeyWord, &str)] = &[
	(KeyWord::If, "if"),
	(KeyWord::Then, "then"),
	(KeyWord::Else, "else"),
	(KeyWord::Let, "let"),
	(KeyWord::Val, "val"),
	(KeyWord::In, "in"),
	(KeyWord::End, "end"),
	(KeyWord::Fn, "fn"),
	(KeyWord::OrElse, "orelse"),
	(KeyWord::AndAlso, "andalso"),
	(KeyWord::Div, "div"),
	(KeyWord::Mod, "mod"),
	(KeyWord::Not, "not"),
	(KeyWord::True, "true"),
	(KeyWord::False, "false"),
];

impl KeyWord {
	pub fn text(&self) -> &'static str {
		KEYWORD_DICT.iter()
			.find(|(kw, _)| kw == self)
			.map(|(_, text)| *text)
			.unwrap_or("?")
	}
}

impl TokenValue {
	pub fn op(text: &str) -> Self {
		TokenValue::Op(text.to_string())
	}
}

// Renders the token the way it was written, which is what error
// messages quote back at the user.
impl fmt::Display for TokenValue {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			TokenValue::Name(name) => write!(f, "{}", name),
			TokenValue::KeyWord(kw) => write!(f, "{}", kw.text()),
			TokenValue::IntLit(n) => write!(f, "{}", n),
			TokenValue::StrLit(s) => write!(f, "{:?}", s),
			TokenValue::Op(op) => write!(f, "{}", op),
			TokenValue::Punc(p) => write!(f, "{}", p),
			TokenValue::Eof => write!(f, "eof"),
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.val)
	}
}
