use std::collections::HashSet;

use lazy_static::lazy_static;
use maplit::hashset;

use crate::{
	config::Dialect,
	lex::tok::{KeyWord, KEYWORD_DICT},
};

// The lexical configuration of one dialect. Both dialects share a single
// lexer and token stream; only these tables differ.
#[derive(Debug)]
pub struct Grammar {
	pub reserved_words: HashSet<&'static str>,
	pub delimiters: HashSet<char>,
	pub operator_chars: HashSet<char>,
}

lazy_static! {
	pub static ref ML_GRAMMAR: Grammar = Grammar {
		reserved_words: hashset!{
			"if", "then", "else",
			"let", "val", "in", "end",
			"fn",
			"orelse", "andalso",
			"div", "mod", "not",
			"true", "false",
		},
		delimiters: hashset!{ '(', ')', ';', ',', '|' },
		operator_chars: "+-*/<>=&!:.".chars().collect(),
	};

	pub static ref LAMBDA_GRAMMAR: Grammar = Grammar {
		reserved_words: hashset!{ "fn" },
		delimiters: hashset!{ '(', ')', ';' },
		operator_chars: ":=>".chars().collect(),
	};
}

impl Grammar {
	pub fn for_dialect(dialect: Dialect) -> &'static Grammar {
		match dialect {
			Dialect::Ml => &*ML_GRAMMAR,
			Dialect::Lambda => &*LAMBDA_GRAMMAR,
		}
	}

	// A reserved word of this dialect, as its keyword.
	pub fn keyword(&self, word: &str) -> Option<KeyWord> {
		if !self.reserved_words.contains(word) {
			return None;
		}
		KEYWORD_DICT.iter()
			.find(|(_, text)| *text == word)
			.map(|(kw, _)| *kw)
	}

	pub fn is_delimiter(&self, c: char) -> bool {
		self.delimiters.contains(&c)
	}

	pub fn is_op_char(&self, c: char) -> bool {
		self.operator_chars.contains(&c)
	}
}
