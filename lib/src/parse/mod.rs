pub mod ast;
pub mod lambda;
pub mod ml;

use crate::{
	error::{ErrorKind, ErrorMessage},
	lang_err,
	lex::{
		TokenStream,
		cradle::SourceLoc,
		tok::{Token, TokenValue},
	},
};

impl TokenStream {
	pub fn peek(&self) -> &Token {
		self.tokens.front().unwrap_or(&self.eof)
	}

	pub fn advance(&mut self) -> Token {
		self.tokens.pop_front().unwrap_or_else(|| self.eof.clone())
	}

	pub fn next_is(&self, expected: &TokenValue) -> bool {
		self.peek().val == *expected
	}

	pub fn next_is_op(&self, op: &str) -> bool {
		matches!(&self.peek().val, TokenValue::Op(o) if o == op)
	}

	pub fn try_eat(&mut self, expected: &TokenValue) -> bool {
		if self.next_is(expected) {
			self.advance();
			true
		} else {
			false
		}
	}

	pub fn expect(&mut self, expected: TokenValue) -> Result<Token, ErrorMessage> {
		if self.next_is(&expected) {
			Ok(self.advance())
		} else {
			let found = self.peek();
			lang_err!(
				ErrorKind::Syntax,
				vec![ found.loc ],
				"Unexpected token. Saw: '{}'. Expected: '{}'.", found.val, expected
			)
		}
	}

	pub fn expect_name(&mut self) -> Result<(String, SourceLoc), ErrorMessage> {
		let found = self.peek();
		if let TokenValue::Name(name) = &found.val {
			let named = (name.clone(), found.loc);
			self.advance();
			return Ok(named);
		}
		lang_err!(
			ErrorKind::Syntax,
			vec![ found.loc ],
			"Unexpected token. Saw: '{}'. Expected a name.", found.val
		)
	}

	pub fn at_eof(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn expect_eof(&self) -> Result<(), ErrorMessage> {
		if self.at_eof() {
			return Ok(());
		}
		let remaining = self.tokens.iter()
			.map(|t| format!("'{}'", t.val))
			.collect::<Vec<_>>()
			.join(", ");
		lang_err!(
			ErrorKind::Parse,
			vec![ self.peek().loc ],
			"Parsing failed to consume tokens [{}].", remaining
		)
	}
}
