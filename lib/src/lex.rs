pub mod cradle;
pub mod grammar;
pub mod tok;

use std::collections::VecDeque;

use crate::{
	error::{ErrorKind, ErrorMessage},
	lang_err,
};

use cradle::{CharsPos, SourceLoc, SourcePos};
use grammar::Grammar;
use tok::{Token, TokenValue};

// The lexed program. The `Eof` token is kept apart so that the stream can
// never run dry: consuming past the end keeps yielding it.
#[derive(Clone, Debug)]
pub struct TokenStream {
	pub(crate) tokens: VecDeque<Token>,
	pub(crate) eof: Token,
}

impl TokenStream {
	pub fn new(tokens: VecDeque<Token>, eof_loc: SourceLoc) -> Self {
		TokenStream {
			tokens,
			eof: Token {
				val: TokenValue::Eof,
				loc: eof_loc,
			},
		}
	}

	// Every token still to be consumed, `Eof` included.
	pub fn into_tokens(self) -> Vec<Token> {
		let mut tokens = Vec::from(self.tokens);
		tokens.push(self.eof);
		tokens
	}
}

pub fn lex(s: &str, grammar: &Grammar) -> Result<TokenStream, ErrorMessage> {
	let mut src = CharsPos::new(s);
	let mut tokstrm: VecDeque<Token> = VecDeque::new();

	while let Some((start, c)) = src.peek() {
		match c {
			' ' | '\t' | '\n' | '\r' => {
				src.next();
			}

			'"' => tokstrm.push_back(src.get_strlit()?),

			// `(` opens either a comment or a group, which needs the second character
			'(' => {
				src.next();
				if let Some((_, '*')) = src.peek() {
					src.next();
					src.skip_comment(start)?;
				} else if grammar.is_delimiter('(') {
					tokstrm.push_back(Token {
						val: TokenValue::Punc('('),
						loc: SourceLoc::new(start, src.pos.index),
					});
				} else {
					return unrecognized(start, c);
				}
			}

			'0'..='9' => tokstrm.push_back(src.get_numlit()?),

			c if grammar.is_delimiter(c) => {
				src.next();
				tokstrm.push_back(Token {
					val: TokenValue::Punc(c),
					loc: SourceLoc::new(start, src.pos.index),
				});
			}

			c if grammar.is_op_char(c) => tokstrm.push_back(src.get_op(grammar)),

			c if c.is_alphabetic() || c == '_' => tokstrm.push_back(src.get_word(grammar)),

			c => return unrecognized(start, c),
		}
	}

	Ok(TokenStream::new(tokstrm, SourceLoc::new(src.pos, src.pos.index)))
}

fn unrecognized<T>(at: SourcePos, c: char) -> Result<T, ErrorMessage> {
	lang_err!(
		ErrorKind::Lex,
		vec![ SourceLoc::new(at, at.index + c.len_utf8()) ],
		"Unrecognized character {:?}.", c
	)
}

impl CharsPos<'_> {
	fn get_strlit(&mut self) -> Result<Token, ErrorMessage> {
		self.make_token(|s| {
			s.next(); // opening quote
			let mut acc = String::new();
			loop {
				match s.next() {
					None => return s.fail_here("EOF encountered within string"),
					Some((_, '"')) => break,
					Some((at, '\\')) => match s.next() {
						Some((_, '\n')) => {
							// line continuation: drop the newline and the next line's indentation
							s.read_while(|c| *c == ' ' || *c == '\t' || *c == '\r');
							while let Some((_, '\n')) = s.peek() {
								s.next();
								s.read_while(|c| *c == ' ' || *c == '\t' || *c == '\r');
							}
						}
						Some((_, '\\')) => acc.push('\\'),
						Some((_, 'n')) => acc.push('\n'),
						Some((_, 't')) => acc.push('\t'),
						Some((_, '"')) => acc.push('"'),
						Some(_) => {
							return lang_err!(
								ErrorKind::Lex,
								vec![ SourceLoc::new(at, at.index + 1) ],
								"Bad string escape character"
							)
						}
						None => return s.fail_here("EOF encountered within string"),
					},
					Some((at, '\n')) => {
						return lang_err!(
							ErrorKind::Lex,
							vec![ SourceLoc::new(at, at.index + 1) ],
							"End of line encountered within string"
						)
					}
					Some((at, '\t')) => {
						return lang_err!(
							ErrorKind::Lex,
							vec![ SourceLoc::new(at, at.index + 1) ],
							"Tab encountered within string"
						)
					}
					Some((_, c)) => acc.push(c),
				}
			}
			Ok(TokenValue::StrLit(acc))
		})
	}

	fn get_numlit(&mut self) -> Result<Token, ErrorMessage> {
		let startpos = self.pos;
		let digits = self.read_while(|c| c.is_ascii_digit());

		match digits.parse::<i64>() {
			Ok(n) => Ok(Token {
				val: TokenValue::IntLit(n),
				loc: SourceLoc::new(startpos, self.pos.index),
			}),
			Err(_) => lang_err!(
				ErrorKind::Lex,
				vec![ SourceLoc::new(startpos, self.pos.index) ],
				"Integer literal {} is out of range", digits
			),
		}
	}

	// Called with `(*` already consumed. Stops at the first `*)`.
	fn skip_comment(&mut self, opened_at: SourcePos) -> Result<(), ErrorMessage> {
		while let Some((_, c)) = self.next() {
			if c == '*' {
				if let Some((_, ')')) = self.peek() {
					self.next();
					return Ok(());
				}
			}
		}
		lang_err!(
			ErrorKind::Lex,
			vec![ SourceLoc::new(opened_at, opened_at.index + 2) ],
			"EOF encountered within comment"
		)
	}

	fn get_op(&mut self, grammar: &Grammar) -> Token {
		let startpos = self.pos;
		let op = self.read_while(|&c| grammar.is_op_char(c));
		Token {
			val: TokenValue::Op(op),
			loc: SourceLoc::new(startpos, self.pos.index),
		}
	}

	fn get_word(&mut self, grammar: &Grammar) -> Token {
		let startpos = self.pos;
		let word = self.read_while(|&c| c.is_alphanumeric() || c == '_');
		let val = match grammar.keyword(&word) {
			Some(kw) => TokenValue::KeyWord(kw),
			None => TokenValue::Name(word),
		};
		Token {
			val,
			loc: SourceLoc::new(startpos, self.pos.index),
		}
	}

	fn make_token<F>(&mut self, mut f: F) -> Result<Token, ErrorMessage>
	where
		F: FnMut(&mut Self) -> Result<TokenValue, ErrorMessage>,
	{
		let startpos = self.pos;
		let value = f(self)?;
		Ok(Token {
			val: value,
			loc: SourceLoc::new(startpos, self.pos.index),
		})
	}

	fn fail_here<T>(&self, msg: &str) -> Result<T, ErrorMessage> {
		lang_err!(
			ErrorKind::Lex,
			vec![ SourceLoc::new(self.pos, self.pos.index) ],
			"{}", msg
		)
	}
}
