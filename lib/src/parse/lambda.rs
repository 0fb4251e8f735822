// The lambda dialect:
//
//	program  ::= binding*
//	binding  ::= name := term ;
//	term     ::= fn name => term | appchain
//	appchain ::= atom atom* [fn name => term]
//	atom     ::= name | ( term )

use crate::{
	error::{ErrorKind, ErrorMessage},
	lang_err,
	lex::{
		TokenStream,
		tok::{KeyWord, TokenValue},
	},
	parse::ast::{Binding, Expr},
};

type ParseResult = Result<Expr, ErrorMessage>;

// What the token after an atom says about the application chain it ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Next {
	// `:=`, so the name just read starts the next binding
	Bind,
	// `(`, a parenthesized argument
	Group,
	// another name, another argument
	Chain,
	// `fn`, a final argument extending as far right as possible
	Lambda,
	End,
}

pub fn parse_lambda(tokens: &mut TokenStream) -> Result<Vec<Binding>, ErrorMessage> {
	let mut bindings = Vec::new();
	while !tokens.at_eof() {
		bindings.push(tokens.parse_binding()?);
	}
	Ok(bindings)
}

impl TokenStream {
	fn lookahead(&self) -> Next {
		match &self.peek().val {
			TokenValue::Op(op) if op == ":=" => Next::Bind,
			TokenValue::Punc('(') => Next::Group,
			TokenValue::Name(_) => Next::Chain,
			TokenValue::KeyWord(KeyWord::Fn) => Next::Lambda,
			_ => Next::End,
		}
	}

	fn parse_binding(&mut self) -> Result<Binding, ErrorMessage> {
		let (name, name_loc) = self.expect_name()?;
		self.expect(TokenValue::op(":="))?;
		let term = self.parse_term()?;
		let semi = self.expect(TokenValue::Punc(';'))?;
		Ok(Binding {
			name,
			term,
			loc: name_loc.join(semi.loc),
		})
	}

	fn parse_term(&mut self) -> ParseResult {
		let start = self.peek().loc;
		if self.try_eat(&TokenValue::KeyWord(KeyWord::Fn)) {
			let (param, _) = self.expect_name()?;
			self.expect(TokenValue::op("=>"))?;
			let body = self.parse_term()?;
			let loc = start.join(body.loc);
			Ok(Expr::abs(loc, &param, body))
		} else {
			self.parse_appchain()
		}
	}

	fn parse_appchain(&mut self) -> ParseResult {
		let mut func = self.parse_term_atom()?;
		loop {
			match self.lookahead() {
				Next::Group | Next::Chain => {
					let arg = self.parse_term_atom()?;
					let loc = func.loc.join(arg.loc);
					func = Expr::app(loc, func, arg);
				}
				Next::Lambda => {
					let arg = self.parse_term()?;
					let loc = func.loc.join(arg.loc);
					return Ok(Expr::app(loc, func, arg));
				}
				// a name followed by `:=` inside a term means the `;` before it is missing
				Next::Bind => {
					let found = self.peek();
					return lang_err!(
						ErrorKind::Syntax,
						vec![ found.loc ],
						"Unexpected token. Saw: '{}'. Expected: ';'.", found.val
					);
				}
				Next::End => return Ok(func),
			}
		}
	}

	fn parse_term_atom(&mut self) -> ParseResult {
		let tok = self.advance();
		match tok.val {
			TokenValue::Name(x) => Ok(Expr::var(tok.loc, &x)),
			TokenValue::Punc('(') => {
				let inner = self.parse_term()?;
				self.expect(TokenValue::Punc(')'))?;
				Ok(inner)
			}
			other => lang_err!(
				ErrorKind::Syntax,
				vec![ tok.loc ],
				"Unexpected token. Saw: '{}'.", other
			),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lex::{grammar::LAMBDA_GRAMMAR, lex};

	fn parse(src: &str) -> Result<Vec<Binding>, ErrorMessage> {
		parse_lambda(&mut lex(src, &LAMBDA_GRAMMAR)?)
	}

	fn shown(src: &str) -> Vec<String> {
		parse(src).unwrap().iter().map(|b| b.to_string()).collect()
	}

	#[test]
	fn parses_church_definitions() {
		let src = "
			succ := fn n => fn f => fn x => f (n f x);
			two := fn f => fn x => f (f x);
			main := succ two;
		";
		assert_eq!(shown(src), vec![
			"succ := fn n => fn f => fn x => f (n f x);",
			"two := fn f => fn x => f (f x);",
			"main := succ two;",
		]);
	}

	#[test]
	fn juxtaposition_is_left_associative() {
		assert_eq!(shown("main := a b c;"), vec!["main := a b c;"]);
		assert_eq!(shown("main := a (b c);"), vec!["main := a (b c);"]);
	}

	#[test]
	fn parenthesized_groups_apply_to_groups() {
		assert_eq!(
			shown("main := (fn x => x) (fn y => y);"),
			vec!["main := (fn x => x) (fn y => y);"]
		);
		assert_eq!(shown("main := f (x) y;"), vec!["main := f x y;"]);
	}

	#[test]
	fn fn_extends_to_the_right() {
		assert_eq!(shown("main := fn x => x x;"), vec!["main := fn x => x x;"]);
		assert_eq!(shown("main := f fn x => x;"), vec!["main := f (fn x => x);"]);
	}

	#[test]
	fn empty_program_has_no_bindings() {
		assert!(parse("  (* nothing *) ").unwrap().is_empty());
	}

	#[test]
	fn missing_semicolon_is_caught_at_the_next_binding() {
		let err = parse("id := fn x => x\nmain := id;").unwrap_err();
		assert_eq!(err.kind, ErrorKind::Syntax);
		assert_eq!(err.msg, "Unexpected token. Saw: ':='. Expected: ';'.");
		assert_eq!(err.location().map(|l| l.start.row), Some(2));
	}

	#[test]
	fn binding_needs_a_name_and_assignment() {
		assert_eq!(parse("(x) := y;").unwrap_err().kind, ErrorKind::Syntax);
		assert_eq!(parse("main x;").unwrap_err().kind, ErrorKind::Syntax);
	}

	#[test]
	fn integers_are_not_terms() {
		let err = parse("main := f 3;").unwrap_err();
		assert_eq!(err.kind, ErrorKind::Syntax);
	}

	#[test]
	fn unclosed_group_fails() {
		let err = parse("main := (f x;").unwrap_err();
		assert_eq!(err.msg, "Unexpected token. Saw: ';'. Expected: ')'.");
	}
}
