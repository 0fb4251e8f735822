// The ML dialect:
//
//	expn ::= if expn then expn else expn
//	       | let val name = expn in expn end
//	       | fn name => expn
//	       | disj
//	disj ::= disj orelse conj | conj
//	conj ::= conj andalso cmpn | cmpn
//	cmpn ::= addn (= | <) addn | addn
//	addn ::= addn (+ | -) mult | mult
//	mult ::= mult (* | div | mod) appl | appl
//	appl ::= appl . nega | nega
//	nega ::= not atom | atom
//	atom ::= integer | ( expn ) | name | true | false

use std::rc::Rc;

use crate::{
	error::{ErrorKind, ErrorMessage},
	lang_err,
	lex::{
		TokenStream,
		tok::{KeyWord, TokenValue},
	},
	parse::ast::{BinOp, Expr, ExprVal, Lit, UnOp},
};

type ParseResult = Result<Expr, ErrorMessage>;

#[derive(Clone, Copy, Debug)]
enum Level {
	Disj,
	Conj,
	Cmpn,
	Addn,
	Mult,
}

// Parses a whole ML program: one expression, then nothing.
pub fn parse_ml(tokens: &mut TokenStream) -> ParseResult {
	let expr = tokens.parse_expn()?;
	tokens.expect_eof()?;
	Ok(expr)
}

fn kw(k: KeyWord) -> TokenValue {
	TokenValue::KeyWord(k)
}

impl TokenStream {
	fn parse_expn(&mut self) -> ParseResult {
		let start = self.peek().loc;

		if self.try_eat(&kw(KeyWord::If)) {
			let cond = self.parse_expn()?;
			self.expect(kw(KeyWord::Then))?;
			let then = self.parse_expn()?;
			self.expect(kw(KeyWord::Else))?;
			let r#else = self.parse_expn()?;
			Ok(Expr::new(start, ExprVal::If {
				cond: Rc::new(cond),
				then: Rc::new(then),
				r#else: Rc::new(r#else),
			}))
		} else if self.try_eat(&kw(KeyWord::Let)) {
			self.expect(kw(KeyWord::Val))?;
			let (name, _) = self.expect_name()?;
			self.expect(TokenValue::op("="))?;
			let def = self.parse_expn()?;
			self.expect(kw(KeyWord::In))?;
			let body = self.parse_expn()?;
			self.expect(kw(KeyWord::End))?;
			Ok(Expr::new(start, ExprVal::Let {
				name,
				def: Rc::new(def),
				body: Rc::new(body),
			}))
		} else if self.try_eat(&kw(KeyWord::Fn)) {
			let (param, _) = self.expect_name()?;
			self.expect(TokenValue::op("=>"))?;
			let body = self.parse_expn()?;
			Ok(Expr::abs(start, &param, body))
		} else {
			self.parse_disj()
		}
	}

	fn binop_at(&self, level: Level) -> Option<BinOp> {
		use self::Level::*;
		match (level, &self.peek().val) {
			(Disj, TokenValue::KeyWord(KeyWord::OrElse)) => Some(BinOp::Or),
			(Conj, TokenValue::KeyWord(KeyWord::AndAlso)) => Some(BinOp::And),
			(Cmpn, TokenValue::Op(op)) if op == "=" => Some(BinOp::Equals),
			(Cmpn, TokenValue::Op(op)) if op == "<" => Some(BinOp::Less),
			(Addn, TokenValue::Op(op)) if op == "+" => Some(BinOp::Plus),
			(Addn, TokenValue::Op(op)) if op == "-" => Some(BinOp::Minus),
			(Mult, TokenValue::Op(op)) if op == "*" => Some(BinOp::Times),
			(Mult, TokenValue::KeyWord(KeyWord::Div)) => Some(BinOp::Div),
			(Mult, TokenValue::KeyWord(KeyWord::Mod)) => Some(BinOp::Mod),
			_ => None,
		}
	}

	// One left-associative level: operand (op operand)*
	fn fold_binary(&mut self, level: Level, operand: fn(&mut Self) -> ParseResult) -> ParseResult {
		let mut left = operand(self)?;
		while let Some(op) = self.binop_at(level) {
			let op_loc = self.advance().loc;
			let right = operand(self)?;
			left = Expr::binary(op_loc, op, left, right);
		}
		Ok(left)
	}

	fn parse_disj(&mut self) -> ParseResult {
		self.fold_binary(Level::Disj, Self::parse_conj)
	}

	fn parse_conj(&mut self) -> ParseResult {
		self.fold_binary(Level::Conj, Self::parse_cmpn)
	}

	// Comparisons do not chain.
	fn parse_cmpn(&mut self) -> ParseResult {
		let left = self.parse_addn()?;
		match self.binop_at(Level::Cmpn) {
			Some(op) => {
				let op_loc = self.advance().loc;
				let right = self.parse_addn()?;
				Ok(Expr::binary(op_loc, op, left, right))
			}
			None => Ok(left),
		}
	}

	fn parse_addn(&mut self) -> ParseResult {
		self.fold_binary(Level::Addn, Self::parse_mult)
	}

	fn parse_mult(&mut self) -> ParseResult {
		self.fold_binary(Level::Mult, Self::parse_appl)
	}

	fn parse_appl(&mut self) -> ParseResult {
		let mut func = self.parse_nega()?;
		while self.next_is_op(".") {
			let loc = self.advance().loc;
			let arg = self.parse_nega()?;
			func = Expr::app(loc, func, arg);
		}
		Ok(func)
	}

	fn parse_nega(&mut self) -> ParseResult {
		if self.next_is(&kw(KeyWord::Not)) {
			let loc = self.advance().loc;
			let expr = self.parse_atom()?;
			Ok(Expr::new(loc, ExprVal::Unary {
				op: UnOp::Not,
				expr: Rc::new(expr),
			}))
		} else {
			self.parse_atom()
		}
	}

	fn parse_atom(&mut self) -> ParseResult {
		let tok = self.advance();
		match tok.val {
			TokenValue::IntLit(n) => Ok(Expr::new(tok.loc, ExprVal::Literal(Lit::Num(n)))),
			TokenValue::Name(x) => Ok(Expr::new(tok.loc, ExprVal::Var(x))),
			TokenValue::KeyWord(KeyWord::True) => Ok(Expr::new(tok.loc, ExprVal::Literal(Lit::Bool(true)))),
			TokenValue::KeyWord(KeyWord::False) => Ok(Expr::new(tok.loc, ExprVal::Literal(Lit::Bool(false)))),
			TokenValue::Punc('(') => {
				let inner = self.parse_expn()?;
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
	use crate::lex::{grammar::ML_GRAMMAR, lex};
	use crate::lex::cradle::SourceLoc;

	fn parse(src: &str) -> ParseResult {
		parse_ml(&mut lex(src, &ML_GRAMMAR)?)
	}

	fn num(n: i64) -> Expr {
		Expr::new(SourceLoc::nonexistent(), ExprVal::Literal(Lit::Num(n)))
	}

	fn var(x: &str) -> Expr {
		Expr::var(SourceLoc::nonexistent(), x)
	}

	fn bin(op: BinOp, l: Expr, r: Expr) -> Expr {
		Expr::binary(SourceLoc::nonexistent(), op, l, r)
	}

	fn app(f: Expr, a: Expr) -> Expr {
		Expr::app(SourceLoc::nonexistent(), f, a)
	}

	fn assert_parses(src: &str, expected: Expr) {
		let parsed = parse(src).unwrap();
		assert!(parsed.same_shape(&expected), "{} parsed as {}, expected {}", src, parsed, expected);
	}

	#[test]
	fn multiplication_binds_tighter() {
		assert_parses("1 + 2 * 3", bin(BinOp::Plus, num(1), bin(BinOp::Times, num(2), num(3))));
		assert_parses("1 * 2 + 3", bin(BinOp::Plus, bin(BinOp::Times, num(1), num(2)), num(3)));
	}

	#[test]
	fn binary_levels_are_left_associative() {
		assert_parses("1 - 2 - 3", bin(BinOp::Minus, bin(BinOp::Minus, num(1), num(2)), num(3)));
		assert_parses("8 div 2 mod 3", bin(BinOp::Mod, bin(BinOp::Div, num(8), num(2)), num(3)));
	}

	#[test]
	fn boolean_connectives_nest_by_level() {
		let a = bin(BinOp::Less, var("a"), num(1));
		let b = bin(BinOp::Equals, var("b"), num(2));
		assert_parses(
			"a < 1 andalso b = 2 orelse c",
			bin(BinOp::Or, bin(BinOp::And, a, b), var("c"))
		);
	}

	#[test]
	fn application_operator_folds_left() {
		assert_parses("f . x . y", app(app(var("f"), var("x")), var("y")));
		assert_parses("f . x * 2", bin(BinOp::Times, app(var("f"), var("x")), num(2)));
	}

	#[test]
	fn not_applies_to_an_atom() {
		let not_x = Expr::new(SourceLoc::nonexistent(), ExprVal::Unary {
			op: UnOp::Not,
			expr: Rc::new(var("x")),
		});
		assert_parses("not x andalso y", bin(BinOp::And, not_x, var("y")));
	}

	#[test]
	fn keyword_forms() {
		let parsed = parse("let val x = 3 in if x < 4 then fn y => y else x end").unwrap();
		assert_eq!(parsed.to_string(), "let val x = 3 in if x < 4 then fn y => y else x end");
	}

	#[test]
	fn parentheses_group() {
		assert_parses("(1 + 2) * 3", bin(BinOp::Times, bin(BinOp::Plus, num(1), num(2)), num(3)));
	}

	#[test]
	fn comparisons_do_not_chain() {
		let err = parse("1 < 2 < 3").unwrap_err();
		assert_eq!(err.kind, ErrorKind::Parse);
	}

	#[test]
	fn trailing_input_is_a_parse_error() {
		let err = parse("1 + 2 extra").unwrap_err();
		assert_eq!(err.kind, ErrorKind::Parse);
		assert_eq!(err.location().map(|l| l.start.col), Some(7));
	}

	#[test]
	fn malformed_atom_is_a_syntax_error() {
		let err = parse("1 + then").unwrap_err();
		assert_eq!(err.kind, ErrorKind::Syntax);
		assert_eq!(err.msg, "Unexpected token. Saw: 'then'.");
	}

	#[test]
	fn missing_end_is_a_syntax_error() {
		let err = parse("let val x = 1 in x").unwrap_err();
		assert_eq!(err.kind, ErrorKind::Syntax);
		assert_eq!(err.msg, "Unexpected token. Saw: 'eof'. Expected: 'end'.");
	}

	#[test]
	fn empty_input_is_located_at_its_start() {
		let err = parse("").unwrap_err();
		assert_eq!(err.kind, ErrorKind::Syntax);
		assert_eq!(err.msg, "Unexpected token. Saw: 'eof'.");
		assert_eq!(err.to_string(), "line 1 column 1: Unexpected token. Saw: 'eof'.");
	}

	#[test]
	fn let_needs_a_plain_name() {
		assert_eq!(parse("let val if = 1 in 2 end").unwrap_err().kind, ErrorKind::Syntax);
	}
}
