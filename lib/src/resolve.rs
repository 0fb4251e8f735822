use std::rc::Rc;

use crate::{
	error::{ErrorKind, ErrorMessage},
	parse::ast::{Binding, Expr, ExprVal},
};

pub const MAIN: &str = "main";

/// Folds the top-level bindings into one term: every binding before `main`
/// becomes a `let` around the ones after it, and `main`'s own term sits at
/// the centre. When `main` is bound more than once the last one is the
/// program, earlier ones are ordinary bindings, and anything declared after
/// it is unreachable and dropped.
pub fn resolve_bindings(mut bindings: Vec<Binding>) -> Result<Expr, ErrorMessage> {
	let main = match bindings.iter().rposition(|b| b.name == MAIN) {
		Some(at) => {
			bindings.truncate(at + 1);
			bindings.pop()
		}
		None => None,
	};
	let main = match main {
		Some(binding) => binding.term,
		None => return Err(ErrorMessage::without_location(
			ErrorKind::RunTime,
			format!("Unresolved reference to '{}'.", MAIN)
		)),
	};

	Ok(bindings.into_iter()
		.rev()
		.fold(main, |body, binding| Expr::new(binding.loc, ExprVal::Let {
			name: binding.name,
			def: Rc::new(binding.term),
			body: Rc::new(body),
		})))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		lex::{grammar::LAMBDA_GRAMMAR, lex},
		parse::lambda::parse_lambda,
	};

	fn resolve(src: &str) -> Result<Expr, ErrorMessage> {
		resolve_bindings(parse_lambda(&mut lex(src, &LAMBDA_GRAMMAR)?)?)
	}

	#[test]
	fn nests_bindings_in_declaration_order() {
		let e = resolve("id := fn x => x; k := fn a => fn b => a; main := k id;").unwrap();
		assert_eq!(
			e.to_string(),
			"let val id = fn x => x in let val k = fn a => fn b => a in k id end end"
		);
	}

	#[test]
	fn main_alone_is_the_program() {
		let e = resolve("main := fn x => x;").unwrap();
		assert_eq!(e.to_string(), "fn x => x");
	}

	#[test]
	fn missing_main_is_a_runtime_error() {
		let err = resolve("id := fn x => x;").unwrap_err();
		assert_eq!(err.kind, ErrorKind::RunTime);
		assert_eq!(err.msg, "Unresolved reference to 'main'.");
		assert_eq!(resolve("").unwrap_err().kind, ErrorKind::RunTime);
	}

	#[test]
	fn last_main_wins_and_later_bindings_drop() {
		let e = resolve("main := a; main := main b; unused := c;").unwrap();
		assert_eq!(e.to_string(), "let val main = a in main b end");
	}

	#[test]
	fn redefinition_shadows_only_later_uses() {
		let e = resolve("x := a; y := x; x := b; main := y x;").unwrap();
		assert_eq!(
			e.to_string(),
			"let val x = a in let val y = x in let val x = b in y x end end end"
		);
	}
}
