use std::fmt;

use crate::{
	config::{Config, Dialect},
	error::{print_error, ErrorMessage},
	eval::Value,
	lex::{grammar::Grammar, lex},
	parse::{ast::Expr, lambda::parse_lambda, ml::parse_ml},
	reduce::{church, term::Term, Reducer},
	resolve::resolve_bindings,
};
use wasm_bindgen::prelude::*;

extern crate lazy_static;
extern crate maplit;
extern crate peeking_take_while;
extern crate wasm_bindgen;
extern crate console_error_panic_hook;

pub mod config;
pub mod error;
pub mod eval;
pub mod lex;
pub mod parse;
pub mod reduce;
pub mod resolve;

/// The result of running one program.
#[derive(Clone, Debug)]
pub enum Outcome {
	Value(Value),
	Normal {
		term: Term,
		steps: usize,
		// the Church reading of `term`, when decoding was asked for
		reading: Option<String>,
	},
}

impl fmt::Display for Outcome {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Outcome::Value(v) => write!(f, "{}", v.show_tagged()),
			Outcome::Normal { term, reading: Some(reading), .. } => write!(f, "{} = {}", term, reading),
			Outcome::Normal { term, reading: None, .. } => write!(f, "{}", term),
		}
	}
}

#[wasm_bindgen]
pub fn web_run(src: String, dialect: String, err_fn: &js_sys::Function) -> String {
	console_error_panic_hook::set_once();
	let report = |s: String|
		match err_fn.call1(&JsValue::null(), &JsValue::from(s)) {
			Ok(_) => {},
			Err(e) => panic!("{:?}", e),
		};

	match dialect.parse::<Dialect>() {
		Ok(dialect) => run(&src, "input", &Config::for_dialect(dialect), report).unwrap_or_default(),
		Err(e) => {
			report(e);
			String::new()
		}
	}
}

/// Runs `src` and renders its outcome, or reports the failure through
/// `err_fn` and returns None.
pub fn run<F>(src: &str, source_name: &str, config: &Config, err_fn: F) -> Option<String>
where F: Fn(String) {
	match interpret(src, config, &err_fn) {
		Ok(outcome) => Some(outcome.to_string()),
		Err(e) => {
			print_error(source_name, src, &e, &err_fn);
			None
		}
	}
}

/// Lexes, parses and evaluates one program in the configured dialect.
/// Parse dumps and reduction traces go to `log`.
pub fn interpret<F>(src: &str, config: &Config, log: F) -> Result<Outcome, ErrorMessage>
where F: Fn(String) {
	let mut tokens = lex(src, Grammar::for_dialect(config.dialect))?;

	match config.dialect {
		Dialect::Ml => {
			let ast = parse_ml(&mut tokens)?;
			if config.dump_ast {
				dump_ast(&ast, &log);
			}
			Ok(Outcome::Value(eval::eval(&ast, config)?))
		}
		Dialect::Lambda => {
			let bindings = parse_lambda(&mut tokens)?;
			let program = resolve_bindings(bindings)?;
			if config.dump_ast {
				dump_ast(&program, &log);
			}

			let reducer = Reducer::new(config);
			let term = Term::from_expr(&program)?;
			let normal = if config.trace {
				reducer.normalize_traced(term, |step, t| log(format!("{:>5}: {}", step, t)))?
			} else {
				reducer.normalize(term)?
			};

			let reading = if config.decode {
				church::decode(&normal.term)
			} else {
				None
			};
			Ok(Outcome::Normal {
				term: normal.term,
				steps: normal.steps,
				reading,
			})
		}
	}
}

fn dump_ast<F>(ast: &Expr, log: F)
where F: Fn(String) {
	log(format!(
		"==debug mode============\nBELOW IS THE PARSE TREE:\n{}\n========================",
		ast
	));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;
	use std::cell::RefCell;

	#[test]
	fn run_reports_errors_through_the_sink() {
		let printed = RefCell::new(Vec::new());
		let out = run("1 +", "bad.mml", &Config::default(), |s| printed.borrow_mut().push(s));
		assert_eq!(out, None);

		let printed = printed.into_inner();
		assert_eq!(printed.len(), 1);
		assert!(printed[0].starts_with("Syntax error during parse.\nbad.mml line 1 column 4: "), "{}", printed[0]);
	}

	#[test]
	fn dump_and_trace_go_to_the_log() {
		let logged = RefCell::new(Vec::new());
		let config = Config {
			dialect: Dialect::Lambda,
			dump_ast: true,
			trace: true,
			..Config::default()
		};
		let out = interpret("id := fn x => x; main := id id;", &config, |s| logged.borrow_mut().push(s)).unwrap();
		assert_eq!(out.to_string(), "fn x => x");

		let logged = logged.into_inner();
		assert_eq!(
			logged[0],
			"==debug mode============\n\
			BELOW IS THE PARSE TREE:\n\
			let val id = fn x => x in id id end\n\
			========================"
		);
		assert_eq!(logged[1..], ["    1: (fn x => x) (fn x => x)", "    2: fn x => x"]);
	}

	#[test]
	fn decoding_is_opt_in() {
		let src = "two := fn f => fn x => f (f x); main := two;";
		let plain = interpret(src, &Config::for_dialect(Dialect::Lambda), |_| {}).unwrap();
		assert_eq!(plain.to_string(), "fn f => fn x => f (f x)");

		let config = Config {
			decode: true,
			..Config::for_dialect(Dialect::Lambda)
		};
		let decoded = interpret(src, &config, |_| {}).unwrap();
		assert_eq!(decoded.to_string(), "fn f => fn x => f (f x) = 2");
	}

	#[test]
	fn ml_outcomes_render_tagged() {
		let out = interpret("let val x = 3 in x + 4 end", &Config::default(), |_| {}).unwrap();
		assert_eq!(out.to_string(), "val it = 7 : int");
	}

	#[test]
	fn dialects_do_not_share_syntax() {
		let err = interpret("main := fn x => x;", &Config::default(), |_| {}).unwrap_err();
		assert_eq!(err.kind, ErrorKind::Parse);
	}
}
