pub mod env;

use std::{
	fmt,
	rc::Rc,
};

use crate::{
	config::Config,
	error::{ErrorKind, ErrorMessage},
	lang_err,
	lex::cradle::SourceLoc,
	parse::ast::{BinOp, Expr, ExprVal, Lit, UnOp},
};

use env::{Env, Scope};

pub type Context = Scope<String, Value>;

#[derive(Clone, Debug)]
pub enum Value {
	Num(i64),
	Bool(bool),
	Closure(Rc<Closure>),
}

#[derive(Debug)]
pub struct Closure {
	pub param: String,
	pub body: Rc<Expr>,
	pub env: Context,
}

impl Value {
	// Used in error messages like "expected integer operands, found _"
	pub fn describe(&self) -> &'static str {
		match self {
			Value::Num(_) => "an integer",
			Value::Bool(_) => "a boolean",
			Value::Closure(_) => "a function",
		}
	}

	pub fn type_tag(&self) -> &'static str {
		match self {
			Value::Num(_) => "int",
			Value::Bool(_) => "bool",
			Value::Closure(_) => "fn",
		}
	}

	// The REPL's report of a result, `val it = 7 : int`
	pub fn show_tagged(&self) -> String {
		format!("val it = {} : {}", self, self.type_tag())
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Value::Num(n) => write!(f, "{}", n),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Closure(_) => write!(f, "fn"),
		}
	}
}

pub fn eval(expr: &Expr, config: &Config) -> Result<Value, ErrorMessage> {
	Evaluator::new(config.depth_limit).eval(&Context::empty(), expr)
}

pub struct Evaluator {
	depth_limit: usize,
	depth: usize,
}

impl Evaluator {
	pub fn new(depth_limit: usize) -> Self {
		Evaluator {
			depth_limit,
			depth: 0,
		}
	}

	/// Every nested `eval` counts against the depth limit, so deep programs
	/// fail with a `RunTime` error while the host stack still has room.
	pub fn eval(&mut self, env: &Context, expr: &Expr) -> Result<Value, ErrorMessage> {
		if self.depth >= self.depth_limit {
			return lang_err!(
				ErrorKind::RunTime,
				vec![ expr.loc ],
				"evaluation exceeded the recursion depth limit"
			);
		}
		self.depth += 1;
		let result = self.eval_nested(env, expr);
		self.depth -= 1;
		result
	}

	fn eval_nested(&mut self, env: &Context, expr: &Expr) -> Result<Value, ErrorMessage> {
		use ExprVal::*;
		match &expr.val {
			Literal(Lit::Num(n)) => Ok(Value::Num(*n)),
			Literal(Lit::Bool(b)) => Ok(Value::Bool(*b)),

			Var(x) => match env.find(x) {
				Some(v) => Ok(v.clone()),
				None => lang_err!(
					ErrorKind::RunTime,
					vec![ expr.loc ],
					"Use of variable '{}'.", x
				),
			},

			Abs { param, body } => Ok(Value::Closure(Rc::new(Closure {
				param: param.clone(),
				body: body.clone(),
				env: env.clone(),
			}))),

			App { func, arg } => {
				let closure = match self.eval(env, func)? {
					Value::Closure(c) => c,
					other => return lang_err!(
						ErrorKind::Type,
						vec![ func.loc ],
						"Application of a non-function, found {}.", other.describe()
					),
				};
				let arg = self.eval(env, arg)?;
				self.eval(&closure.env.extend(closure.param.clone(), arg), &closure.body)
			}

			Let { name, def, body } => {
				let def = self.eval(env, def)?;
				self.eval(&env.extend(name.clone(), def), body)
			}

			If { cond, then, r#else } => {
				if self.eval_bool(env, cond, "if")? {
					self.eval(env, then)
				} else {
					self.eval(env, r#else)
				}
			}

			Unary { op: UnOp::Not, expr: operand } => {
				Ok(Value::Bool(!self.eval_bool(env, operand, "not")?))
			}

			Binary { op: BinOp::And, left, right } => {
				Ok(Value::Bool(
					self.eval_bool(env, left, "andalso")? && self.eval_bool(env, right, "andalso")?
				))
			}

			Binary { op: BinOp::Or, left, right } => {
				Ok(Value::Bool(
					self.eval_bool(env, left, "orelse")? || self.eval_bool(env, right, "orelse")?
				))
			}

			Binary { op, left, right } => {
				let l = self.eval(env, left)?;
				let r = self.eval(env, right)?;
				binary(*op, l, r, expr.loc)
			}
		}
	}

	fn eval_bool(&mut self, env: &Context, expr: &Expr, op: &str) -> Result<bool, ErrorMessage> {
		match self.eval(env, expr)? {
			Value::Bool(b) => Ok(b),
			other => lang_err!(
				ErrorKind::Type,
				vec![ expr.loc ],
				"Operator '{}' expects a boolean, found {}.", op, other.describe()
			),
		}
	}
}

fn binary(op: BinOp, left: Value, right: Value, loc: SourceLoc) -> Result<Value, ErrorMessage> {
	let (a, b) = match (op, &left, &right) {
		(BinOp::Equals, Value::Bool(a), Value::Bool(b)) => return Ok(Value::Bool(a == b)),
		(_, Value::Num(a), Value::Num(b)) => (*a, *b),
		(BinOp::Equals, _, _) => return lang_err!(
			ErrorKind::Type,
			vec![ loc ],
			"Operator '=' expects two integers or two booleans, found {} and {}.",
			left.describe(), right.describe()
		),
		_ => {
			let culprit = if let Value::Num(_) = left { &right } else { &left };
			return lang_err!(
				ErrorKind::Type,
				vec![ loc ],
				"Operator '{}' expects integer operands, found {}.", op.symbol(), culprit.describe()
			);
		}
	};

	let checked = |n: Option<i64>| match n {
		Some(n) => Ok(Value::Num(n)),
		None => lang_err!(
			ErrorKind::RunTime,
			vec![ loc ],
			"Integer overflow in '{}'.", op.symbol()
		),
	};

	match op {
		BinOp::Plus => checked(a.checked_add(b)),
		BinOp::Minus => checked(a.checked_sub(b)),
		BinOp::Times => checked(a.checked_mul(b)),
		BinOp::Div | BinOp::Mod if b == 0 => lang_err!(
			ErrorKind::RunTime,
			vec![ loc ],
			"Division by zero."
		),
		BinOp::Div => checked(floor_div(a, b)),
		BinOp::Mod => Ok(Value::Num(floor_mod(a, b))),
		BinOp::Less => Ok(Value::Bool(a < b)),
		BinOp::Equals => Ok(Value::Bool(a == b)),
		BinOp::And | BinOp::Or => lang_err!(
			ErrorKind::Type,
			vec![ loc ],
			"Operator '{}' expects a boolean, found an integer.", op.symbol()
		),
	}
}

// Quotient rounded toward negative infinity. `b` is nonzero.
fn floor_div(a: i64, b: i64) -> Option<i64> {
	let q = a.checked_div(b)?;
	if a % b != 0 && (a < 0) != (b < 0) {
		Some(q - 1)
	} else {
		Some(q)
	}
}

// Remainder with the sign of the divisor. `b` is nonzero.
fn floor_mod(a: i64, b: i64) -> i64 {
	let r = a.wrapping_rem(b);
	if r != 0 && (r < 0) != (b < 0) {
		r + b
	} else {
		r
	}
}
