use std::{
	fmt,
	rc::Rc,
};

use crate::lex::cradle::SourceLoc;

// Children are reference counted: evaluation shares function bodies
// between closures and never mutates a node once it is built.
#[derive(Clone, Debug)]
pub struct Expr {
	pub val: ExprVal,
	pub loc: SourceLoc,
}

#[derive(Clone, Debug)]
pub enum ExprVal {
	Var(String),
	Abs {
		param: String,
		body: Rc<Expr>,
	},
	App {
		func: Rc<Expr>,
		arg: Rc<Expr>,
	},
	Let {
		name: String,
		def: Rc<Expr>,
		body: Rc<Expr>,
	},
	If {
		cond: Rc<Expr>,
		then: Rc<Expr>,
		r#else: Rc<Expr>,
	},
	Binary {
		op: BinOp,
		left: Rc<Expr>,
		right: Rc<Expr>,
	},
	Unary {
		op: UnOp,
		expr: Rc<Expr>,
	},
	Literal(Lit),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lit {
	Num(i64),
	Bool(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
	Plus,
	Minus,
	Times,
	Div,
	Mod,
	Equals,
	Less,
	And,
	Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnOp {
	Not,
}

// A top-level `name := term;` of the lambda dialect.
#[derive(Clone, Debug)]
pub struct Binding {
	pub name: String,
	pub term: Expr,
	pub loc: SourceLoc,
}

impl BinOp {
	pub fn symbol(&self) -> &'static str {
		use self::BinOp::*;
		match self {
			Plus => "+",
			Minus => "-",
			Times => "*",
			Div => "div",
			Mod => "mod",
			Equals => "=",
			Less => "<",
			And => "andalso",
			Or => "orelse",
		}
	}

	// Binding strength, used only to print with the fewest parentheses.
	fn precedence(&self) -> u8 {
		use self::BinOp::*;
		match self {
			Or => 1,
			And => 2,
			Equals | Less => 3,
			Plus | Minus => 4,
			Times | Div | Mod => 5,
		}
	}
}

impl Expr {
	pub fn new(loc: SourceLoc, val: ExprVal) -> Self {
		Expr {
			val,
			loc,
		}
	}

	pub fn var(loc: SourceLoc, name: &str) -> Self {
		Expr::new(loc, ExprVal::Var(name.to_string()))
	}

	pub fn abs(loc: SourceLoc, param: &str, body: Expr) -> Self {
		Expr::new(loc, ExprVal::Abs {
			param: param.to_string(),
			body: Rc::new(body),
		})
	}

	pub fn app(loc: SourceLoc, func: Expr, arg: Expr) -> Self {
		Expr::new(loc, ExprVal::App {
			func: Rc::new(func),
			arg: Rc::new(arg),
		})
	}

	pub fn binary(loc: SourceLoc, op: BinOp, left: Expr, right: Expr) -> Self {
		Expr::new(loc, ExprVal::Binary {
			op,
			left: Rc::new(left),
			right: Rc::new(right),
		})
	}

	// Used in error messages like "expected a function, found _"
	pub fn describe(&self) -> &str {
		use self::ExprVal::*;
		match &self.val {
			Var(_) => "a variable",
			Abs { .. } => "a function",
			App { .. } => "an application",
			Let { .. } => "a declaration",
			If { .. } => "an if-expression",
			Binary { .. } => "a binary expression",
			Unary { .. } => "a unary expression",
			Literal(Lit::Num(_)) => "an integer literal",
			Literal(Lit::Bool(_)) => "a boolean literal",
		}
	}

	// Structural equality that ignores locations.
	pub fn same_shape(&self, other: &Expr) -> bool {
		use self::ExprVal::*;
		match (&self.val, &other.val) {
			(Var(a), Var(b)) => a == b,
			(Literal(a), Literal(b)) => a == b,
			(Abs { param: p1, body: b1 }, Abs { param: p2, body: b2 }) =>
				p1 == p2 && b1.same_shape(b2),
			(App { func: f1, arg: a1 }, App { func: f2, arg: a2 }) =>
				f1.same_shape(f2) && a1.same_shape(a2),
			(Let { name: n1, def: d1, body: b1 }, Let { name: n2, def: d2, body: b2 }) =>
				n1 == n2 && d1.same_shape(d2) && b1.same_shape(b2),
			(If { cond: c1, then: t1, r#else: e1 }, If { cond: c2, then: t2, r#else: e2 }) =>
				c1.same_shape(c2) && t1.same_shape(t2) && e1.same_shape(e2),
			(Binary { op: o1, left: l1, right: r1 }, Binary { op: o2, left: l2, right: r2 }) =>
				o1 == o2 && l1.same_shape(l2) && r1.same_shape(r2),
			(Unary { op: o1, expr: e1 }, Unary { op: o2, expr: e2 }) =>
				o1 == o2 && e1.same_shape(e2),
			_ => false,
		}
	}

	fn is_atomic(&self) -> bool {
		matches!(self.val, ExprVal::Var(_) | ExprVal::Literal(_))
	}

	// Keyword-led forms extend as far right as possible.
	fn is_open(&self) -> bool {
		matches!(self.val, ExprVal::Abs { .. } | ExprVal::Let { .. } | ExprVal::If { .. })
	}
}

fn fmt_operand(f: &mut fmt::Formatter, e: &Expr, parent: u8, right: bool) -> fmt::Result {
	let needs_parens = match &e.val {
		ExprVal::Binary { op, .. } =>
			op.precedence() < parent || (right && op.precedence() == parent),
		_ => e.is_open(),
	};
	if needs_parens {
		write!(f, "({})", e)
	} else {
		write!(f, "{}", e)
	}
}

// Prints with the fewest parentheses that keep the tree unambiguous.
// Application is always shown as juxtaposition.
impl fmt::Display for Expr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::ExprVal::*;
		match &self.val {
			Var(x) => write!(f, "{}", x),
			Literal(Lit::Num(n)) => write!(f, "{}", n),
			Literal(Lit::Bool(b)) => write!(f, "{}", b),
			Abs { param, body } => write!(f, "fn {} => {}", param, body),
			Let { name, def, body } => write!(f, "let val {} = {} in {} end", name, def, body),
			If { cond, then, r#else } => write!(f, "if {} then {} else {}", cond, then, r#else),
			App { func, arg } => {
				if func.is_atomic() || matches!(func.val, App { .. }) {
					write!(f, "{}", func)?;
				} else {
					write!(f, "({})", func)?;
				}
				if arg.is_atomic() {
					write!(f, " {}", arg)
				} else {
					write!(f, " ({})", arg)
				}
			}
			Binary { op, left, right } => {
				fmt_operand(f, left, op.precedence(), false)?;
				write!(f, " {} ", op.symbol())?;
				fmt_operand(f, right, op.precedence(), true)
			}
			Unary { op: UnOp::Not, expr } => {
				if expr.is_atomic() {
					write!(f, "not {}", expr)
				} else {
					write!(f, "not ({})", expr)
				}
			}
		}
	}
}

impl fmt::Display for Binding {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} := {};", self.name, self.term)
	}
}
