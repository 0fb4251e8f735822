use std::{
	collections::HashSet,
	fmt,
	rc::Rc,
};

use crate::{
	error::{ErrorKind, ErrorMessage},
	lang_err,
	parse::ast::{Expr, ExprVal},
};

/// A pure lambda term. Terms are immutable and share their children, so
/// substitution builds new spines and leaves every input term intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
	Var(String),
	Abs(String, Rc<Term>),
	App(Rc<Term>, Rc<Term>),
}

impl Term {
	pub fn var(name: &str) -> Self {
		Term::Var(name.to_string())
	}

	pub fn abs(param: &str, body: Term) -> Self {
		Term::Abs(param.to_string(), Rc::new(body))
	}

	pub fn app(func: Term, arg: Term) -> Self {
		Term::App(Rc::new(func), Rc::new(arg))
	}

	/// Lowers a lambda-dialect expression. `let val x = d in b end` becomes
	/// `(fn x => b) d`.
	pub fn from_expr(expr: &Expr) -> Result<Self, ErrorMessage> {
		match &expr.val {
			ExprVal::Var(x) => Ok(Term::var(x)),
			ExprVal::Abs { param, body } => Ok(Term::abs(param, Term::from_expr(body)?)),
			ExprVal::App { func, arg } => Ok(Term::app(Term::from_expr(func)?, Term::from_expr(arg)?)),
			ExprVal::Let { name, def, body } => Ok(Term::app(
				Term::abs(name, Term::from_expr(body)?),
				Term::from_expr(def)?
			)),
			_ => lang_err!(
				ErrorKind::Type,
				vec![ expr.loc ],
				"Cannot reduce {}, only variables, functions and applications.", expr.describe()
			),
		}
	}

	pub fn free_vars(&self) -> HashSet<String> {
		let mut free = HashSet::new();
		self.collect_free(&mut Vec::new(), &mut free);
		free
	}

	fn collect_free<'a>(&'a self, bound: &mut Vec<&'a str>, free: &mut HashSet<String>) {
		match self {
			Term::Var(x) => {
				if !bound.contains(&x.as_str()) {
					free.insert(x.clone());
				}
			}
			Term::Abs(x, body) => {
				bound.push(x.as_str());
				body.collect_free(bound, free);
				bound.pop();
			}
			Term::App(f, a) => {
				f.collect_free(bound, free);
				a.collect_free(bound, free);
			}
		}
	}

	pub fn occurs_free(&self, name: &str) -> bool {
		match self {
			Term::Var(x) => x == name,
			Term::Abs(x, body) => x != name && body.occurs_free(name),
			Term::App(f, a) => f.occurs_free(name) || a.occurs_free(name),
		}
	}

	/// `self[x := n]`. A binder that would capture a free variable of `n` is
	/// renamed first, by priming it until the name is unused.
	pub fn subst(&self, x: &str, n: &Term) -> Term {
		self.subst_avoiding(x, n, &n.free_vars())
	}

	fn subst_avoiding(&self, x: &str, n: &Term, n_free: &HashSet<String>) -> Term {
		match self {
			Term::Var(y) if y == x => n.clone(),
			Term::Var(_) => self.clone(),
			Term::App(f, a) => Term::App(
				Rc::new(f.subst_avoiding(x, n, n_free)),
				Rc::new(a.subst_avoiding(x, n, n_free))
			),
			Term::Abs(y, body) => {
				if y == x || !body.occurs_free(x) {
					return self.clone();
				}
				if !n_free.contains(y) {
					return Term::Abs(y.clone(), Rc::new(body.subst_avoiding(x, n, n_free)));
				}

				let mut taken = body.free_vars();
				taken.extend(n_free.iter().cloned());
				taken.insert(x.to_string());
				let fresh = fresh_name(y, &taken);

				let renamed = body.subst(y, &Term::Var(fresh.clone()));
				Term::Abs(fresh, Rc::new(renamed.subst_avoiding(x, n, n_free)))
			}
		}
	}

	/// Equality up to the names of bound variables.
	pub fn alpha_eq(&self, other: &Term) -> bool {
		alpha_eq_under(self, other, &mut Vec::new())
	}

	pub fn depth(&self) -> usize {
		match self {
			Term::Var(_) => 1,
			Term::Abs(_, body) => 1 + body.depth(),
			Term::App(f, a) => 1 + f.depth().max(a.depth()),
		}
	}
}

fn fresh_name(base: &str, taken: &HashSet<String>) -> String {
	let mut name = format!("{}'", base);
	while taken.contains(&name) {
		name.push('\'');
	}
	name
}

// `binders` pairs up the abstractions entered on each side, innermost last.
fn alpha_eq_under<'a>(a: &'a Term, b: &'a Term, binders: &mut Vec<(&'a str, &'a str)>) -> bool {
	match (a, b) {
		(Term::Var(x), Term::Var(y)) => {
			for (l, r) in binders.iter().rev() {
				if *l == x.as_str() || *r == y.as_str() {
					return *l == x.as_str() && *r == y.as_str();
				}
			}
			x == y
		}
		(Term::Abs(x, body_a), Term::Abs(y, body_b)) => {
			binders.push((x.as_str(), y.as_str()));
			let inner_equals = alpha_eq_under(body_a, body_b, binders);
			binders.pop();
			inner_equals
		}
		(Term::App(f1, a1), Term::App(f2, a2)) =>
			alpha_eq_under(f1, f2, binders) && alpha_eq_under(a1, a2, binders),
		_ => false,
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Term::Var(x) => write!(f, "{}", x),
			Term::Abs(x, body) => write!(f, "fn {} => {}", x, body),
			Term::App(func, arg) => {
				match **func {
					Term::Abs(..) => write!(f, "({})", func)?,
					_ => write!(f, "{}", func)?,
				}
				match **arg {
					Term::Var(_) => write!(f, " {}", arg),
					_ => write!(f, " ({})", arg),
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lex::cradle::SourceLoc;

	fn v(x: &str) -> Term {
		Term::var(x)
	}

	#[test]
	fn substitution_renames_capturing_binders() {
		// (fn y => x)[x := y]
		let t = Term::abs("y", v("x")).subst("x", &v("y"));
		assert!(t.alpha_eq(&Term::abs("z", v("y"))));
		assert_eq!(t, Term::abs("y'", v("y")));
	}

	#[test]
	fn fresh_names_skip_taken_ones() {
		// (fn y => x y')[x := y]
		let t = Term::abs("y", Term::app(v("x"), v("y'"))).subst("x", &v("y"));
		assert_eq!(t.to_string(), "fn y'' => y y'");
	}

	#[test]
	fn substitution_stops_at_shadowing_binders() {
		let t = Term::abs("x", v("x"));
		assert_eq!(t.subst("x", &v("z")), t);

		let t = Term::app(v("x"), Term::abs("x", v("x"))).subst("x", &v("z"));
		assert_eq!(t.to_string(), "z (fn x => x)");
	}

	#[test]
	fn substitution_leaves_the_input_alone() {
		let t = Term::app(v("x"), v("x"));
		let n = Term::abs("a", v("a"));
		let out = t.subst("x", &n);
		assert_eq!(t.to_string(), "x x");
		assert_eq!(out.to_string(), "(fn a => a) (fn a => a)");
	}

	#[test]
	fn free_variables_exclude_bound_ones() {
		let t = Term::app(Term::abs("x", Term::app(v("x"), v("y"))), v("x"));
		let mut free = t.free_vars().into_iter().collect::<Vec<_>>();
		free.sort();
		assert_eq!(free, vec!["x".to_string(), "y".to_string()]);
		assert!(!Term::abs("y", v("y")).occurs_free("y"));
	}

	#[test]
	fn alpha_equivalence() {
		let k1 = Term::abs("a", Term::abs("b", v("a")));
		let k2 = Term::abs("x", Term::abs("y", v("x")));
		let f = Term::abs("x", Term::abs("y", v("y")));
		assert!(k1.alpha_eq(&k2));
		assert!(!k1.alpha_eq(&f));
		// free variables must match by name
		assert!(!Term::abs("x", v("y")).alpha_eq(&Term::abs("x", v("z"))));
		// an inner binder hides an outer one of the same name
		assert!(Term::abs("x", Term::abs("x", v("x"))).alpha_eq(&Term::abs("a", Term::abs("b", v("b")))));
		assert!(!Term::abs("x", Term::abs("x", v("x"))).alpha_eq(&Term::abs("a", Term::abs("b", v("a")))));
	}

	#[test]
	fn let_lowers_to_a_redex() {
		let loc = SourceLoc::nonexistent();
		let e = Expr::new(loc, ExprVal::Let {
			name: "id".to_string(),
			def: Rc::new(Expr::abs(loc, "x", Expr::var(loc, "x"))),
			body: Rc::new(Expr::var(loc, "id")),
		});
		assert_eq!(Term::from_expr(&e).unwrap().to_string(), "(fn id => id) (fn x => x)");
	}

	#[test]
	fn ml_only_forms_do_not_lower() {
		let loc = SourceLoc::nonexistent();
		let e = Expr::new(loc, ExprVal::Literal(crate::parse::ast::Lit::Num(3)));
		assert_eq!(Term::from_expr(&e).unwrap_err().kind, ErrorKind::Type);
	}

	#[test]
	fn depth_counts_the_longest_path() {
		let t = Term::abs("f", Term::abs("x", Term::app(v("f"), Term::app(v("f"), v("x")))));
		assert_eq!(t.depth(), 5);
	}
}
