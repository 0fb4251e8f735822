// Reading Church encodings back out of normal forms.

use super::term::Term;

/// `fn f => fn x => f (f (... x))`, with `n` applications of `f`.
pub fn numeral(n: u64) -> Term {
	let mut body = Term::var("x");
	for _ in 0..n {
		body = Term::app(Term::var("f"), body);
	}
	Term::abs("f", Term::abs("x", body))
}

pub fn boolean(b: bool) -> Term {
	let chosen = if b { "a" } else { "b" };
	Term::abs("a", Term::abs("b", Term::var(chosen)))
}

pub fn decode_numeral(term: &Term) -> Option<u64> {
	let (f, x, mut body) = match term {
		Term::Abs(f, inner) => match &**inner {
			Term::Abs(x, body) if x != f => (f, x, &**body),
			_ => return None,
		},
		_ => return None,
	};

	let mut n = 0;
	loop {
		match body {
			Term::Var(v) if v == x => return Some(n),
			Term::App(func, arg) if matches!(&**func, Term::Var(g) if g == f) => {
				n += 1;
				body = &**arg;
			}
			_ => return None,
		}
	}
}

pub fn decode_boolean(term: &Term) -> Option<bool> {
	match term {
		Term::Abs(a, inner) => match &**inner {
			Term::Abs(b, body) if a != b => match &**body {
				Term::Var(v) if v == a => Some(true),
				Term::Var(v) if v == b => Some(false),
				_ => None,
			},
			_ => None,
		},
		_ => None,
	}
}

// `fn f => fn x => x` is both zero and false; it reads as a numeral.
pub fn decode(term: &Term) -> Option<String> {
	decode_numeral(term)
		.map(|n| n.to_string())
		.or_else(|| decode_boolean(term).map(|b| b.to_string()))
}
