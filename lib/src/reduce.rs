pub mod church;
pub mod term;

use std::rc::Rc;

use crate::{
	config::{Config, Strategy},
	error::{ErrorKind, ErrorMessage},
};

use term::Term;

#[derive(Clone, Debug)]
pub struct Normalized {
	pub term: Term,
	pub steps: usize,
}

pub struct Reducer {
	strategy: Strategy,
	step_budget: usize,
	depth_limit: usize,
}

impl Reducer {
	pub fn new(config: &Config) -> Self {
		Reducer {
			strategy: config.strategy,
			step_budget: config.step_budget,
			depth_limit: config.depth_limit,
		}
	}

	pub fn normalize(&self, term: Term) -> Result<Normalized, ErrorMessage> {
		self.normalize_traced(term, |_, _| {})
	}

	/// Reduces until no redex the strategy would contract remains, calling
	/// `on_step` with each intermediate term.
	pub fn normalize_traced<F>(&self, mut term: Term, mut on_step: F) -> Result<Normalized, ErrorMessage>
	where F: FnMut(usize, &Term) {
		let mut steps = 0;
		while let Some(next) = self.step(&term) {
			steps += 1;
			if steps > self.step_budget || next.depth() > self.depth_limit {
				return Err(ErrorMessage::without_location(
					ErrorKind::RunTime,
					"reduction did not terminate within budget"
				));
			}
			on_step(steps, &next);
			term = next;
		}
		Ok(Normalized {
			term,
			steps,
		})
	}

	// One contraction, or None when `term` is already in normal form.
	pub fn step(&self, term: &Term) -> Option<Term> {
		match self.strategy {
			Strategy::NormalOrder => step_normal(term),
			Strategy::CallByName => step_by_name(term),
			Strategy::Applicative => step_applicative(term),
		}
	}
}

fn contract(func: &Term, arg: &Term) -> Option<Term> {
	match func {
		Term::Abs(x, body) => Some(body.subst(x, arg)),
		_ => None,
	}
}

fn rebuild_app(func: &Rc<Term>, arg: &Rc<Term>, new_func: Option<Term>, new_arg: Option<Term>) -> Term {
	Term::App(
		new_func.map_or_else(|| func.clone(), Rc::new),
		new_arg.map_or_else(|| arg.clone(), Rc::new)
	)
}

fn step_normal(term: &Term) -> Option<Term> {
	match term {
		Term::Var(_) => None,
		Term::Abs(x, body) => step_normal(body).map(|b| Term::Abs(x.clone(), Rc::new(b))),
		Term::App(func, arg) => contract(func, arg)
			.or_else(|| step_normal(func).map(|f| rebuild_app(func, arg, Some(f), None)))
			.or_else(|| step_normal(arg).map(|a| rebuild_app(func, arg, None, Some(a)))),
	}
}

fn step_by_name(term: &Term) -> Option<Term> {
	match term {
		Term::App(func, arg) => contract(func, arg)
			.or_else(|| step_by_name(func).map(|f| rebuild_app(func, arg, Some(f), None))),
		_ => None,
	}
}

fn step_applicative(term: &Term) -> Option<Term> {
	match term {
		Term::Var(_) => None,
		Term::Abs(x, body) => step_applicative(body).map(|b| Term::Abs(x.clone(), Rc::new(b))),
		Term::App(func, arg) => step_applicative(func)
			.map(|f| rebuild_app(func, arg, Some(f), None))
			.or_else(|| step_applicative(arg).map(|a| rebuild_app(func, arg, None, Some(a))))
			.or_else(|| contract(func, arg)),
	}
}
