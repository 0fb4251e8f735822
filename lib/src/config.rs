use std::{
	fmt,
	str::FromStr,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dialect {
	Ml,
	Lambda,
}

// How the lambda dialect picks its next redex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
	// leftmost-outermost, under abstractions too
	NormalOrder,
	// leftmost-outermost, stopping at weak head normal form
	CallByName,
	// leftmost-innermost
	Applicative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub dialect: Dialect,
	pub strategy: Strategy,
	// reduction steps the lambda dialect may take
	pub step_budget: usize,
	// deepest nesting either evaluator may reach
	pub depth_limit: usize,
	pub dump_ast: bool,
	pub trace: bool,
	pub decode: bool,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			dialect: Dialect::Ml,
			strategy: Strategy::NormalOrder,
			step_budget: 10_000,
			depth_limit: 500,
			dump_ast: false,
			trace: false,
			decode: false,
		}
	}
}

impl Config {
	pub fn for_dialect(dialect: Dialect) -> Self {
		Config {
			dialect,
			..Config::default()
		}
	}
}

impl FromStr for Dialect {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"ml" | "mml" => Ok(Dialect::Ml),
			"lambda" | "lam" | "lc" => Ok(Dialect::Lambda),
			other => Err(format!("unknown dialect '{}', expected 'ml' or 'lambda'", other)),
		}
	}
}

impl fmt::Display for Dialect {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Dialect::Ml => write!(f, "ml"),
			Dialect::Lambda => write!(f, "lambda"),
		}
	}
}

impl FromStr for Strategy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().replace('_', "-").as_str() {
			"normal" | "normal-order" => Ok(Strategy::NormalOrder),
			"name" | "call-by-name" | "cbn" => Ok(Strategy::CallByName),
			"applicative" | "applicative-order" => Ok(Strategy::Applicative),
			other => Err(format!(
				"unknown strategy '{}', expected 'normal-order', 'call-by-name' or 'applicative'",
				other
			)),
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Strategy::NormalOrder => write!(f, "normal-order"),
			Strategy::CallByName => write!(f, "call-by-name"),
			Strategy::Applicative => write!(f, "applicative"),
		}
	}
}
