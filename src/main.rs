use std::{
	fs,
	io,
	process,
	thread,
};

use clap::Parser;
use lazy_static::lazy_static;
use regex::Regex;

use minilamlib::{
	config::{Config, Dialect, Strategy},
	run,
};

lazy_static! {
	static ref LAMBDA_SOURCE: Regex = Regex::new(r"\.(lam|lc)$").unwrap();
}

// Room for `--depth` well past the default.
const STACK_SIZE: usize = 256 * 1024 * 1024;

// `.lam` and `.lc` files hold lambda programs, everything else is ML.
fn dialect_of(source_name: &str) -> Dialect {
	if LAMBDA_SOURCE.is_match(source_name) {
		Dialect::Lambda
	} else {
		Dialect::Ml
	}
}

/// Interpreter for a small ML and a pure lambda calculus
#[derive(Parser, Debug)]
#[clap(name = "minilam", version)]
struct Args {
	/// Source files, run in order. With none, one line is read from stdin
	#[clap(value_name = "FILE")]
	files: Vec<String>,

	/// `ml` or `lambda`; by default `.lam` and `.lc` files are lambda, all else ML
	#[clap(short, long)]
	dialect: Option<Dialect>,

	/// Reduction strategy for the lambda dialect
	#[clap(short, long, default_value = "normal-order")]
	strategy: Strategy,

	/// Reduction steps allowed before giving up
	#[clap(long, default_value_t = 10_000)]
	steps: usize,

	/// Deepest nesting of applications or terms allowed
	#[clap(long, default_value_t = 500)]
	depth: usize,

	/// Print the parse tree before evaluating
	#[clap(long)]
	dump_ast: bool,

	/// Print every reduction step
	#[clap(long)]
	trace: bool,

	/// Read normal forms back as Church numerals or booleans
	#[clap(long)]
	decode: bool,
}

impl Args {
	fn config_for(&self, source_name: &str) -> Config {
		Config {
			dialect: self.dialect.unwrap_or_else(|| dialect_of(source_name)),
			strategy: self.strategy,
			step_budget: self.steps,
			depth_limit: self.depth,
			dump_ast: self.dump_ast,
			trace: self.trace,
			decode: self.decode,
		}
	}
}

fn report(msg: String) {
	eprintln!("{}", msg);
}

fn bail() -> ! {
	eprintln!("Bailing command-line loading.");
	process::exit(1)
}

fn main() {
	let args = Args::parse();
	let driver = thread::Builder::new()
		.stack_size(STACK_SIZE)
		.spawn(move || drive(&args));
	match driver.map(|handle| handle.join()) {
		Ok(Ok(())) => {}
		_ => {
			eprintln!("the interpreter thread failed");
			process::exit(1);
		}
	}
}

fn drive(args: &Args) {
	if args.files.is_empty() {
		println!("Enter an expression:");
		let mut line = String::new();
		if let Err(e) = io::stdin().read_line(&mut line) {
			eprintln!("could not read stdin: {}", e);
			process::exit(1);
		}
		match run(&line, "STDIN", &args.config_for("STDIN"), report) {
			Some(out) => println!("{}", out),
			None => process::exit(1),
		}
		return;
	}

	for file in &args.files {
		println!("[opening {}]", file);
		let src = match fs::read_to_string(file) {
			Ok(src) => src,
			Err(e) => {
				eprintln!("could not open {}: {}", file, e);
				bail();
			}
		};
		match run(&src, file, &args.config_for(file), report) {
			Some(out) => println!("{}", out),
			None => bail(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dialect_follows_the_file_extension() {
		assert_eq!(dialect_of("church.lam"), Dialect::Lambda);
		assert_eq!(dialect_of("dir/y.lc"), Dialect::Lambda);
		assert_eq!(dialect_of("fact.mml"), Dialect::Ml);
		assert_eq!(dialect_of("notes.lam.txt"), Dialect::Ml);
		assert_eq!(dialect_of("STDIN"), Dialect::Ml);
	}

	#[test]
	fn explicit_dialect_wins() {
		let args = Args::parse_from(["minilam", "-d", "ml", "church.lam"]);
		assert_eq!(args.config_for("church.lam").dialect, Dialect::Ml);

		let args = Args::parse_from(["minilam", "church.lam"]);
		let config = args.config_for("church.lam");
		assert_eq!(config.dialect, Dialect::Lambda);
		assert_eq!(config.depth_limit, Config::default().depth_limit);
	}
}
