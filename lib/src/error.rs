use std::fmt;

use crate::lex::cradle::SourceLoc;

#[macro_export]
macro_rules! lang_err {
	($kind:expr, $origins:expr, $($fmt:tt)*) => {
		Err($crate::error::ErrorMessage {
			kind: $kind,
			msg: format!($($fmt)*),
			origins: $origins,
		})
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	// malformed character stream
	Lex,
	// tokens did not match the production being parsed
	Syntax,
	// the whole program parsed but tokens remained
	Parse,
	RunTime,
	// an operator or application met a value of the wrong kind
	Type,
}

impl ErrorKind {
	pub fn headline(&self) -> &'static str {
		match self {
			ErrorKind::Lex => "Bad token reached.",
			ErrorKind::Syntax => "Syntax error during parse.",
			ErrorKind::Parse => "Failed to consume all the input in the parse.",
			ErrorKind::RunTime => "Error during evaluation.",
			ErrorKind::Type => "Type error during evaluation.",
		}
	}
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ErrorMessage {
	pub kind: ErrorKind,
	pub msg: String,
	pub origins: Vec<SourceLoc>,
}

impl ErrorMessage {
	pub fn new<S: Into<String>>(kind: ErrorKind, loc: SourceLoc, msg: S) -> Self {
		ErrorMessage {
			kind,
			msg: msg.into(),
			origins: vec![ loc ],
		}
	}

	pub fn without_location<S: Into<String>>(kind: ErrorKind, msg: S) -> Self {
		ErrorMessage {
			kind,
			msg: msg.into(),
			origins: Vec::new(),
		}
	}

	pub fn location(&self) -> Option<SourceLoc> {
		self.origins.iter()
			.copied()
			.find(|loc| *loc != SourceLoc::nonexistent())
	}
}

impl fmt::Display for ErrorMessage {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.location() {
			Some(loc) => write!(f, "{}: {}", loc, self.msg),
			None => write!(f, "{}", self.msg),
		}
	}
}

impl std::error::Error for ErrorMessage {}

pub fn print_error<F>(source_name: &str, source: &str, err: &ErrorMessage, errfn: F)
where F: Fn(String) {
	let origins = err.origins.iter()
		.copied()
		.filter(|loc| *loc != SourceLoc::nonexistent())
		.collect::<Vec<_>>();

	if origins.is_empty() {
		errfn(format!("{}\n{}: {}", err.kind.headline(), source_name, err.msg));
		return;
	}

	let origins_str = origins.iter()
		.map(|loc| format!("{} {}", source_name, loc))
		.collect::<Vec<_>>()
		.join(", ");
	let context = origins.iter()
		.map(|loc| get_context(source, *loc))
		.collect::<Vec<_>>()
		.join("\n");
	errfn(format!("{}\n{}: {}\n{}", err.kind.headline(), origins_str, err.msg, context))
}

// The source line holding `err_loc`, with the located text underlined.
fn get_context(source: &str, err_loc: SourceLoc) -> String {
	let start = err_loc.start.index.min(source.len());
	let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
	let line_end = source[start..].find('\n').map_or(source.len(), |i| start + i);
	let line = &source[line_start..line_end];

	let padding = source[line_start..start].chars()
		.map(|c| if c == '\t' { '\t' } else { ' ' })
		.collect::<String>();
	let end = err_loc.end.clamp(start, line_end);
	let width = source[start..end].chars().count().max(1);

	format!("{}\n{}{}", line, padding, "~".repeat(width))
}
