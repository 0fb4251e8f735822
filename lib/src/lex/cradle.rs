use std::iter::Peekable;
use std::str::Chars;

use peeking_take_while::PeekableExt;

// Columns a tab advances by.
const TAB_WIDTH: u32 = 4;

pub struct CharsPos<'a> {
	pub pos: SourcePos,
	pub source: Peekable<Chars<'a>>,
}

impl<'a> CharsPos<'a> {
	pub fn new(source: &'a str) -> Self {
		CharsPos {
			pos: SourcePos::new(),
			source: source.chars().peekable(),
		}
	}

	pub fn peek(&mut self) -> Option<(SourcePos, char)> {
		Some((self.pos, *self.source.peek()?))
	}

	// Consumes the longest prefix satisfying `cond`.
	pub fn read_while<F>(&mut self, cond: F) -> String
	where
		F: FnMut(&char) -> bool,
	{
		let acc: String = self.source.peeking_take_while(cond).collect();
		for ch in acc.chars() {
			self.pos.advance(ch);
		}
		acc
	}
}

#[derive(Debug, Copy, Clone, PartialEq, std::cmp::Eq, Hash)]
pub struct SourceLoc {
	pub start: SourcePos,
	pub end: usize,
}

impl SourceLoc {
	pub fn new(start: SourcePos, end: usize) -> Self {
		SourceLoc {
			start,
			end,
		}
	}

	// Used for nodes created by the interpreter itself, with no
	// real location in the source code. No lexed span ends at `usize::MAX`,
	// so this never equals the `Eof` location of an empty program.
	pub fn nonexistent() -> Self {
		SourceLoc {
			start: SourcePos::new(),
			end: usize::MAX,
		}
	}

	pub fn join(&self, other: SourceLoc) -> Self {
		SourceLoc {
			start: if self.start.index > other.start.index { other.start } else { self.start },
			end: if self.end > other.end { self.end } else { other.end },
		}
	}
}

impl std::fmt::Display for SourceLoc {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.start)
	}
}

#[derive(Debug, Copy, Clone, PartialEq, std::cmp::Eq, Hash)]
pub struct SourcePos {
	pub row: u32,
	pub col: u32,
	pub index: usize,
}

impl SourcePos {
	pub fn new() -> Self {
		SourcePos {
			row: 1,
			col: 1,
			index: 0,
		}
	}

	fn advance(&mut self, ch: char) {
		self.index += ch.len_utf8();
		match ch {
			'\n' => {
				self.row += 1;
				self.col = 1;
			}
			'\t' => self.col += TAB_WIDTH,
			'\r' => {}
			_ => self.col += 1,
		}
	}
}

impl Default for SourcePos {
	fn default() -> Self {
		SourcePos::new()
	}
}

impl std::fmt::Display for SourcePos {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "line {} column {}", self.row, self.col)
	}
}

impl<'a> Iterator for CharsPos<'a> {
	type Item = (SourcePos, char);

	fn next(&mut self) -> Option<Self::Item> {
		let ch = self.source.next()?;
		let at = self.pos;
		self.pos.advance(ch);
		Some((at, ch))
	}
}
