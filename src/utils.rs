use std::fmt;

pub fn is_graphic_char(c: char) -> bool {
	c.is_ascii_graphic() || !c.is_control()
}

/// Escapes a symbol so it can be used inside a double-quoted DOT label.
pub struct Sanitized<T>(pub T);

impl<'a> fmt::Display for Sanitized<&'a str> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in self.0.chars() {
			fmt_char_sanitized(c, f)?;
		}

		Ok(())
	}
}

pub fn fmt_char_sanitized(c: char, f: &mut fmt::Formatter) -> fmt::Result {
	use fmt::Display;

	match c {
		'"' => "\\\"".fmt(f),
		'\\' => "\\\\".fmt(f),
		'\u{00}' => "\\\\0".fmt(f),
		'\t' => "\\\\t".fmt(f),
		'\n' => "\\\\n".fmt(f),
		'\r' => "\\\\r".fmt(f),
		c if is_graphic_char(c) => c.fmt(f),
		c => write!(f, "\\\\x{{{:02x}}}", c as u32),
	}
}
