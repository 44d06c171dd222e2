//! Shared string values for variable tiers.
//!
//! Tier slots copy each other constantly during resolution, so values are
//! reference-counted rather than cloned. The three texts that dominate a
//! real variable table (the empty string, `"0"`, and `"1"`) are interned
//! as allocation-free sentinels that carry no count and are never freed.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A shared, immutable variable value.
///
/// Cloning shares ownership; dropping the last clone releases the buffer.
/// Sentinel values never allocate.
#[derive(Clone, Default)]
pub enum Atom {
	#[default]
	Empty,
	Zero,
	One,
	Owned(Arc<str>),
}

impl Atom {
	/// Creates a value from borrowed text, interning the sentinels.
	pub fn new(text: &str) -> Self {
		match text {
			"" => Self::Empty,
			"0" => Self::Zero,
			"1" => Self::One,
			_ => Self::Owned(Arc::from(text)),
		}
	}

	/// Aliases an externally owned buffer without copying it.
	///
	/// Sentinel texts still collapse to their allocation-free variant; the
	/// caller's reference is dropped in that case.
	pub fn from_shared(buf: Arc<str>) -> Self {
		match &*buf {
			"" => Self::Empty,
			"0" => Self::Zero,
			"1" => Self::One,
			_ => Self::Owned(buf),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Empty => "",
			Self::Zero => "0",
			Self::One => "1",
			Self::Owned(s) => s,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.as_str().is_empty()
	}
}

impl Deref for Atom {
	type Target = str;

	fn deref(&self) -> &str {
		self.as_str()
	}
}

impl PartialEq for Atom {
	fn eq(&self, other: &Self) -> bool {
		self.as_str() == other.as_str()
	}
}

impl Eq for Atom {}

impl PartialEq<str> for Atom {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl PartialEq<&str> for Atom {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == *other
	}
}

impl From<&str> for Atom {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl fmt::Debug for Atom {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self.as_str(), f)
	}
}

impl fmt::Display for Atom {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sentinels_do_not_allocate() {
		assert!(matches!(Atom::new(""), Atom::Empty));
		assert!(matches!(Atom::new("0"), Atom::Zero));
		assert!(matches!(Atom::new("1"), Atom::One));
		assert!(matches!(Atom::new("2"), Atom::Owned(_)));
	}

	#[test]
	fn test_shared_buffer_collapses_to_sentinel() {
		let buf: Arc<str> = Arc::from("0");
		assert!(matches!(Atom::from_shared(buf), Atom::Zero));

		let buf: Arc<str> = Arc::from("640x480");
		let atom = Atom::from_shared(Arc::clone(&buf));
		assert_eq!(Arc::strong_count(&buf), 2);
		drop(atom);
		assert_eq!(Arc::strong_count(&buf), 1);
	}

	#[test]
	fn test_equality_is_textual() {
		// An aliased buffer holding sentinel text compares equal to the
		// sentinel itself.
		assert_eq!(Atom::Owned(Arc::from("0")), Atom::Zero);
		assert_eq!(Atom::new("1.4"), "1.4");
		assert_ne!(Atom::new("1.4"), Atom::new("1.40"));
	}

	#[test]
	fn test_clone_shares_ownership() {
		let a = Atom::new("r_gamma");
		let b = a.clone();
		let Atom::Owned(buf) = &a else {
			panic!("expected owned buffer");
		};
		assert_eq!(Arc::strong_count(buf), 2);
		drop(b);
		assert_eq!(Arc::strong_count(buf), 1);
	}
}
