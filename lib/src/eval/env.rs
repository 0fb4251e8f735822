use std::rc::Rc;

pub trait Env<K, V>
where K: Eq
{
	fn find(&self, key: &K) -> Option<&V>;
	fn extend(&self, key: K, val: V) -> Self;
}

// A persistent scope: extending makes a new frame on top and leaves the
// old scope untouched, so closures can share whatever they captured.
#[derive(Debug)]
pub struct Scope<K, V> {
	top: Option<Rc<Frame<K, V>>>,
}

#[derive(Debug)]
struct Frame<K, V> {
	key: K,
	val: V,
	parent: Scope<K, V>,
}

impl<K, V> Scope<K, V> {
	pub fn empty() -> Self {
		Scope {
			top: None,
		}
	}
}

impl<K, V> Clone for Scope<K, V> {
	fn clone(&self) -> Self {
		Scope {
			top: self.top.clone(),
		}
	}
}

impl<K, V> Default for Scope<K, V> {
	fn default() -> Self {
		Scope::empty()
	}
}

impl<K, V> Env<K, V> for Scope<K, V>
where K: Eq
{
	// innermost binding first
	fn find(&self, key: &K) -> Option<&V> {
		let mut scope = self;
		while let Some(frame) = &scope.top {
			if frame.key == *key {
				return Some(&frame.val);
			}
			scope = &frame.parent;
		}
		None
	}

	fn extend(&self, key: K, val: V) -> Self {
		Scope {
			top: Some(Rc::new(Frame {
				key,
				val,
				parent: self.clone(),
			})),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn inner_bindings_shadow_outer_ones() {
		let outer: Scope<String, i64> = Scope::empty().extend("x".to_string(), 1);
		let inner = outer.extend("x".to_string(), 2).extend("y".to_string(), 3);

		assert_eq!(inner.find(&"x".to_string()), Some(&2));
		assert_eq!(inner.find(&"y".to_string()), Some(&3));

		// extending never disturbs the scope it was built from
		assert_eq!(outer.find(&"x".to_string()), Some(&1));
		assert_eq!(outer.find(&"y".to_string()), None);
	}

	#[test]
	fn empty_scope_finds_nothing() {
		let scope: Scope<String, i64> = Scope::default();
		assert_eq!(scope.find(&"z".to_string()), None);
	}
}
