//! The extension registry: one [`BehaviorSet`] per tag name, created on first encounter.
//!
//! Extending an element never copies or mutates it.
//! [`ExtendedElement`] holds another handle to the same JavaScript object together with the cached behavior set of its tag name.

use crate::element::ExtendedElement;
use hashbrown::HashMap;
use std::{cell::RefCell, rc::Rc};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

thread_local! {
	static BEHAVIOR_SETS: RefCell<HashMap<String, Rc<BehaviorSet>>> = RefCell::new(HashMap::new());
}

/// Which form-value interface an element kind exposes, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	None,
	Input,
	TextArea,
	Select,
	Option,
	Button,
	Output,
}

/// Snapshot of the native interface an element of a given tag name had when its tag was first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCapabilities {
	/// `HTMLElement` members are available: `dataset`, `style`, `offsetTop` and native `click()`.
	pub html: bool,
	pub value: ValueKind,
}

impl NativeCapabilities {
	#[must_use]
	pub fn of(element: &Element) -> Self {
		let value = if element.is_instance_of::<web_sys::HtmlInputElement>() {
			ValueKind::Input
		} else if element.is_instance_of::<web_sys::HtmlTextAreaElement>() {
			ValueKind::TextArea
		} else if element.is_instance_of::<web_sys::HtmlSelectElement>() {
			ValueKind::Select
		} else if element.is_instance_of::<web_sys::HtmlOptionElement>() {
			ValueKind::Option
		} else if element.is_instance_of::<web_sys::HtmlButtonElement>() {
			ValueKind::Button
		} else if element.is_instance_of::<web_sys::HtmlOutputElement>() {
			ValueKind::Output
		} else {
			ValueKind::None
		};
		Self {
			html: element.is_instance_of::<web_sys::HtmlElement>(),
			value,
		}
	}
}

/// The helper layer shared by all elements of one tag name.
///
/// Instances are immutable and live until the thread ends.
#[derive(Debug, PartialEq, Eq)]
pub struct BehaviorSet {
	tag_name: String,
	capabilities: NativeCapabilities,
}

impl BehaviorSet {
	/// The uppercased tag name this set is registered under.
	#[must_use]
	pub fn tag_name(&self) -> &str {
		&self.tag_name
	}

	#[must_use]
	pub fn capabilities(&self) -> NativeCapabilities {
		self.capabilities
	}
}

/// Tag names are case-insensitive, so `div`, `Div` and `DIV` share an entry.
#[must_use]
pub fn normalize_tag_name(tag_name: &str) -> String {
	tag_name.to_ascii_uppercase()
}

/// Returns the behavior set for `element`'s tag name, creating it from `element`'s native interface if it doesn't exist yet.
pub fn behavior_set_for(element: &Element) -> Rc<BehaviorSet> {
	let tag_name = normalize_tag_name(&element.tag_name());
	BEHAVIOR_SETS.with(|sets| {
		let mut sets = sets.borrow_mut();
		if let Some(existing) = sets.get(&tag_name) {
			return Rc::clone(existing);
		}

		let capabilities = NativeCapabilities::of(element);
		trace!(tag_name = %tag_name, ?capabilities, "Created behavior set.");
		let created = Rc::new(BehaviorSet {
			tag_name: tag_name.clone(),
			capabilities,
		});
		sets.insert(tag_name, Rc::clone(&created));
		created
	})
}

/// Looks up an existing behavior set without creating one.
#[must_use]
pub fn get(tag_name: &str) -> Option<Rc<BehaviorSet>> {
	let tag_name = normalize_tag_name(tag_name);
	BEHAVIOR_SETS.with(|sets| sets.borrow().get(&tag_name).cloned())
}

/// The number of distinct tag names seen so far.
#[must_use]
pub fn len() -> usize {
	BEHAVIOR_SETS.with(|sets| sets.borrow().len())
}

/// A node after passing through [`ensure_extended`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedNode {
	Element(ExtendedElement),
	/// Text, comments and other non-element nodes are returned unchanged.
	Other(Node),
}

impl ExtendedNode {
	#[must_use]
	pub fn as_element(&self) -> Option<&ExtendedElement> {
		match self {
			Self::Element(element) => Some(element),
			Self::Other(_) => None,
		}
	}

	#[must_use]
	pub fn into_element(self) -> Option<ExtendedElement> {
		match self {
			Self::Element(element) => Some(element),
			Self::Other(_) => None,
		}
	}

	/// The native node, whichever variant this is.
	#[must_use]
	pub fn as_node(&self) -> &Node {
		match self {
			Self::Element(element) => element.as_ref(),
			Self::Other(node) => node,
		}
	}
}

/// Extends element nodes, returns all others as they are.
pub fn ensure_extended(node: Node) -> ExtendedNode {
	match node.dyn_into::<Element>() {
		Ok(element) => ExtendedNode::Element(ExtendedElement::from(element)),
		Err(node) => ExtendedNode::Other(node),
	}
}
