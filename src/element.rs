//! [`ExtendedElement`], the chainable surface over a native element.

use crate::{
	ancestry,
	delegation,
	error::{describe, DomError},
	insert::Insertable,
	redact,
	registry::{behavior_set_for, ensure_extended, BehaviorSet, ExtendedNode, ValueKind},
	scroll::{self, ScrollOutcome, ScrollTarget, ScrollTiming},
	selector,
};
use core::ops::Deref;
use std::rc::Rc;
use tracing::{error, instrument, trace, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, MouseEvent, MouseEventInit, Node};

/// A native element together with the behavior set of its tag name.
///
/// This is another handle to the same JavaScript object, not a copy: Equality is identity of the underlying element,
/// and everything [`Element`] offers stays available through [`Deref`].
#[derive(Debug, Clone)]
pub struct ExtendedElement {
	element: Element,
	behavior: Rc<BehaviorSet>,
}

impl From<Element> for ExtendedElement {
	fn from(element: Element) -> Self {
		let behavior = behavior_set_for(&element);
		Self { element, behavior }
	}
}

impl From<HtmlElement> for ExtendedElement {
	fn from(element: HtmlElement) -> Self {
		Element::from(element).into()
	}
}

impl PartialEq for ExtendedElement {
	fn eq(&self, other: &Self) -> bool {
		self.element == other.element
	}
}
impl Eq for ExtendedElement {}

impl PartialEq<Element> for ExtendedElement {
	fn eq(&self, other: &Element) -> bool {
		&self.element == other
	}
}

impl Deref for ExtendedElement {
	type Target = Element;

	fn deref(&self) -> &Self::Target {
		&self.element
	}
}

impl AsRef<Element> for ExtendedElement {
	fn as_ref(&self) -> &Element {
		&self.element
	}
}

impl AsRef<Node> for ExtendedElement {
	fn as_ref(&self) -> &Node {
		self.element.as_ref()
	}
}

impl AsRef<EventTarget> for ExtendedElement {
	fn as_ref(&self) -> &EventTarget {
		self.element.as_ref()
	}
}

impl From<ExtendedElement> for Element {
	fn from(extended: ExtendedElement) -> Self {
		extended.element
	}
}

impl From<ExtendedElement> for Node {
	fn from(extended: ExtendedElement) -> Self {
		extended.element.into()
	}
}

impl ExtendedElement {
	/// Already extended, so this returns `self` without touching the registry.
	#[must_use]
	pub fn extend(self) -> Self {
		self
	}

	#[must_use]
	pub fn behavior(&self) -> &Rc<BehaviorSet> {
		&self.behavior
	}

	#[must_use]
	pub fn element(&self) -> &Element {
		&self.element
	}

	#[must_use]
	pub fn into_element(self) -> Element {
		self.element
	}

	fn html_element(&self) -> Result<&HtmlElement, DomError> {
		self.element
			.dyn_ref::<HtmlElement>()
			.ok_or_else(|| DomError::NotHtml(self.element.tag_name()))
	}

	fn document(&self) -> Result<Document, DomError> {
		self.element.owner_document().ok_or(DomError::NoDocument)
	}

	// Selection.

	/// See [`selector::resolve`]. Supports the `"> …"` shorthand.
	#[must_use]
	pub fn find(&self, selector: &str) -> Option<ExtendedElement> {
		selector::resolve(&self.element, selector)
	}

	/// See [`selector::resolve_all`]. Supports the `"> …"` shorthand.
	#[must_use]
	pub fn find_all(&self, selector: &str) -> Vec<ExtendedElement> {
		selector::resolve_all(&self.element, selector)
	}

	/// See [`selector::count`]. Supports the `"> …"` shorthand.
	#[must_use]
	pub fn total(&self, selector: &str) -> usize {
		selector::count(&self.element, selector)
	}

	/// See [`ancestry::closest_parent`].
	#[must_use]
	pub fn closest_parent(&self, selector: &str) -> Option<ExtendedElement> {
		ancestry::closest_parent(self.element.as_ref(), selector)
	}

	// Traversal.

	#[must_use]
	pub fn parent_node(&self) -> Option<ExtendedNode> {
		self.element.parent_node().map(ensure_extended)
	}

	#[must_use]
	pub fn first_child(&self) -> Option<ExtendedNode> {
		self.element.first_child().map(ensure_extended)
	}

	#[must_use]
	pub fn last_child(&self) -> Option<ExtendedNode> {
		self.element.last_child().map(ensure_extended)
	}

	#[must_use]
	pub fn next_sibling(&self) -> Option<ExtendedNode> {
		self.element.next_sibling().map(ensure_extended)
	}

	#[must_use]
	pub fn previous_sibling(&self) -> Option<ExtendedNode> {
		self.element.previous_sibling().map(ensure_extended)
	}

	/// Clones the element, and its subtree iff `deep`. The clone is extended too.
	///
	/// # Errors
	///
	/// Iff the platform refuses to clone the node.
	pub fn clone_node(&self, deep: bool) -> Result<ExtendedElement, DomError> {
		let clone = self.element.clone_node_with_deep(deep)?;
		Ok(clone.dyn_into::<Element>().expect_throw("dom-sugar: Clone of an element isn't an element.").into())
	}

	// Content.

	#[must_use]
	pub fn html(&self) -> String {
		self.element.inner_html()
	}

	pub fn set_html(&self, html: &str) -> &Self {
		trace!(html = redact(html), "Setting inner HTML.");
		self.element.set_inner_html(html);
		self
	}

	#[must_use]
	pub fn plaintext(&self) -> String {
		self.element.text_content().unwrap_or_default()
	}

	pub fn set_plaintext(&self, text: &str) -> &Self {
		self.element.set_text_content(Some(text));
		self
	}

	/// Removes all child nodes.
	pub fn empty(&self) -> &Self {
		self.set_html("")
	}

	// Insertion.

	/// Appends `nodes` as the last children.
	///
	/// # Errors
	///
	/// Iff the platform rejects the insertion, for example when inserting an ancestor.
	pub fn append(&self, nodes: &(impl Insertable + ?Sized)) -> Result<&Self, DomError> {
		let node = nodes.to_insertion(&self.document()?)?;
		self.element.append_child(&node)?;
		Ok(self)
	}

	/// Inserts `nodes` before the current first child.
	///
	/// # Errors
	///
	/// Iff the platform rejects the insertion.
	pub fn prepend(&self, nodes: &(impl Insertable + ?Sized)) -> Result<&Self, DomError> {
		let node = nodes.to_insertion(&self.document()?)?;
		self.element.insert_before(&node, self.element.first_child().as_ref())?;
		Ok(self)
	}

	/// Inserts `nodes` directly after this element.
	///
	/// # Errors
	///
	/// [`DomError::Detached`] iff this element has no parent, otherwise iff the platform rejects the insertion.
	pub fn after(&self, nodes: &(impl Insertable + ?Sized)) -> Result<&Self, DomError> {
		let parent = self.element.parent_node().ok_or(DomError::Detached)?;
		let node = nodes.to_insertion(&self.document()?)?;
		parent.insert_before(&node, self.element.next_sibling().as_ref())?;
		Ok(self)
	}

	/// Inserts `nodes` directly before this element.
	///
	/// # Errors
	///
	/// [`DomError::Detached`] iff this element has no parent, otherwise iff the platform rejects the insertion.
	pub fn before(&self, nodes: &(impl Insertable + ?Sized)) -> Result<&Self, DomError> {
		let parent = self.element.parent_node().ok_or(DomError::Detached)?;
		let node = nodes.to_insertion(&self.document()?)?;
		parent.insert_before(&node, Some(self.element.as_ref()))?;
		Ok(self)
	}

	/// Detaches this element from its parent. It stays usable and can be inserted again.
	///
	/// # Errors
	///
	/// [`DomError::Detached`] iff there is no parent to remove it from.
	pub fn remove(&self) -> Result<&Self, DomError> {
		let parent = self.element.parent_node().ok_or(DomError::Detached)?;
		parent.remove_child(self.element.as_ref())?;
		Ok(self)
	}

	// Attributes.

	#[must_use]
	pub fn attr(&self, name: &str) -> Option<String> {
		self.element.get_attribute(name)
	}

	/// # Errors
	///
	/// Iff `name` isn't a valid attribute name.
	pub fn set_attr(&self, name: &str, value: &str) -> Result<&Self, DomError> {
		trace!(name, value = redact(value), "Setting attribute.");
		self.element.set_attribute(name, value)?;
		Ok(self)
	}

	/// Sets each attribute in order, stopping at the first invalid name.
	///
	/// # Errors
	///
	/// Iff a name isn't a valid attribute name.
	pub fn set_attrs<K: AsRef<str>, V: AsRef<str>>(&self, attributes: impl IntoIterator<Item = (K, V)>) -> Result<&Self, DomError> {
		for (name, value) in attributes {
			self.set_attr(name.as_ref(), value.as_ref())?;
		}
		Ok(self)
	}

	/// # Errors
	///
	/// Iff `name` isn't a valid attribute name.
	pub fn remove_attr(&self, name: &str) -> Result<&Self, DomError> {
		self.element.remove_attribute(name)?;
		Ok(self)
	}

	// Dataset.

	/// The `data-*` value under the camelCase `key`, or an empty string if it isn't set.
	#[must_use]
	pub fn data(&self, key: &str) -> String {
		match self.html_element() {
			Ok(html_element) => html_element.dataset().get(key).unwrap_or_default(),
			Err(error) => {
				warn!(key, "No dataset: {}", error);
				String::new()
			}
		}
	}

	/// # Errors
	///
	/// [`DomError::NotHtml`] for non-HTML elements, otherwise iff `key` isn't a valid dataset key.
	pub fn set_data(&self, key: &str, value: &str) -> Result<&Self, DomError> {
		trace!(key, value = redact(value), "Setting data.");
		self.html_element()?.dataset().set(key, value)?;
		Ok(self)
	}

	/// Like [`set_data`](`ExtendedElement::set_data`), but non-string values are stored as JSON.
	///
	/// # Errors
	///
	/// As [`set_data`](`ExtendedElement::set_data`), or iff `value` can't be serialized.
	pub fn set_data_json(&self, key: &str, value: &JsValue) -> Result<&Self, DomError> {
		let value = match value.as_string() {
			Some(value) => value,
			None => String::from(js_sys::JSON::stringify(value)?),
		};
		self.set_data(key, &value)
	}

	/// # Errors
	///
	/// As [`set_data`](`ExtendedElement::set_data`), stopping at the first failure.
	pub fn set_data_map<K: AsRef<str>, V: AsRef<str>>(&self, entries: impl IntoIterator<Item = (K, V)>) -> Result<&Self, DomError> {
		for (key, value) in entries {
			self.set_data(key.as_ref(), value.as_ref())?;
		}
		Ok(self)
	}

	pub fn remove_data(&self, key: &str) -> &Self {
		match self.html_element() {
			Ok(html_element) => html_element.dataset().delete(key),
			Err(error) => warn!(key, "No dataset: {}", error),
		}
		self
	}

	/// Removes every `data-*` entry whose key isn't in `except`.
	pub fn clear_data(&self, except: &[&str]) -> &Self {
		let dataset = match self.html_element() {
			Ok(html_element) => html_element.dataset(),
			Err(error) => {
				warn!("No dataset: {}", error);
				return self;
			}
		};
		for key in js_sys::Object::keys(dataset.as_ref()).iter().filter_map(|key| key.as_string()) {
			if !except.contains(&key.as_str()) {
				dataset.delete(&key);
			}
		}
		self
	}

	// Inline style.

	/// The inline style value of `property`, which may be given in camelCase.
	#[must_use]
	pub fn css(&self, property: &str) -> String {
		let html_element = match self.html_element() {
			Ok(html_element) => html_element,
			Err(error) => {
				warn!(property, "No inline style: {}", error);
				return String::new();
			}
		};
		html_element
			.style()
			.get_property_value(&css_property_name(property))
			.unwrap_or_else(|error| {
				error!(property, "Failed to read inline style: {}", describe(&error));
				String::new()
			})
	}

	/// # Errors
	///
	/// [`DomError::NotHtml`] for non-HTML elements, or iff the declaration is rejected.
	pub fn set_css(&self, property: &str, value: &str) -> Result<&Self, DomError> {
		self.html_element()?.style().set_property(&css_property_name(property), value)?;
		Ok(self)
	}

	/// # Errors
	///
	/// As [`set_css`](`ExtendedElement::set_css`), stopping at the first failure.
	pub fn set_css_map<K: AsRef<str>, V: AsRef<str>>(&self, declarations: impl IntoIterator<Item = (K, V)>) -> Result<&Self, DomError> {
		for (property, value) in declarations {
			self.set_css(property.as_ref(), value.as_ref())?;
		}
		Ok(self)
	}

	// Classes.

	/// # Errors
	///
	/// Iff `class_name` is empty or contains whitespace.
	pub fn add_class(&self, class_name: &str) -> Result<&Self, DomError> {
		self.element.class_list().add_1(class_name)?;
		Ok(self)
	}

	/// # Errors
	///
	/// As [`add_class`](`ExtendedElement::add_class`), stopping at the first failure.
	pub fn add_classes(&self, class_names: &[&str]) -> Result<&Self, DomError> {
		for class_name in class_names {
			self.add_class(class_name)?;
		}
		Ok(self)
	}

	/// # Errors
	///
	/// Iff `class_name` is empty or contains whitespace.
	pub fn remove_class(&self, class_name: &str) -> Result<&Self, DomError> {
		self.element.class_list().remove_1(class_name)?;
		Ok(self)
	}

	/// # Errors
	///
	/// As [`remove_class`](`ExtendedElement::remove_class`), stopping at the first failure.
	pub fn remove_classes(&self, class_names: &[&str]) -> Result<&Self, DomError> {
		for class_name in class_names {
			self.remove_class(class_name)?;
		}
		Ok(self)
	}

	/// Removes every class not in `except`.
	pub fn clear_class_list(&self, except: &[&str]) -> &Self {
		let class_list = self.element.class_list();
		let present: Vec<String> = (0..class_list.length()).filter_map(|i| class_list.item(i)).collect();
		for class_name in present.iter().filter(|class_name| !except.contains(&class_name.as_str())) {
			if let Err(error) = class_list.remove_1(class_name) {
				error!(class_name = class_name.as_str(), "Failed to remove class: {}", describe(&error));
			}
		}
		self
	}

	// Form values.

	/// The current value of a form control, or [`None`] for elements that don't have one.
	#[must_use]
	pub fn val(&self) -> Option<String> {
		let element = &self.element;
		match self.behavior.capabilities().value {
			ValueKind::Input => element.dyn_ref::<web_sys::HtmlInputElement>().map(web_sys::HtmlInputElement::value),
			ValueKind::TextArea => element.dyn_ref::<web_sys::HtmlTextAreaElement>().map(web_sys::HtmlTextAreaElement::value),
			ValueKind::Select => element.dyn_ref::<web_sys::HtmlSelectElement>().map(web_sys::HtmlSelectElement::value),
			ValueKind::Option => element.dyn_ref::<web_sys::HtmlOptionElement>().map(web_sys::HtmlOptionElement::value),
			ValueKind::Button => element.dyn_ref::<web_sys::HtmlButtonElement>().map(web_sys::HtmlButtonElement::value),
			ValueKind::Output => element.dyn_ref::<web_sys::HtmlOutputElement>().map(web_sys::HtmlOutputElement::value),
			ValueKind::None => None,
		}
	}

	/// Sets the value of a form control. Elements without a value are left alone.
	pub fn set_val(&self, value: &str) -> &Self {
		let element = &self.element;
		let set = match self.behavior.capabilities().value {
			ValueKind::Input => element.dyn_ref::<web_sys::HtmlInputElement>().map(|e| e.set_value(value)),
			ValueKind::TextArea => element.dyn_ref::<web_sys::HtmlTextAreaElement>().map(|e| e.set_value(value)),
			ValueKind::Select => element.dyn_ref::<web_sys::HtmlSelectElement>().map(|e| e.set_value(value)),
			ValueKind::Option => element.dyn_ref::<web_sys::HtmlOptionElement>().map(|e| e.set_value(value)),
			ValueKind::Button => element.dyn_ref::<web_sys::HtmlButtonElement>().map(|e| e.set_value(value)),
			ValueKind::Output => element.dyn_ref::<web_sys::HtmlOutputElement>().map(|e| e.set_value(value)),
			ValueKind::None => None,
		};
		if set.is_none() {
			warn!(tag = self.behavior.tag_name(), "Element has no value to set.");
		}
		self
	}

	// Events.

	/// Adds a plain click listener. It stays attached for the lifetime of the element.
	///
	/// # Errors
	///
	/// Iff the listener can't be attached.
	pub fn on_click(&self, handler: impl FnMut(Event) + 'static) -> Result<&Self, DomError> {
		let listener = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>).into_js_value();
		self.element.add_event_listener_with_callback("click", listener.unchecked_ref())?;
		Ok(self)
	}

	/// Clicks the element: natively for HTML elements, otherwise by dispatching a bubbling, cancelable `click` [`MouseEvent`].
	///
	/// # Errors
	///
	/// Iff the synthetic event can't be created or dispatched.
	pub fn trigger_click(&self) -> Result<&Self, DomError> {
		if let Ok(html_element) = self.html_element() {
			html_element.click();
			return Ok(self);
		}

		let mut init = MouseEventInit::new();
		init.bubbles(true).cancelable(true);
		let event = MouseEvent::new_with_mouse_event_init_dict("click", &init)?;
		self.element.dispatch_event(&event)?;
		Ok(self)
	}

	/// See [`delegation::live_click`].
	///
	/// # Errors
	///
	/// Iff the shared listener can't be attached.
	pub fn live_click(&self, selector: &str, handler: impl FnMut(&ExtendedElement, &Event) + 'static) -> Result<&Self, DomError> {
		delegation::live_click(&self.element, selector, handler)?;
		Ok(self)
	}

	// Scrolling.

	/// Scrolls this element so that `target` comes into view, with the default timing.
	///
	/// # Errors
	///
	/// Iff the target isn't an `HTMLElement`.
	pub fn scroll_to_elem<'a>(&self, target: impl Into<ScrollTarget<'a>>) -> Result<ScrollOutcome, DomError> {
		self.scroll_to_elem_with(target, ScrollTiming::default())
	}

	/// # Errors
	///
	/// Iff the target isn't an `HTMLElement`.
	#[instrument(skip(self, target))]
	pub fn scroll_to_elem_with<'a>(&self, target: impl Into<ScrollTarget<'a>>, timing: ScrollTiming) -> Result<ScrollOutcome, DomError> {
		scroll::scroll_to_elem(&self.element, target.into(), timing)
	}

	/// Scrolls the parent element so that this element comes into view, with the default timing.
	///
	/// # Errors
	///
	/// Iff there is no parent element or this isn't an `HTMLElement`.
	pub fn scroll_into_parent(&self) -> Result<ScrollOutcome, DomError> {
		scroll::scroll_into_parent(&self.element, ScrollTiming::default())
	}
}

/// Converts camelCase style property names (`marginTop`) to their CSS form (`margin-top`).
///
/// Names that already contain a dash, like `margin-top` or `--custom`, are returned unchanged.
/// `cssFloat` is `float`, and the lowercase `ms` vendor prefix becomes `-ms-` like the capitalized ones.
#[must_use]
pub fn css_property_name(property: &str) -> String {
	if property.contains('-') {
		return property.to_owned();
	}
	if property == "cssFloat" {
		return "float".to_owned();
	}
	let mut name = String::with_capacity(property.len() + 4);
	let property = match property.strip_prefix("ms") {
		Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => {
			name.push_str("-ms");
			rest
		}
		_ => property,
	};
	for c in property.chars() {
		if c.is_ascii_uppercase() {
			name.push('-');
			name.push(c.to_ascii_lowercase());
		} else {
			name.push(c);
		}
	}
	name
}
