//! Click delegation: one native listener per root element, shared by all registrations on it.
//!
//! Roots are tracked through a `WeakMap`, so a registry entry never keeps its root alive.
//! The listener closure owns the [`Dispatcher`]; the registry only holds [`Weak`] references to it.

use crate::{
	element::ExtendedElement,
	error::DomError,
	selector::{matches, Selector},
};
use hashbrown::HashMap;
use std::{
	cell::{Cell, RefCell},
	rc::{Rc, Weak},
};
use tracing::{error, instrument, trace, trace_span};
use wasm_bindgen::{closure::Closure, JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Element, Event, Node};

thread_local! {
	static ROOT_IDS: js_sys::WeakMap = js_sys::WeakMap::new();
	static DISPATCHERS: RefCell<HashMap<u32, Weak<Dispatcher>>> = RefCell::new(HashMap::new());
	static NEXT_ROOT_ID: Cell<u32> = Cell::new(0);
}

/// Set on an `Event` once a delegated handler ran for it.
/// Dispatchers on further ancestors see the same object while it bubbles and skip it.
const HANDLED_KEY: &str = "domSugarHandled";

fn is_handled(event: &Event) -> bool {
	js_sys::Reflect::get(event, &JsValue::from_str(HANDLED_KEY)).map_or(false, |handled| handled.is_truthy())
}

fn mark_handled(event: &Event) {
	if let Err(error) = js_sys::Reflect::set(event, &JsValue::from_str(HANDLED_KEY), &JsValue::TRUE) {
		error!("Failed to mark click as handled: {}", crate::error::describe(&error));
	}
}

type Handler = Box<dyn FnMut(&ExtendedElement, &Event)>;

#[derive(Debug)]
enum Matcher {
	/// Tested with the native `matches` on each node of the walk.
	Selector(String),
	/// Direct children of the root that matched when the registration was made.
	/// Children added later are not part of this set.
	Candidates(Vec<Node>),
}

impl Matcher {
	fn new(root: &Element, selector: &str) -> Self {
		match Selector::parse(selector) {
			Selector::Descendant(selector) => Self::Selector(selector.to_owned()),
			Selector::Children(child_selector) => match root.get_attribute("id") {
				Some(id) if is_css_identifier(&id) => Self::Selector(
					split_selector_list(child_selector)
						.iter()
						.map(|part| format!("#{} > {}", id, part))
						.collect::<Vec<_>>()
						.join(", "),
				),
				_ => {
					let children = root.children();
					Self::Candidates(
						(0..children.length())
							.filter_map(|i| children.item(i))
							.filter(|child| matches(child, child_selector))
							.map(Node::from)
							.collect(),
					)
				}
			},
		}
	}

	fn is_match(&self, node: &Node) -> bool {
		match self {
			Self::Selector(selector) => node.dyn_ref::<Element>().map_or(false, |element| matches(element, selector)),
			Self::Candidates(candidates) => candidates.contains(node),
		}
	}
}

struct Registration {
	matcher: Matcher,
	handler: RefCell<Handler>,
}

struct Dispatcher {
	registrations: RefCell<Vec<Rc<Registration>>>,
}

impl Dispatcher {
	/// Walks from the event target up to (excluding) the root once per registration, in registration order.
	/// The first match fires its handler and ends the dispatch.
	fn dispatch(&self, event: &Event) {
		if is_handled(event) {
			return;
		}

		let root = event.current_target().and_then(|root| root.dyn_into::<Node>().ok());
		let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
		let registrations = self.registrations.borrow().clone();

		for registration in registrations {
			let mut current = target.clone();
			while let Some(node) = current {
				if root.as_ref() == Some(&node) {
					break;
				}
				if registration.matcher.is_match(&node) {
					mark_handled(event);
					let element = ExtendedElement::from(node.dyn_into::<Element>().expect_throw("dom-sugar bug: Delegated click matched a non-element node."));

					let span = trace_span!("delegated handler", tag = element.behavior().tag_name());
					let _enter = span.enter();
					match registration.handler.try_borrow_mut() {
						Ok(mut handler) => (*handler)(&element, event),
						Err(_) => error!("Delegated click handler re-entered itself; skipping."),
					}
					return;
				}
				current = node.parent_node();
			}
		}
	}
}

fn dispatcher_for(root: &Element) -> Result<Rc<Dispatcher>, DomError> {
	let key: &js_sys::Object = root.as_ref();
	let existing = ROOT_IDS
		.with(|ids| ids.get(key).as_f64())
		.and_then(|id| DISPATCHERS.with(|dispatchers| dispatchers.borrow().get(&(id as u32)).and_then(Weak::upgrade)));
	if let Some(existing) = existing {
		return Ok(existing);
	}

	let dispatcher = Rc::new(Dispatcher {
		registrations: RefCell::new(Vec::new()),
	});
	let listener = Closure::wrap(Box::new({
		let dispatcher = Rc::clone(&dispatcher);
		move |event: Event| dispatcher.dispatch(&event)
	}) as Box<dyn FnMut(Event)>)
	.into_js_value();
	root.add_event_listener_with_callback("click", listener.unchecked_ref())?;

	let id = NEXT_ROOT_ID.with(|next| {
		let id = next.get();
		next.set(id.wrapping_add(1));
		id
	});
	ROOT_IDS.with(|ids| ids.set(key, &JsValue::from(id)));
	DISPATCHERS.with(|dispatchers| {
		let mut dispatchers = dispatchers.borrow_mut();
		dispatchers.retain(|_, dispatcher| dispatcher.strong_count() > 0);
		dispatchers.insert(id, Rc::downgrade(&dispatcher));
	});
	trace!(root_id = id, "Created delegation listener.");
	Ok(dispatcher)
}

/// Calls `handler` for clicks inside `root` whose target is, or is inside, an element matching `selector`.
///
/// `handler` receives the matching element and the original event.
/// At most one delegated handler runs per click, even across nested roots.
///
/// With the `"> …"` shorthand, the matching children are fixed when this is called,
/// unless `root` has a plain `id`, in which case the selector is rewritten to `"#id > …"` and matched natively.
///
/// # Errors
///
/// Iff the native listener can't be attached.
#[instrument(skip(root, handler))]
pub fn live_click(root: &Element, selector: &str, handler: impl FnMut(&ExtendedElement, &Event) + 'static) -> Result<(), DomError> {
	let registration = Rc::new(Registration {
		matcher: Matcher::new(root, selector),
		handler: RefCell::new(Box::new(handler)),
	});
	trace!(matcher = ?registration.matcher, "Registering delegated click.");
	dispatcher_for(root)?.registrations.borrow_mut().push(registration);
	Ok(())
}

/// Splits a selector list at its top-level commas.
/// Commas inside parentheses, brackets or quotes, as in `:is(.a, .b)` or `[title="a,b"]`, don't split.
fn split_selector_list(selector: &str) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut depth = 0_usize;
	let mut quote = None;
	let mut escaped = false;
	let mut start = 0;
	for (i, c) in selector.char_indices() {
		if escaped {
			escaped = false;
			continue;
		}
		match (quote, c) {
			(_, '\\') => escaped = true,
			(Some(q), c) if c == q => quote = None,
			(Some(_), _) => {}
			(None, '"') | (None, '\'') => quote = Some(c),
			(None, '(') | (None, '[') => depth += 1,
			(None, ')') | (None, ']') => depth = depth.saturating_sub(1),
			(None, ',') if depth == 0 => {
				parts.push(selector[start..i].trim());
				start = i + 1;
			}
			_ => {}
		}
	}
	parts.push(selector[start..].trim());
	parts
}

/// Whether `id` can be spliced into a selector as `#id` without escaping.
fn is_css_identifier(id: &str) -> bool {
	let mut chars = id.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
