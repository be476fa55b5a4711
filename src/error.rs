use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure of a DOM operation that can't be expressed as "no match".
///
/// Selector resolution never produces these: Unparsable selectors are logged and resolve to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
	/// The platform rejected a call, for example with a `HierarchyRequestError`.
	#[error("DOM call rejected: {0}")]
	Js(String),
	/// The operation inserts relative to the element, but it has no parent.
	#[error("element has no parent node")]
	Detached,
	#[error("no `window` in this context")]
	NoWindow,
	#[error("`window` has no `document`")]
	NoDocument,
	/// An `HTMLElement`-only operation was applied to another element kind, like `<svg>`.
	#[error("<{0}> is not an HTML element")]
	NotHtml(String),
}

impl From<JsValue> for DomError {
	fn from(value: JsValue) -> Self {
		Self::Js(describe(&value))
	}
}

/// Renders a thrown JS value for logs and errors, preferring `Error.message`.
pub(crate) fn describe(value: &JsValue) -> String {
	if let Some(message) = js_sys::Reflect::get(value, &JsValue::from_str("message"))
		.ok()
		.and_then(|message| message.as_string())
	{
		return message;
	}
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
