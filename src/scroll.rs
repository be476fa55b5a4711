//! Eased scrolling of a container towards one of its descendants.
//!
//! A running animation can't be cancelled. Two animations on the same container both keep writing `scrollTop` until they finish.

use crate::{
	element::ExtendedElement,
	error::{describe, DomError},
};
use core::f64::consts::PI;
use gloo_timers::callback::Interval;
use std::{cell::RefCell, rc::Rc};
use tracing::{instrument, trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// How long an animation takes and how often it updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTiming {
	pub duration_ms: f64,
	pub tick_ms: u32,
}

impl Default for ScrollTiming {
	fn default() -> Self {
		Self {
			duration_ms: 500.0,
			tick_ms: 15,
		}
	}
}

/// What to scroll into view.
#[derive(Debug, Clone, Copy)]
pub enum ScrollTarget<'a> {
	Element(&'a Element),
	/// Resolved with `querySelector` inside the container.
	Selector(&'a str),
}

impl<'a> From<&'a Element> for ScrollTarget<'a> {
	fn from(element: &'a Element) -> Self {
		Self::Element(element)
	}
}

impl<'a> From<&'a ExtendedElement> for ScrollTarget<'a> {
	fn from(element: &'a ExtendedElement) -> Self {
		Self::Element(element)
	}
}

impl<'a> From<&'a str> for ScrollTarget<'a> {
	fn from(selector: &'a str) -> Self {
		Self::Selector(selector)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
	/// The target was at or above the current scroll position, so `scrollTop` was set directly.
	Jumped,
	/// A timer is now moving `scrollTop` towards the target.
	Animating,
	/// The selector matched nothing. Nothing was changed.
	NotFound,
}

/// Cosine ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
	(1.0 - (PI * t).cos()) / 2.0
}

/// Animation progress after `elapsed_ms`, clamped to `[0, 1]`.
///
/// Durations that aren't positive and finite finish immediately, so every animation reaches `1.0`.
#[must_use]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
	if !(duration_ms > 0.0 && duration_ms.is_finite()) {
		return 1.0;
	}
	(elapsed_ms / duration_ms).max(0.0).min(1.0)
}

/// The rounded scroll position at `progress` of an animation from `start` over `distance`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn frame_position(start: i32, distance: i32, progress: f64) -> i32 {
	(f64::from(start) + f64::from(distance) * ease_in_out(progress)).round() as i32
}

fn offset_top(element: &Element) -> Result<i32, DomError> {
	element
		.dyn_ref::<HtmlElement>()
		.map(HtmlElement::offset_top)
		.ok_or_else(|| DomError::NotHtml(element.tag_name()))
}

/// Scrolls `container` so that `target` comes into view.
///
/// # Errors
///
/// Iff the target has no `offsetTop`, i.e. isn't an `HTMLElement`.
#[instrument(skip(container, target))]
pub fn scroll_to_elem(container: &Element, target: ScrollTarget<'_>, timing: ScrollTiming) -> Result<ScrollOutcome, DomError> {
	let target = match target {
		ScrollTarget::Element(element) => element.clone(),
		ScrollTarget::Selector(selector) => match container.query_selector(selector) {
			Ok(Some(element)) => element,
			Ok(None) => return Ok(ScrollOutcome::NotFound),
			Err(error) => {
				warn!(selector, "Failed to resolve scroll target: {}", describe(&error));
				return Ok(ScrollOutcome::NotFound);
			}
		},
	};
	animate(container.clone(), offset_top(&target)?, timing)
}

/// Scrolls `element`'s parent so that `element` comes into view.
///
/// # Errors
///
/// Iff `element` has no parent element or isn't an `HTMLElement`.
#[instrument(skip(element))]
pub fn scroll_into_parent(element: &Element, timing: ScrollTiming) -> Result<ScrollOutcome, DomError> {
	let parent = element.parent_element().ok_or(DomError::Detached)?;
	animate(parent, offset_top(element)?, timing)
}

fn animate(scroller: Element, stop: i32, timing: ScrollTiming) -> Result<ScrollOutcome, DomError> {
	let start = scroller.scroll_top();
	let distance = stop - start;
	if distance <= 0 {
		scroller.set_scroll_top(stop);
		return Ok(ScrollOutcome::Jumped);
	}

	let started_at = js_sys::Date::now();
	let handle: Rc<RefCell<Option<Interval>>> = Rc::default();
	let interval = Interval::new(timing.tick_ms, {
		let handle = Rc::clone(&handle);
		move || {
			let t = progress(js_sys::Date::now() - started_at, timing.duration_ms);
			scroller.set_scroll_top(frame_position(start, distance, t));
			if t >= 1.0 {
				let finished = handle.borrow_mut().take();
				drop(finished);
			}
		}
	});
	*handle.borrow_mut() = Some(interval);
	trace!(start, distance, "Started scroll animation.");
	Ok(ScrollOutcome::Animating)
}
