//! Small helpers over `web_sys` shared by the controllers.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window, window};

use crate::error::{SiteError, SiteResult};

pub fn win() -> SiteResult<Window> {
    window().ok_or(SiteError::MissingWindow)
}

pub fn document() -> SiteResult<Document> {
    win()?.document().ok_or(SiteError::MissingDocument)
}

/// `performance.now()` or 0 outside a browser.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Optional element: a missing id only disables the feature that needs it.
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    let el = doc.get_element_by_id(id);
    if el.is_none() {
        log::debug!("#{id} not in document; feature disabled");
    }
    el.and_then(|el| el.dyn_into::<T>().ok())
}

pub fn require_id<T: JsCast>(doc: &Document, id: &str) -> SiteResult<T> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| SiteError::MissingElement(id.to_string()))
}

pub fn query<T: JsCast>(doc: &Document, selector: &str) -> Option<T> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// All elements matching `selector`, in document order.
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_display(el: Option<&HtmlElement>, value: &str) {
    if let Some(el) = el {
        el.style().set_property("display", value).ok();
    }
}

pub fn set_text(el: Option<&HtmlElement>, text: &str) {
    if let Some(el) = el {
        el.set_inner_text(text);
    }
}

pub fn add_class(el: &Element, class: &str) {
    el.class_list().add_1(class).ok();
}

pub fn remove_class(el: &Element, class: &str) {
    el.class_list().remove_1(class).ok();
}
