//! Single-page navigation: exactly one `.page` is visible at a time.

use std::str::FromStr;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom::{self, by_id, query_all};
use crate::error::{SiteError, SiteResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Intro,
    Habitat,
    Diet,
    Game,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Intro, Page::Habitat, Page::Diet, Page::Game];

    pub fn id(self) -> &'static str {
        match self {
            Page::Intro => "intro-page",
            Page::Habitat => "habitat-page",
            Page::Diet => "diet-page",
            Page::Game => "game-page",
        }
    }

    /// Nav button highlighted while this page is shown.
    pub fn nav_button_id(self) -> &'static str {
        match self {
            Page::Intro => "intro-btn",
            Page::Habitat => "habitat-btn",
            Page::Diet => "diet-btn",
            Page::Game => "game-btn",
        }
    }
}

impl FromStr for Page {
    type Err = SiteError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| SiteError::UnknownPage(id.to_string()))
    }
}

#[derive(Debug)]
pub struct ViewRouter {
    active: Page,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self { active: Page::Intro }
    }
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Page {
        self.active
    }

    /// Switch to the page with element id `id`. Unknown ids leave the current
    /// page in place.
    pub fn show(&mut self, id: &str) -> SiteResult<Page> {
        let page: Page = id.parse()?;
        self.active = page;
        Ok(page)
    }
}

/// Make `page` the only visible page and highlight its nav button.
pub fn render(doc: &Document, page: Page) -> SiteResult<()> {
    // Resolve the target first so a broken page id never blanks the site.
    let target: HtmlElement = dom::require_id(doc, page.id())?;
    for el in query_all(doc, ".page") {
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            dom::set_display(Some(&el), "none");
            dom::remove_class(&el, "active-page");
        }
    }
    dom::set_display(Some(&target), "block");
    dom::add_class(&target, "active-page");

    for btn in query_all(doc, ".nav-btn") {
        dom::remove_class(&btn, "active");
    }
    if let Some(btn) = by_id::<HtmlElement>(doc, page.nav_button_id()) {
        dom::add_class(&btn, "active");
    }
    Ok(())
}
