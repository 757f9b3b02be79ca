//! Page-level controllers: navigation, sound explorer, image overlays,
//! hamburger menu, fullscreen buttons, feedback form and info cards.
//!
//! All controller state sits in one thread-local `SiteState`; listeners borrow
//! it for the duration of a single callback. Elements that are missing from the
//! document simply leave their feature unbound.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::config::SiteConfig;
use crate::dom::{self, by_id, query, query_all};
use crate::error::{SiteError, SiteResult};

pub mod audio;
pub mod controls;
pub mod explore;
pub mod overlay;
pub mod router;

use audio::{AudioCue, AudioCuePlayer};
use controls::{CardSelection, FEEDBACK_THANKS, MenuState};
use explore::ExplorationTracker;
use overlay::{OVERLAY_CONTAINERS, OverlayChange, OverlayState};
use router::{Page, ViewRouter};

struct OverlaySlot {
    container: Element,
    state: OverlayState,
    timeout: Option<i32>,
}

struct SiteState {
    cfg: SiteConfig,
    doc: Document,
    router: ViewRouter,
    player: AudioCuePlayer,
    tracker: ExplorationTracker,
    sound_buttons: Vec<(AudioCue, HtmlElement)>,
    sound_counter: Option<HtmlElement>,
    progress_fill: Option<HtmlElement>,
    encourage_text: Option<HtmlElement>,
    overlays: Vec<OverlaySlot>,
    menu: MenuState,
    ham_icon: Option<HtmlElement>,
    menu_list: Option<Element>,
    cards: CardSelection,
}

thread_local! {
    static SITE: RefCell<Option<SiteState>> = const { RefCell::new(None) };
}

fn with_site<R>(f: impl FnOnce(&mut SiteState) -> R) -> Option<R> {
    SITE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Page-lifetime listener.
fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> SiteResult<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn mount(doc: &Document, cfg: &SiteConfig) -> SiteResult<()> {
    if SITE.with(|cell| cell.borrow().is_some()) {
        log::warn!("site already started");
        return Ok(());
    }

    let sound_buttons: Vec<(AudioCue, HtmlElement)> = AudioCue::AMBIENT
        .into_iter()
        .filter_map(|cue| Some((cue, by_id(doc, cue.button_id()?)?)))
        .collect();
    let overlays: Vec<OverlaySlot> = OVERLAY_CONTAINERS
        .iter()
        .filter_map(|id| by_id::<Element>(doc, id))
        .map(|container| OverlaySlot { container, state: OverlayState::new(), timeout: None })
        .collect();

    let state = SiteState {
        cfg: cfg.clone(),
        doc: doc.clone(),
        router: ViewRouter::new(),
        player: AudioCuePlayer::load(),
        tracker: ExplorationTracker::new(),
        sound_buttons,
        sound_counter: by_id(doc, "sound-counter"),
        progress_fill: by_id(doc, "progress-fill"),
        encourage_text: by_id(doc, "encourage-text"),
        overlays,
        menu: MenuState::default(),
        ham_icon: by_id(doc, "hamIcon"),
        menu_list: query(doc, ".nav-buttons"),
        cards: CardSelection::default(),
    };

    bind_navigation(doc)?;
    bind_sounds(doc, &state)?;
    bind_overlays(&state)?;
    bind_menu(&state)?;
    bind_fullscreen(doc)?;
    bind_feedback_form(doc)?;
    bind_cards(doc)?;

    SITE.with(|cell| cell.replace(Some(state)));
    with_site(|site| {
        if let Err(err) = site.show_page(Page::Intro.id()) {
            log::warn!("initial page: {err}");
        }
        site.render_exploration();
        site.render_menu();
    });
    Ok(())
}

/// Show page `id` if the site is running.
pub fn show_page(id: &str) -> SiteResult<Page> {
    with_site(|site| site.show_page(id)).unwrap_or(Err(SiteError::NotStarted))
}

fn bind_navigation(doc: &Document) -> SiteResult<()> {
    for page in Page::ALL {
        if let Some(btn) = by_id::<HtmlElement>(doc, page.nav_button_id()) {
            listen(&btn, "click", move |_| {
                with_site(|site| site.navigate(AudioCue::Click, page));
            })?;
        }
    }
    if let Some(btn) = by_id::<HtmlElement>(doc, "explore-btn") {
        listen(&btn, "click", |_| {
            with_site(|site| site.navigate(AudioCue::Explore, Page::Habitat));
        })?;
    }
    Ok(())
}

fn bind_sounds(doc: &Document, state: &SiteState) -> SiteResult<()> {
    for (cue, btn) in &state.sound_buttons {
        let cue = *cue;
        listen(btn, "click", move |_| {
            with_site(|site| site.play_ambient(cue));
        })?;
        if let Some(audio) = state.player.element(cue) {
            let btn = btn.clone();
            let on_ended = Closure::wrap(Box::new(move || {
                dom::remove_class(&btn, "playing");
            }) as Box<dyn FnMut()>);
            audio.set_onended(Some(on_ended.as_ref().unchecked_ref()));
            on_ended.forget();
        }
    }
    listen(doc, "keydown", |evt| {
        let on_button = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.tag_name() == "BUTTON");
        if on_button {
            return;
        }
        let Some(cue) = evt.dyn_ref::<KeyboardEvent>().and_then(|k| AudioCue::from_key(&k.key())) else {
            return;
        };
        with_site(|site| site.play_ambient(cue));
    })
}

fn bind_overlays(state: &SiteState) -> SiteResult<()> {
    for (index, slot) in state.overlays.iter().enumerate() {
        listen(&slot.container, "click", move |_| {
            with_site(|site| site.toggle_overlay(index));
        })?;
    }
    Ok(())
}

fn bind_menu(state: &SiteState) -> SiteResult<()> {
    if let Some(icon) = &state.ham_icon {
        listen(icon, "click", |_| {
            with_site(|site| {
                site.menu.toggle();
                site.render_menu();
            });
        })?;
    }
    Ok(())
}

fn bind_fullscreen(doc: &Document) -> SiteResult<()> {
    if let Some(btn) = by_id::<HtmlElement>(doc, "btnFS") {
        let doc = doc.clone();
        listen(&btn, "click", move |_| {
            // Must run inside the user gesture.
            let requested = doc.document_element().map(|root| root.request_fullscreen());
            match requested {
                Some(Ok(())) => log::debug!("fullscreen requested"),
                Some(Err(err)) => log::warn!("fullscreen refused: {err:?}"),
                None => log::warn!("fullscreen unavailable: no document element"),
            }
        })?;
    }
    if let Some(btn) = by_id::<HtmlElement>(doc, "btnWS") {
        let doc = doc.clone();
        listen(&btn, "click", move |_| doc.exit_fullscreen())?;
    }
    Ok(())
}

fn bind_feedback_form(doc: &Document) -> SiteResult<()> {
    if let Some(form) = by_id::<Element>(doc, "feedback-form") {
        listen(&form, "submit", |evt| {
            evt.prevent_default();
            if let Some(w) = web_sys::window() {
                if let Err(err) = w.alert_with_message(FEEDBACK_THANKS) {
                    log::warn!("feedback alert failed: {err:?}");
                }
            }
        })?;
    }
    Ok(())
}

fn bind_cards(doc: &Document) -> SiteResult<()> {
    if let Some(grid) = query::<Element>(doc, ".content-grid") {
        listen(&grid, "click", |evt| {
            let card = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".info-card").ok().flatten());
            if let Some(card) = card {
                with_site(|site| site.select_card(&card));
            }
        })?;
    }
    Ok(())
}

impl SiteState {
    fn show_page(&mut self, id: &str) -> SiteResult<Page> {
        let page: Page = id.parse()?;
        router::render(&self.doc, page)?;
        self.router.show(page.id())
    }

    fn navigate(&mut self, cue: AudioCue, page: Page) {
        self.player.play(cue);
        if let Err(err) = self.show_page(page.id()) {
            log::warn!("navigation failed: {err}");
        }
        let width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::MAX);
        if self.menu.close_on_navigate(width, self.cfg.menu_breakpoint_px) {
            self.render_menu();
        }
    }

    fn play_ambient(&mut self, cue: AudioCue) {
        let Some(btn) = self
            .sound_buttons
            .iter()
            .find(|(c, _)| *c == cue)
            .map(|(_, btn)| btn.clone())
        else {
            return;
        };
        self.tracker.record(cue);
        dom::add_class(&btn, "playing");
        self.player.play(cue);
        // `ended` may never fire (blocked playback); clear the highlight anyway.
        let fallback = Closure::once_into_js(move || dom::remove_class(&btn, "playing"));
        set_timeout(&fallback, self.cfg.playing_fallback_ms);
        self.render_exploration();
        log::info!(
            "sound experience updated: {}/{} sounds played",
            self.tracker.played_count(),
            self.tracker.total()
        );
    }

    fn render_exploration(&self) {
        dom::set_text(self.sound_counter.as_ref(), &self.tracker.counter_text());
        if let Some(fill) = &self.progress_fill {
            fill.style().set_property("width", &format!("{}%", self.tracker.percent())).ok();
        }
        let Some(text) = &self.encourage_text else {
            return;
        };
        let note = self.tracker.encouragement();
        text.set_inner_text(note.text);
        let style = text.style();
        style.set_property("color", note.color).ok();
        if note.celebrate {
            style.set_property("font-weight", "bold").ok();
            let text = text.clone();
            let pulse = Closure::once_into_js(move || {
                text.style().set_property("animation", "pulse 0.5s ease-in-out 3").ok();
            });
            set_timeout(&pulse, 100);
        }
    }

    fn toggle_overlay(&mut self, index: usize) {
        let delay = self.cfg.overlay_auto_close_ms;
        let Some(slot) = self.overlays.get_mut(index) else {
            return;
        };
        match slot.state.toggle() {
            OverlayChange::Opened { token } => {
                dom::add_class(&slot.container, "zoomed");
                let close = Closure::once_into_js(move || {
                    with_site(|site| site.auto_close_overlay(index, token));
                });
                slot.timeout = set_timeout(&close, delay);
                log::debug!("overlay {} opened", slot.container.id());
            }
            OverlayChange::Closed { .. } => {
                if let (Some(handle), Some(w)) = (slot.timeout.take(), web_sys::window()) {
                    w.clear_timeout_with_handle(handle);
                }
                dom::remove_class(&slot.container, "zoomed");
                log::debug!("overlay {} closed, timer cleared", slot.container.id());
            }
        }
    }

    fn auto_close_overlay(&mut self, index: usize, token: u32) {
        let Some(slot) = self.overlays.get_mut(index) else {
            return;
        };
        if slot.state.auto_close(token) {
            slot.timeout = None;
            dom::remove_class(&slot.container, "zoomed");
            log::debug!("overlay {} auto-closed", slot.container.id());
        }
    }

    fn render_menu(&self) {
        if let Some(list) = &self.menu_list {
            if self.menu.is_open() {
                dom::add_class(list, "menuShow");
            } else {
                dom::remove_class(list, "menuShow");
            }
        }
        if let Some(icon) = &self.ham_icon {
            icon.set_inner_html(self.menu.label());
        }
    }

    fn select_card(&mut self, card: &Element) {
        let cards = query_all(&self.doc, ".info-card");
        let Some(index) = cards.iter().position(|c| c == card) else {
            return;
        };
        let selected = self.cards.click(index);
        for (i, c) in cards.iter().enumerate() {
            if Some(i) == selected {
                dom::add_class(c, "clicked");
            } else {
                dom::remove_class(c, "clicked");
            }
        }
    }
}

fn set_timeout(callback: &JsValue, delay_ms: u32) -> Option<i32> {
    let w = web_sys::window()?;
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    match w.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay) {
        Ok(handle) => Some(handle),
        Err(err) => {
            log::warn!("setTimeout failed: {err:?}");
            None
        }
    }
}
