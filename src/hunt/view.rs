//! Browser driver for the hunt: binds the game-page controls, renders fish as
//! absolutely positioned `div.fish` sprites and pumps the engine from a
//! `requestAnimationFrame` loop.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, MouseEvent, window};

use super::{
    ACTIVE_INSTRUCTION, ENDED_INSTRUCTION, EntityId, FieldSize, HuntEngine, HuntEvent,
    IDLE_INSTRUCTION, Vec2,
};
use crate::config::HuntConfig;
use crate::dom::{self, by_id, now_ms, query, set_display, set_text};
use crate::error::SiteResult;

struct Sprite {
    el: HtmlElement,
    // Dropping the closure detaches the JS callback, so it lives with the sprite.
    _on_click: Closure<dyn FnMut(MouseEvent)>,
}

struct HuntView {
    doc: Document,
    ground: HtmlElement,
    start_btn: Option<HtmlElement>,
    reset_btn: Option<HtmlElement>,
    instruction: Option<HtmlElement>,
    caught_display: Option<HtmlElement>,
    missed_display: Option<HtmlElement>,
    timer_display: Option<HtmlElement>,
    results: Option<HtmlElement>,
    instructions_overlay: Option<HtmlElement>,
    final_caught: Option<HtmlElement>,
    final_missed: Option<HtmlElement>,
    rating: Option<HtmlElement>,
    sprites: BTreeMap<EntityId, Sprite>,
}

struct HuntApp {
    engine: HuntEngine,
    view: HuntView,
}

thread_local! {
    static HUNT: RefCell<Option<HuntApp>> = const { RefCell::new(None) };
}

/// Attach the hunt to the game page. A page without `#hunting-ground` has no
/// game; that is not an error.
pub fn mount(doc: &Document, cfg: HuntConfig) -> SiteResult<()> {
    if HUNT.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }
    let Some(ground) = by_id::<HtmlElement>(doc, "hunting-ground") else {
        return Ok(());
    };
    let view = HuntView {
        doc: doc.clone(),
        ground,
        start_btn: by_id(doc, "start-hunt"),
        reset_btn: by_id(doc, "reset-hunt"),
        instruction: by_id(doc, "game-instruction"),
        caught_display: by_id(doc, "fish-caught"),
        missed_display: by_id(doc, "fish-missed"),
        timer_display: by_id(doc, "game-timer"),
        results: by_id(doc, "hunt-results"),
        instructions_overlay: query(doc, ".game-instructions-overlay"),
        final_caught: by_id(doc, "final-caught"),
        final_missed: by_id(doc, "final-missed"),
        rating: by_id(doc, "hunting-rating"),
        sprites: BTreeMap::new(),
    };
    let mut engine = HuntEngine::new(cfg);
    engine.set_field(view.field_size());
    view.update_counters(&engine);

    if let Some(btn) = &view.start_btn {
        on_click(btn, |app| app.engine.start(now_ms()))?;
    }
    if let Some(btn) = &view.reset_btn {
        on_click(btn, |app| app.engine.reset())?;
    }

    HUNT.with(|cell| cell.replace(Some(HuntApp { engine, view })));
    start_hunt_loop();
    Ok(())
}

/// Page-lifetime click listener that runs `action` on the engine, then syncs the DOM.
fn on_click(target: &HtmlElement, action: fn(&mut HuntApp)) -> SiteResult<()> {
    let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
        with_app(|app| {
            action(app);
            app.apply_events();
        });
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn with_app(f: impl FnOnce(&mut HuntApp)) {
    HUNT.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            f(app);
        }
    });
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_hunt_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        with_app(|app| app.frame(now_ms()));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

impl HuntApp {
    fn frame(&mut self, now: f64) {
        self.engine.set_field(self.view.field_size());
        self.engine.advance(now);
        self.apply_events();
        for fish in self.engine.entities() {
            if let Some(sprite) = self.view.sprites.get(&fish.id) {
                place(&sprite.el, fish.position);
            }
        }
    }

    fn apply_events(&mut self) {
        let events: Vec<HuntEvent> = self.engine.drain_events().collect();
        for event in events {
            self.view.apply(&event, &self.engine);
        }
    }
}

impl HuntView {
    fn field_size(&self) -> FieldSize {
        let width = f64::from(self.ground.offset_width());
        let height = f64::from(self.ground.offset_height());
        if width > 0.0 && height > 0.0 {
            FieldSize { width, height }
        } else {
            // Hidden page: keep spawning against the designed size.
            FieldSize::default()
        }
    }

    fn apply(&mut self, event: &HuntEvent, engine: &HuntEngine) {
        match event {
            HuntEvent::RoundStarted => {
                set_display(self.start_btn.as_ref(), "none");
                set_display(self.reset_btn.as_ref(), "none");
                set_display(self.results.as_ref(), "none");
                set_display(self.instructions_overlay.as_ref(), "none");
                set_text(self.instruction.as_ref(), ACTIVE_INSTRUCTION);
                self.update_counters(engine);
            }
            HuntEvent::Spawned { id, position, .. } => {
                if let Err(err) = self.spawn_sprite(*id, *position) {
                    log::warn!("could not add fish sprite: {err:?}");
                }
            }
            HuntEvent::Caught { id } => {
                if let Some(sprite) = self.sprites.get(id) {
                    dom::add_class(&sprite.el, "caught");
                }
                self.update_counters(engine);
            }
            HuntEvent::Escaped { .. } => self.update_counters(engine),
            HuntEvent::Despawned { id } => {
                if let Some(sprite) = self.sprites.remove(id) {
                    sprite.el.remove();
                }
            }
            HuntEvent::Countdown { .. } => {
                set_text(self.timer_display.as_ref(), &engine.round().timer_text());
            }
            HuntEvent::RoundEnded { rating, .. } => {
                let round = engine.round();
                set_text(self.final_caught.as_ref(), &round.caught_text());
                set_text(self.final_missed.as_ref(), &round.missed_text());
                set_text(self.rating.as_ref(), rating.label());
                set_display(self.results.as_ref(), "block");
                set_display(self.reset_btn.as_ref(), "inline-block");
                set_text(self.instruction.as_ref(), ENDED_INSTRUCTION);
            }
            HuntEvent::Reset => {
                set_display(self.results.as_ref(), "none");
                set_display(self.start_btn.as_ref(), "inline-block");
                set_display(self.reset_btn.as_ref(), "none");
                set_display(self.instructions_overlay.as_ref(), "block");
                set_text(self.instruction.as_ref(), IDLE_INSTRUCTION);
                self.update_counters(engine);
            }
        }
    }

    fn update_counters(&self, engine: &HuntEngine) {
        let round = engine.round();
        set_text(self.caught_display.as_ref(), &round.caught_text());
        set_text(self.missed_display.as_ref(), &round.missed_text());
        set_text(self.timer_display.as_ref(), &round.timer_text());
    }

    fn spawn_sprite(&mut self, id: EntityId, position: Vec2) -> Result<(), JsValue> {
        let el: HtmlElement = self.doc.create_element("div")?.dyn_into()?;
        el.set_class_name("fish");
        el.set_inner_html("🐟");
        el.style().set_property("position", "absolute")?;
        place(&el, position);

        let on_click = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            with_app(|app| {
                app.engine.catch(id, now_ms());
                app.apply_events();
            });
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        self.ground.append_child(&el)?;
        self.sprites.insert(id, Sprite { el, _on_click: on_click });
        Ok(())
    }
}

fn place(el: &HtmlElement, position: Vec2) {
    let style = el.style();
    style.set_property("left", &format!("{}px", position.x)).ok();
    style.set_property("top", &format!("{}px", position.y)).ok();
}
