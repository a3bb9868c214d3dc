//! DOM-backed display surface

use std::collections::HashMap;

use game_core::*;
use glam::Vec2;
use hecs::Entity;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, MouseEvent, Window};

type ClickHandler = Closure<dyn FnMut(MouseEvent)>;

struct DropElement {
    element: HtmlElement,
    on_click: ClickHandler,
}

/// Renders the round into the page's existing elements
pub struct DomSurface {
    window: Window,
    document: Document,
    container: HtmlElement,
    score: Element,
    time: Element,
    message: Element,
    start_btn: HtmlButtonElement,
    reset_btn: HtmlButtonElement,
    drops: HashMap<Entity, DropElement>,
    popups: HashMap<Entity, HtmlElement>,
    // Handlers of removed drops; a handler can remove its own drop, so it is
    // freed on the next frame rather than while it runs
    spent: Vec<ClickHandler>,
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has the wrong type", id)))
}

fn new_div(document: &Document) -> Result<HtmlElement, JsValue> {
    document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("div is not an HtmlElement"))
}

fn px(value: f32) -> String {
    format!("{}px", value)
}

impl DomSurface {
    pub fn from_window(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        Ok(Self {
            container: by_id(&document, "game-container")?,
            score: by_id(&document, "score")?,
            time: by_id(&document, "time")?,
            message: by_id(&document, "message")?,
            start_btn: by_id(&document, "start-btn")?,
            reset_btn: by_id(&document, "reset-btn")?,
            drops: HashMap::new(),
            popups: HashMap::new(),
            spent: Vec::new(),
            window,
            document,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Free click handlers of drops removed since the last frame
    pub fn release_spent(&mut self) {
        self.spent.clear();
    }

    fn build_drop(&self, entity: Entity, drop: &WaterDrop) -> Result<DropElement, JsValue> {
        let element = new_div(&self.document)?;
        element.set_class_name("water-drop");
        if drop.is_bad() {
            element.class_list().add_1("bad-drop")?;
        }

        let style = element.style();
        style.set_property("width", &px(drop.size))?;
        style.set_property("height", &px(drop.size))?;
        style.set_property("left", &px(drop.x))?;
        style.set_property("animation-duration", &format!("{}s", drop.fall_seconds))?;

        let target = element.clone();
        let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
            event.stop_propagation();
            let rect = target.get_bounding_client_rect();
            let center = Vec2::new(
                (rect.left() + rect.width() / 2.0) as f32,
                (rect.top() + rect.height() / 2.0) as f32,
            );
            crate::with_game(|game| game.catch_drop(entity, center));
        }) as Box<dyn FnMut(MouseEvent)>);
        element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        self.container.append_child(&element)?;
        Ok(DropElement { element, on_click })
    }

    fn build_popup(&self, popup: &Popup) -> Result<HtmlElement, JsValue> {
        let element = new_div(&self.document)?;
        element.set_class_name(popup.style.class_name());
        if !popup.text.is_empty() {
            element.set_text_content(Some(&popup.text));
        }

        let style = element.style();
        if let Some(pos) = popup.pos {
            style.set_property("position", "fixed")?;
            style.set_property("left", &px(pos.x))?;
            style.set_property("top", &px(pos.y))?;
        }
        if let PopupStyle::Confetti { color, size, shape } = popup.style {
            style.set_property("background", color)?;
            style.set_property("width", &px(size))?;
            style.set_property("height", &px(size))?;
            let radius = match shape {
                ConfettiShape::Circle => "50%",
                ConfettiShape::Square => "0",
            };
            style.set_property("border-radius", radius)?;
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        body.append_child(&element)?;
        Ok(element)
    }
}

impl Surface for DomSurface {
    fn container_width(&self) -> f32 {
        self.container.offset_width() as f32
    }

    fn viewport_width(&self) -> f32 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn set_score(&mut self, score: i32) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    fn set_time_left(&mut self, seconds: i32) {
        self.time.set_text_content(Some(&seconds.to_string()));
    }

    fn set_message(&mut self, text: &str) {
        self.message.set_text_content(Some(text));
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.start_btn.set_disabled(!enabled);
    }

    fn set_reset_enabled(&mut self, enabled: bool) {
        self.reset_btn.set_disabled(!enabled);
    }

    fn add_drop(&mut self, entity: Entity, drop: &WaterDrop) {
        match self.build_drop(entity, drop) {
            Ok(element) => {
                self.drops.insert(entity, element);
            }
            Err(err) => warn!("failed to add drop {:?}: {:?}", entity, err),
        }
    }

    fn remove_drop(&mut self, entity: Entity) {
        if let Some(drop) = self.drops.remove(&entity) {
            drop.element.remove();
            self.spent.push(drop.on_click);
        }
    }

    fn add_popup(&mut self, entity: Entity, popup: &Popup) {
        match self.build_popup(popup) {
            Ok(element) => {
                self.popups.insert(entity, element);
            }
            Err(err) => warn!("failed to add popup {:?}: {:?}", entity, err),
        }
    }

    fn remove_popup(&mut self, entity: Entity) {
        if let Some(element) = self.popups.remove(&entity) {
            element.remove();
        }
    }
}
