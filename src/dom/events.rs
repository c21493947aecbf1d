//! Listener wiring for one widget.
//!
//! Thumbnail events are delegated to the strip container, so thumbnails
//! appended later need no listeners of their own.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, DragEvent, Element, Event, EventTarget, HtmlElement,
    HtmlInputElement, Touch, TouchEvent,
};

use super::form::file_list_to_vec;
use super::strip::{NODE_ATTR, enclosing_node};
use super::thumbnail::{self, REMOVE_ATTR};
use super::{WidgetState, document, js_err};
use crate::collection::Source;
use crate::error::UploadError;
use crate::reorder::{TouchEnd, TouchMove};
use crate::strip::NodeId;

const DROP_HOVER: [&str; 2] = ["border-blue-400", "bg-blue-50"];

pub(crate) fn listen(
    target: &EventTarget,
    name: &str,
    passive: Option<bool>,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), UploadError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
    match passive {
        Some(passive) => {
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    name, callback, &options,
                )
                .map_err(js_err)?;
        }
        None => target
            .add_event_listener_with_callback(name, callback)
            .map_err(js_err)?,
    }
    closure.forget();
    Ok(())
}

pub(crate) fn target_element(ev: &Event) -> Option<Element> {
    ev.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn target_node(ev: &Event, attr: &str) -> Option<NodeId> {
    enclosing_node(&target_element(ev)?, attr)
}

/// Hit-tests the point, since touch events stay targeted at the element the
/// touch started on.
fn node_at(strip: &HtmlElement, touch: &Touch) -> Option<NodeId> {
    let el = document().element_from_point(touch.client_x() as f32, touch.client_y() as f32)?;
    if !strip.contains(Some(el.as_ref())) {
        return None;
    }
    enclosing_node(&el, NODE_ATTR)
}

fn admit_and_render(state: WidgetState, files: Vec<web_sys::File>, source: Source) {
    let tickets = state
        .try_update(|w| w.admit(files, source))
        .unwrap_or_default();
    for ticket in tickets {
        wasm_bindgen_futures::spawn_local(thumbnail::materialize(state, ticket));
    }
}

pub(crate) fn wire(
    state: WidgetState,
    input: &HtmlInputElement,
    strip: &HtmlElement,
    area: &HtmlElement,
) -> Result<(), UploadError> {
    wire_picker(state, input)?;
    wire_upload_area(state, input, area)?;
    wire_pointer_reorder(state, strip)?;
    wire_touch_reorder(state, strip)?;
    Ok(())
}

fn wire_picker(state: WidgetState, input: &HtmlInputElement) -> Result<(), UploadError> {
    let picker = input.clone();
    listen(input, "change", None, move |_| {
        let files = picker
            .files()
            .map(|files| file_list_to_vec(&files))
            .unwrap_or_default();
        if files.is_empty() {
            // A cancelled picker clears the input; put the collection back.
            state.update(|w| w.collection.resync());
            return;
        }
        admit_and_render(state, files, Source::Picker);
    })
}

fn wire_upload_area(
    state: WidgetState,
    input: &HtmlInputElement,
    area: &HtmlElement,
) -> Result<(), UploadError> {
    let picker = input.clone();
    listen(area, "click", None, move |ev| {
        if let Some(el) = target_element(&ev)
            && el.is_same_node(Some(picker.as_ref()))
        {
            return;
        }
        if state.with_untracked(|w| w.collection.can_admit()) {
            picker.click();
        }
    })?;

    let hover = area.clone();
    listen(area, "dragover", None, move |ev| {
        ev.prevent_default();
        if !state.with_untracked(|w| w.reorder.is_active()) {
            let _ = hover.class_list().add_2(DROP_HOVER[0], DROP_HOVER[1]);
        }
    })?;

    let hover = area.clone();
    listen(area, "dragleave", None, move |_| {
        let _ = hover.class_list().remove_2(DROP_HOVER[0], DROP_HOVER[1]);
    })?;

    let hover = area.clone();
    listen(area, "drop", None, move |ev| {
        ev.prevent_default();
        let _ = hover.class_list().remove_2(DROP_HOVER[0], DROP_HOVER[1]);
        if state.with_untracked(|w| w.reorder.is_active()) {
            return;
        }
        let Some(ev) = ev.dyn_ref::<DragEvent>() else {
            return;
        };
        let files = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .map(|files| file_list_to_vec(&files))
            .unwrap_or_default();
        if !files.is_empty() {
            admit_and_render(state, files, Source::Drop);
        }
    })
}

fn wire_pointer_reorder(state: WidgetState, strip: &HtmlElement) -> Result<(), UploadError> {
    listen(strip, "dragstart", None, move |ev| {
        let Some(node) = target_node(&ev, NODE_ATTR) else {
            return;
        };
        if let Some(dt) = ev.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
            dt.set_effect_allowed("move");
            // Firefox will not start a drag without data.
            let _ = dt.set_data("text/plain", &node.to_string());
        }
        state.update_untracked(|w| w.reorder.drag_start(w.collection.strip_mut(), node));
    })?;

    listen(strip, "dragover", None, move |ev| {
        let Some(target) = target_node(&ev, NODE_ATTR) else {
            return;
        };
        let accepted = state
            .try_update_untracked(|w| w.reorder.drag_over(w.collection.strip_mut(), target))
            .unwrap_or(false);
        if accepted {
            ev.prevent_default();
            if let Some(dt) = ev.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
                dt.set_drop_effect("move");
            }
        }
    })?;

    listen(strip, "dragleave", None, move |ev| {
        if let Some(target) = target_node(&ev, NODE_ATTR) {
            state.update_untracked(|w| w.reorder.drag_leave(w.collection.strip_mut(), target));
        }
    })?;

    listen(strip, "drop", None, move |ev| {
        if !state.with_untracked(|w| w.reorder.is_active()) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        if let Some(target) = target_node(&ev, NODE_ATTR) {
            state.update(|w| {
                w.reorder.drop_on(&mut w.collection, target);
            });
        }
    })?;

    listen(strip, "dragend", None, move |_| {
        state.update_untracked(|w| w.reorder.drag_end(w.collection.strip_mut()));
    })?;

    listen(strip, "click", None, move |ev| {
        let Some(el) = target_element(&ev) else {
            return;
        };
        let Ok(Some(button)) = el.closest(&format!("[{REMOVE_ATTR}]")) else {
            return;
        };
        // Keep the upload area from treating this as "open the picker".
        ev.stop_propagation();
        ev.prevent_default();
        if let Some(node) = enclosing_node(&button, NODE_ATTR) {
            state.update(|w| {
                w.collection.remove(node);
            });
        }
    })
}

fn wire_touch_reorder(state: WidgetState, strip: &HtmlElement) -> Result<(), UploadError> {
    listen(strip, "touchstart", Some(true), move |ev| {
        let Some(tev) = ev.dyn_ref::<TouchEvent>() else {
            return;
        };
        if tev.touches().length() != 1 {
            state.update_untracked(|w| w.reorder.touch_cancel(w.collection.strip_mut()));
            return;
        }
        let Some(el) = target_element(&ev) else {
            return;
        };
        if matches!(el.closest(&format!("[{REMOVE_ATTR}]")), Ok(Some(_))) {
            return;
        }
        let (Some(node), Some(touch)) = (enclosing_node(&el, NODE_ATTR), tev.touches().item(0)) else {
            return;
        };
        let (x, y) = (touch.client_x() as f64, touch.client_y() as f64);
        state.update_untracked(|w| w.reorder.touch_start(w.collection.strip_mut(), node, x, y));
    })?;

    // Non-passive so a recognized drag can stop the page from scrolling.
    let container = strip.clone();
    listen(strip, "touchmove", Some(false), move |ev| {
        let Some(touch) = ev
            .dyn_ref::<TouchEvent>()
            .and_then(|tev| tev.touches().item(0))
        else {
            return;
        };
        let (x, y) = (touch.client_x() as f64, touch.client_y() as f64);
        let hit = node_at(&container, &touch);
        let outcome = state
            .try_update_untracked(|w| w.reorder.touch_move(w.collection.strip_mut(), x, y, hit))
            .unwrap_or(TouchMove::Ignored);
        if outcome == TouchMove::Dragging {
            ev.prevent_default();
        }
    })?;

    let container = strip.clone();
    listen(strip, "touchend", Some(false), move |ev| {
        let hit = ev
            .dyn_ref::<TouchEvent>()
            .and_then(|tev| tev.changed_touches().item(0))
            .and_then(|touch| node_at(&container, &touch));
        let outcome = state
            .try_update(|w| w.reorder.touch_end(&mut w.collection, hit))
            .unwrap_or(TouchEnd::Ignored);
        if let TouchEnd::Dropped { .. } = outcome {
            // Swallow the synthetic click a finished drag would produce.
            ev.prevent_default();
        }
    })?;

    listen(strip, "touchcancel", Some(true), move |_| {
        state.update_untracked(|w| w.reorder.touch_cancel(w.collection.strip_mut()));
    })
}
