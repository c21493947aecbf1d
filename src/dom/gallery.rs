//! The edit page's gallery of stored images: drag to reorder, click to delete.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlElement};

use super::events::{listen, target_element, target_node};
use super::form::GalleryFields;
use super::strip::{DomStrip, GALLERY_ATTR, enclosing_node};
use super::{document, optional_element};
use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::gallery::Gallery;
use crate::reorder::{Arrangement, ReorderController};

const DELETE_SELECTOR: &str = ".delete-image-btn";

pub(crate) struct GalleryWidget {
    gallery: Gallery<DomStrip, GalleryFields>,
    reorder: ReorderController,
}

type GalleryState = RwSignal<GalleryWidget, LocalStorage>;

/// Binds the stored-image gallery named by `config.gallery_id`.
///
/// Returns `Ok(false)` when the page has no gallery.
pub fn attach_gallery(config: &UploadConfig) -> Result<bool, UploadError> {
    let doc = document();
    let Some(container) =
        optional_element::<HtmlElement>(&doc, config.gallery_id.as_deref(), "an HTML element")?
    else {
        return Ok(false);
    };
    let order_field = optional_element(&doc, config.order_input_id.as_deref(), "an <input>")?;
    let deleted_field = optional_element(&doc, config.deleted_input_id.as_deref(), "an <input>")?;

    let gallery = Gallery::new(
        DomStrip::for_gallery(container.clone()),
        GalleryFields::new(order_field, deleted_field),
    );
    log::info!(
        "stored-image gallery attached ({} images)",
        gallery.order().len()
    );
    let state: GalleryState = RwSignal::new_local(GalleryWidget {
        gallery,
        reorder: ReorderController::new(config.touch_threshold_px),
    });
    wire(state, &container)?;
    Ok(true)
}

fn wire(state: GalleryState, container: &HtmlElement) -> Result<(), UploadError> {
    listen(container, "dragstart", None, move |ev| {
        let Some(node) = target_node(&ev, GALLERY_ATTR) else {
            return;
        };
        if let Some(dt) = ev.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
            dt.set_effect_allowed("move");
            let _ = dt.set_data("text/plain", &node.to_string());
        }
        state.update(|w| w.reorder.drag_start(w.gallery.strip_mut(), node));
    })?;

    listen(container, "dragover", None, move |ev| {
        let Some(target) = target_node(&ev, GALLERY_ATTR) else {
            return;
        };
        let accepted = state
            .try_update(|w| w.reorder.drag_over(w.gallery.strip_mut(), target))
            .unwrap_or(false);
        if accepted {
            ev.prevent_default();
        }
    })?;

    listen(container, "dragleave", None, move |ev| {
        if let Some(target) = target_node(&ev, GALLERY_ATTR) {
            state.update(|w| w.reorder.drag_leave(w.gallery.strip_mut(), target));
        }
    })?;

    listen(container, "drop", None, move |ev| {
        ev.prevent_default();
        if let Some(target) = target_node(&ev, GALLERY_ATTR) {
            state.update(|w| {
                w.reorder.drop_on(&mut w.gallery, target);
            });
        }
    })?;

    listen(container, "dragend", None, move |_| {
        state.update(|w| w.reorder.drag_end(w.gallery.strip_mut()));
    })?;

    listen(container, "click", None, move |ev| {
        let Some(el) = target_element(&ev) else {
            return;
        };
        let Ok(Some(button)) = el.closest(DELETE_SELECTOR) else {
            return;
        };
        ev.prevent_default();
        if let Some(node) = enclosing_node(&button, GALLERY_ATTR) {
            state.update(|w| {
                w.gallery.delete(node);
            });
        }
    })
}
