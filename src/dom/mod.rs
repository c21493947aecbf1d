//! Browser bindings: attaches a [`FileCollection`] to page elements.

mod events;
mod form;
mod gallery;
mod prompt;
mod strip;
mod thumbnail;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, File, HtmlElement, HtmlInputElement, Window};

pub use form::{GalleryFields, InputSink};
pub use gallery::attach_gallery;
pub use strip::DomStrip;

use prompt::UploadPromptView;

use crate::collection::{FileCollection, Source};
use crate::config::{self, UploadConfig};
use crate::error::UploadError;
use crate::presenter::Notice;
use crate::reorder::ReorderController;
use crate::reservation::Ticket;

pub(crate) type WidgetState = RwSignal<Widget, LocalStorage>;

/// Everything one upload widget owns. One instance per attached widget.
pub(crate) struct Widget {
    pub(crate) collection: FileCollection<File, DomStrip, InputSink>,
    pub(crate) reorder: ReorderController,
    pub(crate) notice: Option<Notice>,
}

impl Widget {
    pub(crate) fn admit(&mut self, files: Vec<File>, source: Source) -> Vec<Ticket<File>> {
        let admission = self.collection.admit(files, source);
        self.notice = admission.notice();
        admission.tickets
    }
}

pub(crate) fn window() -> Window {
    web_sys::window().expect("window")
}

pub(crate) fn document() -> Document {
    window().document().expect("document")
}

pub(crate) fn js_err(err: impl Into<JsValue>) -> UploadError {
    UploadError::Dom(format!("{:?}", err.into()))
}

fn element_by_id<T: JsCast>(
    doc: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, UploadError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| UploadError::MissingElement { id: id.to_string() })?
        .dyn_into::<T>()
        .map_err(|_| UploadError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

fn optional_element<T: JsCast>(
    doc: &Document,
    id: Option<&str>,
    expected: &'static str,
) -> Result<Option<T>, UploadError> {
    match id {
        Some(id) if doc.get_element_by_id(id).is_some() => {
            element_by_id(doc, id, expected).map(Some)
        }
        _ => Ok(None),
    }
}

/// Reads the page's `MAX_IMAGES_PER_AD`. Pages declare it as a top-level
/// `const`, which is not a property of `window`, so it is resolved by name.
fn page_max_images() -> Option<f64> {
    let lookup = js_sys::Function::new_no_args(
        "return typeof MAX_IMAGES_PER_AD === 'number' ? MAX_IMAGES_PER_AD : undefined;",
    );
    lookup.call0(&JsValue::UNDEFINED).ok()?.as_f64()
}

/// Validates `config`, then applies page-level overrides: `data-max-count`
/// on the upload area wins over the `MAX_IMAGES_PER_AD` global, which wins
/// over `config.max_count`.
pub fn page_config(
    area: &HtmlElement,
    mut config: UploadConfig,
) -> Result<UploadConfig, UploadError> {
    config.validate()?;
    if let Some(raw) = area.get_attribute("data-max-count") {
        config.max_count = config::parse_max_count(&raw)?;
    } else if let Some(value) = page_max_images() {
        config.max_count = config::max_count_from_number(value)?;
    }
    if let Some(raw) = area.get_attribute("data-filter-images") {
        config.filter_picker_to_images = config::parse_flag(&raw);
    }
    Ok(config)
}

/// Binds one upload widget to the elements named in `config`.
///
/// Nothing is attached when a required element is missing or the
/// configuration is invalid.
pub fn attach(config: UploadConfig) -> Result<(), UploadError> {
    config.validate()?;
    let doc = document();
    let input: HtmlInputElement = element_by_id(&doc, &config.input_id, "an <input>")?;
    let strip_el: HtmlElement = element_by_id(&doc, &config.strip_id, "an HTML element")?;
    let area: HtmlElement = element_by_id(&doc, &config.upload_area_id, "an HTML element")?;
    let prompt_el: Option<HtmlElement> =
        optional_element(&doc, config.prompt_id.as_deref(), "an HTML element")?;
    // With a stored-image gallery on the page the order field is the gallery's.
    let gallery_on_page = config
        .gallery_id
        .as_deref()
        .is_some_and(|id| doc.get_element_by_id(id).is_some());
    let order_field: Option<HtmlInputElement> = if gallery_on_page {
        None
    } else {
        optional_element(&doc, config.order_input_id.as_deref(), "an <input>")?
    };

    let config = page_config(&area, config)?;

    let collection = FileCollection::new(
        config.max_count,
        DomStrip::new(strip_el.clone()),
        InputSink::new(input.clone(), order_field),
    )
    .with_picker_filter(config.filter_picker_to_images);

    let state: WidgetState = RwSignal::new_local(Widget {
        collection,
        reorder: ReorderController::new(config.touch_threshold_px),
        notice: None,
    });
    state.update(|w| w.collection.resync());

    events::wire(state, &input, &strip_el, &area)?;

    if let Some(prompt_el) = prompt_el {
        prompt_el.set_inner_html("");
        leptos::mount::mount_to(prompt_el, move || {
            view! { <UploadPromptView state=state /> }
        })
        .forget();
    }

    log::info!(
        "image uploader attached to #{} (max {})",
        config.strip_id,
        config.max_count
    );
    Ok(())
}

/// Attaches the gallery, if the page has one, and the upload widget once the
/// document has been parsed.
pub fn attach_when_ready(config: UploadConfig) {
    let doc = document();
    if doc.ready_state() != "loading" {
        attach_page(config);
        return;
    }
    let mut config = Some(config);
    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Some(config) = config.take() {
            attach_page(config);
        }
    });
    if let Err(err) = doc
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
        .map_err(js_err)
    {
        log::warn!("image uploader not attached: {err}");
    }
    closure.forget();
}

fn attach_page(config: UploadConfig) {
    if let Err(err) = attach_gallery(&config) {
        log::warn!("stored-image gallery not attached: {err}");
    }
    report(attach(config));
}

fn report(result: Result<(), UploadError>) {
    if let Err(err) = result {
        log::warn!("image uploader not attached: {err}");
    }
}
