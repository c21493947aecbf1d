use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, CanvasRenderingContext2d, File, HtmlCanvasElement, HtmlElement, ImageBitmap};

use super::{WidgetState, document, js_err, window};
use crate::error::UploadError;
use crate::reservation::Ticket;

/// Attribute marking the per-thumbnail delete button.
pub(crate) const REMOVE_ATTR: &str = "data-upload-remove";

const THUMB_SIDE_PX: f64 = 96.0;

async fn create_image_bitmap_from_file(file: &File) -> Result<ImageBitmap, UploadError> {
    let blob: &Blob = file.as_ref();
    let promise = window().create_image_bitmap_with_blob(blob).map_err(js_err)?;
    let js = JsFuture::from(promise)
        .await
        .map_err(|err| UploadError::Decode(format!("{err:?}")))?;
    js.dyn_into::<ImageBitmap>().map_err(js_err)
}

/// Decodes the ticket's file, then either shows its thumbnail or gives the
/// slot back. The decode is the only await point.
pub(crate) async fn materialize(state: WidgetState, ticket: Ticket<File>) {
    let built = match create_image_bitmap_from_file(ticket.file()).await {
        Ok(bitmap) => {
            let node = build_node(ticket.file(), &bitmap);
            bitmap.close();
            node
        }
        Err(err) => Err(err),
    };

    state.update(|w| match built {
        Ok(node) => {
            let key = ticket.key().clone();
            if let Err(err) = w.collection.complete(ticket, node) {
                log::warn!("thumbnail for {key} not shown: {err}");
            }
        }
        Err(err) => {
            log::warn!("no thumbnail for {}: {err}", ticket.key());
            w.collection.abort(ticket);
        }
    });
}

fn build_node(file: &File, bitmap: &ImageBitmap) -> Result<HtmlElement, UploadError> {
    let doc = document();

    let wrapper: HtmlElement = doc
        .create_element("div")
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    wrapper.set_class_name("relative inline-block m-1 group");
    wrapper.set_draggable(true);
    wrapper.set_title(&file.name());
    wrapper.set_attribute("aria-label", &file.name()).map_err(js_err)?;

    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    canvas.set_class_name("rounded border");
    draw_cover(&canvas, bitmap)?;
    wrapper.append_child(&canvas).map_err(js_err)?;

    let remove = doc.create_element("button").map_err(js_err)?;
    remove.set_attribute("type", "button").map_err(js_err)?;
    remove.set_attribute(REMOVE_ATTR, "").map_err(js_err)?;
    remove.set_attribute("title", "Remove image").map_err(js_err)?;
    remove.set_attribute("aria-label", "Remove image").map_err(js_err)?;
    remove.set_class_name(
        "absolute top-0 right-0 w-6 h-6 bg-white rounded-full shadow cursor-pointer \
         opacity-0 group-hover:opacity-100 transition-opacity",
    );
    remove.set_text_content(Some("×"));
    wrapper.append_child(&remove).map_err(js_err)?;

    Ok(wrapper)
}

/// Draws `bitmap` center-cropped to fill a square canvas.
fn draw_cover(canvas: &HtmlCanvasElement, bitmap: &ImageBitmap) -> Result<(), UploadError> {
    let dpr = window().device_pixel_ratio();
    canvas
        .style()
        .set_property("width", &format!("{THUMB_SIDE_PX}px"))
        .and_then(|_| canvas.style().set_property("height", &format!("{THUMB_SIDE_PX}px")))
        .map_err(js_err)?;
    let side = (THUMB_SIDE_PX * dpr).round().max(1.0);
    canvas.set_width(side as u32);
    canvas.set_height(side as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| UploadError::Dom("2d context unavailable".to_string()))?
        .dyn_into()
        .map_err(js_err)?;

    let (w, h) = (bitmap.width() as f64, bitmap.height() as f64);
    if w < 1.0 || h < 1.0 {
        return Err(UploadError::Decode("image has no pixels".to_string()));
    }
    let crop = w.min(h);
    ctx.draw_image_with_image_bitmap_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        bitmap,
        (w - crop) / 2.0,
        (h - crop) / 2.0,
        crop,
        crop,
        0.0,
        0.0,
        side,
        side,
    )
    .map_err(js_err)
}
