use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::js_err;
use crate::error::UploadError;
use crate::strip::{Cue, NodeId, Strip};

/// Attribute every thumbnail wrapper carries its [`NodeId`] in.
pub(crate) const NODE_ATTR: &str = "data-upload-node";

/// Attribute the server puts on each stored image in the edit-page gallery.
pub(crate) const GALLERY_ATTR: &str = "data-image-idx";

const DRAG_OPACITY: &str = "0.5";
const TARGET_BORDER: &str = "2px dashed #888";

/// The strip container element; its children are the thumbnails.
pub struct DomStrip {
    container: HtmlElement,
    attr: &'static str,
}

impl DomStrip {
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            attr: NODE_ATTR,
        }
    }

    /// A server-rendered gallery whose children carry `data-image-idx`.
    pub fn for_gallery(container: HtmlElement) -> Self {
        Self {
            container,
            attr: GALLERY_ATTR,
        }
    }

    fn node(&self, id: NodeId) -> Option<HtmlElement> {
        let attr = self.attr;
        self.container
            .query_selector(&format!("[{attr}=\"{id}\"]"))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn style_cue(node: &HtmlElement, cue: Cue) {
        let style = node.style();
        let _ = match cue {
            Cue::Dragging => style.set_property("opacity", DRAG_OPACITY),
            Cue::DropTarget => style.set_property("outline", TARGET_BORDER),
            Cue::None => style
                .remove_property("opacity")
                .and_then(|_| style.remove_property("outline"))
                .map(|_| ()),
        };
    }
}

/// Reads the node id `attr` holds on a wrapper.
pub(crate) fn node_id_of(el: &Element, attr: &str) -> Option<NodeId> {
    el.get_attribute(attr)?.parse().ok()
}

/// Finds the wrapper carrying `attr` that an event target sits in.
pub(crate) fn enclosing_node(el: &Element, attr: &str) -> Option<NodeId> {
    let node = el.closest(&format!("[{attr}]")).ok()??;
    node_id_of(&node, attr)
}

impl Strip for DomStrip {
    type Node = HtmlElement;

    fn children(&self) -> Vec<NodeId> {
        let children = self.container.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter_map(|el| node_id_of(&el, self.attr))
            .collect()
    }

    fn append(&mut self, id: NodeId, node: HtmlElement) -> Result<(), UploadError> {
        node.set_attribute(self.attr, &id.to_string()).map_err(js_err)?;
        self.container.append_child(&node).map_err(js_err)?;
        Ok(())
    }

    fn remove(&mut self, id: NodeId) -> bool {
        match self.node(id) {
            Some(node) => {
                node.remove();
                true
            }
            None => false,
        }
    }

    fn insert_before(&mut self, id: NodeId, reference: NodeId) {
        if let (Some(node), Some(reference)) = (self.node(id), self.node(reference)) {
            let _ = self.container.insert_before(&node, Some(&reference));
        }
    }

    fn insert_after(&mut self, id: NodeId, reference: NodeId) {
        if let (Some(node), Some(reference)) = (self.node(id), self.node(reference)) {
            let next = reference.next_sibling();
            let _ = self.container.insert_before(&node, next.as_ref());
        }
    }

    fn set_cue(&mut self, id: NodeId, cue: Cue) {
        if let Some(node) = self.node(id) {
            Self::style_cue(&node, cue);
        }
    }

    fn clear_cues(&mut self) {
        let children = self.container.children();
        for i in 0..children.length() {
            if let Some(node) = children.item(i).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
                Self::style_cue(&node, Cue::None);
            }
        }
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self.container.class_list().toggle_with_force("hidden", !visible);
    }
}
