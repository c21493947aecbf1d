use web_sys::{Blob, DataTransfer, File, FileList, HtmlInputElement};

use super::js_err;
use crate::collection::FormSink;
use crate::error::UploadError;
use crate::gallery::{GallerySink, join_ids};
use crate::identity::FileHandle;
use crate::strip::NodeId;

impl FileHandle for File {
    fn name(&self) -> String {
        File::name(self)
    }

    fn size(&self) -> u64 {
        Blob::size(self).max(0.0) as u64
    }

    fn mime(&self) -> String {
        Blob::type_(self)
    }
}

pub(crate) fn file_list_to_vec(files: &FileList) -> Vec<File> {
    let mut out = Vec::new();
    for i in 0..files.length() {
        if let Some(f) = files.get(i) {
            out.push(f);
        }
    }
    out
}

/// Writes the ordered files into the native `<input type="file">`.
pub struct InputSink {
    input: HtmlInputElement,
    order_field: Option<HtmlInputElement>,
}

impl InputSink {
    pub fn new(input: HtmlInputElement, order_field: Option<HtmlInputElement>) -> Self {
        Self { input, order_field }
    }
}

impl FormSink<File> for InputSink {
    fn replace(&mut self, files: &[&File]) -> Result<(), UploadError> {
        // FileList has no constructor; a DataTransfer is the only way to build one.
        let dt = DataTransfer::new().map_err(js_err)?;
        let items = dt.items();
        for file in files {
            items.add_with_file(file).map_err(js_err)?;
        }
        self.input.set_files(dt.files().as_ref());

        if let Some(field) = &self.order_field {
            let order = (1..=files.len())
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(",");
            field.set_value(&order);
        }
        Ok(())
    }
}

/// The edit page's `image_order` and `deleted_images` hidden fields.
pub struct GalleryFields {
    order_field: Option<HtmlInputElement>,
    deleted_field: Option<HtmlInputElement>,
}

impl GalleryFields {
    pub fn new(
        order_field: Option<HtmlInputElement>,
        deleted_field: Option<HtmlInputElement>,
    ) -> Self {
        Self {
            order_field,
            deleted_field,
        }
    }
}

impl GallerySink for GalleryFields {
    fn write(&mut self, order: &[NodeId], deleted: &[NodeId]) -> Result<(), UploadError> {
        if let Some(field) = &self.order_field {
            field.set_value(&join_ids(order));
        }
        if let Some(field) = &self.deleted_field {
            field.set_value(&join_ids(deleted));
        }
        Ok(())
    }
}
