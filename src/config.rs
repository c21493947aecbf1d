use crate::error::UploadError;
use crate::reorder::DEFAULT_TOUCH_THRESHOLD_PX;

pub const DEFAULT_MAX_COUNT: usize = 5;

/// Per-widget settings. Element ids name the page elements the widget
/// attaches to.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadConfig {
    pub max_count: usize,
    pub input_id: String,
    pub strip_id: String,
    pub upload_area_id: String,
    /// Where the prompt text is rendered. Optional.
    pub prompt_id: Option<String>,
    /// Hidden field that receives the comma-joined 1-based order. Optional.
    pub order_input_id: Option<String>,
    pub touch_threshold_px: f64,
    pub filter_picker_to_images: bool,
    /// Container of stored images on an edit page. When it is on the page
    /// the order field belongs to the gallery and the uploader leaves it alone.
    pub gallery_id: Option<String>,
    /// Hidden field that receives the comma-joined deleted stored indices.
    pub deleted_input_id: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            input_id: "images".to_string(),
            strip_id: "image-preview".to_string(),
            upload_area_id: "upload-area".to_string(),
            prompt_id: Some("upload-content".to_string()),
            order_input_id: Some("image_order".to_string()),
            touch_threshold_px: DEFAULT_TOUCH_THRESHOLD_PX,
            filter_picker_to_images: false,
            gallery_id: Some("image-gallery".to_string()),
            deleted_input_id: Some("deleted_images".to_string()),
        }
    }
}

impl UploadConfig {
    pub fn with_max_count(mut self, max_count: usize) -> Result<Self, UploadError> {
        if max_count == 0 {
            return Err(UploadError::InvalidMaxCount("0".to_string()));
        }
        self.max_count = max_count;
        Ok(self)
    }

    /// Rejects settings no widget can work with.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.max_count == 0 {
            return Err(UploadError::InvalidMaxCount(self.max_count.to_string()));
        }
        Ok(())
    }
}

/// Parses a `data-max-count` style attribute value.
pub fn parse_max_count(raw: &str) -> Result<usize, UploadError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(UploadError::InvalidMaxCount(raw.to_string())),
    }
}

/// Accepts a numeric page global such as `MAX_IMAGES_PER_AD`.
pub fn max_count_from_number(value: f64) -> Result<usize, UploadError> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 {
        Ok(value as usize)
    } else {
        Err(UploadError::InvalidMaxCount(value.to_string()))
    }
}

/// Parses a boolean data attribute; anything but `true`/`1`/empty is off.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "" | "true" | "1")
}
