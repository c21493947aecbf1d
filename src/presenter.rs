//! User-facing text for the upload area, derived from the collection size.

use std::fmt;

/// What the upload area should say for a given collection size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPrompt {
    Empty { max_count: usize },
    AddMore { count: usize, remaining: usize },
    Full { max_count: usize },
}

impl UploadPrompt {
    pub fn for_count(count: usize, max_count: usize) -> Self {
        if count >= max_count {
            Self::Full { max_count }
        } else if count == 0 {
            Self::Empty { max_count }
        } else {
            Self::AddMore {
                count,
                remaining: max_count - count,
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "Upload Images",
            Self::AddMore { .. } => "Add More Images",
            Self::Full { .. } => "Image limit reached",
        }
    }

    pub fn detail(&self) -> String {
        match *self {
            Self::Empty { max_count } => {
                format!("Click to browse or drag and drop (up to {max_count})")
            }
            Self::AddMore { remaining: 1, .. } => "1 more image can be added".to_string(),
            Self::AddMore { remaining, .. } => format!("{remaining} more images can be added"),
            Self::Full { max_count } => {
                format!("You can upload up to {max_count} images. Remove one to add another.")
            }
        }
    }

    /// Whether the add affordance is enabled.
    pub fn can_add(&self) -> bool {
        !matches!(self, Self::Full { .. })
    }
}

/// The single summary shown when a batch only partly fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notice {
    pub skipped: usize,
    pub max_count: usize,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.skipped == 1 { "image was" } else { "images were" };
        write!(
            f,
            "{} {noun} not added: at most {} images are allowed.",
            self.skipped, self.max_count
        )
    }
}
