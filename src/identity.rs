//! Duplicate detection by file name and byte size.
//!
//! Two distinct files that share both name and size are treated as the same
//! file. File bytes are never read to tell them apart.

use std::fmt;

/// The `(name, byte size)` pair a file is deduplicated by.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    name: String,
    size: u64,
}

impl IdentityKey {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}

/// A user-selected file as seen by the collection.
pub trait FileHandle: Clone {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    /// MIME type as reported by the platform, possibly empty.
    fn mime(&self) -> String;

    fn key(&self) -> IdentityKey {
        IdentityKey::new(self.name(), self.size())
    }

    fn is_image(&self) -> bool {
        self.mime().starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestFile;

    #[test]
    fn same_name_and_size_is_the_same_key() {
        let a = TestFile::image("a.jpg", 100);
        let b = TestFile::image("a.jpg", 100);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn size_or_name_difference_breaks_identity() {
        let a = TestFile::image("a.jpg", 100);
        assert_ne!(a.key(), TestFile::image("a.jpg", 101).key());
        assert_ne!(a.key(), TestFile::image("b.jpg", 100).key());
    }

    #[test]
    fn mime_gates_image_check() {
        assert!(TestFile::image("a.png", 1).is_image());
        assert!(!TestFile::other("notes.txt", 1, "text/plain").is_image());
        assert!(!TestFile::other("blob", 1, "").is_image());
    }

    #[test]
    fn key_displays_name_and_size() {
        assert_eq!(IdentityKey::new("a.jpg", 100).to_string(), "a.jpg (100 bytes)");
    }
}
