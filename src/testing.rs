use std::collections::HashMap;

use crate::collection::FormSink;
use crate::error::UploadError;
use crate::identity::FileHandle;
use crate::strip::{Cue, NodeId, Strip};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl TestFile {
    pub fn image(name: &str, size: u64) -> Self {
        Self::other(name, size, "image/jpeg")
    }

    pub fn other(name: &str, size: u64, mime: &str) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime: mime.to_string(),
        }
    }
}

impl FileHandle for TestFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime(&self) -> String {
        self.mime.clone()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStrip {
    pub children: Vec<NodeId>,
    pub cues: HashMap<NodeId, Cue>,
    pub visible: bool,
    /// Makes every `append` fail, the way a detached DOM node would.
    pub refuse_appends: bool,
}

impl MemoryStrip {
    pub fn with_children(raw: &[u64]) -> Self {
        Self {
            children: raw.iter().copied().map(NodeId::from_raw).collect(),
            ..Self::default()
        }
    }

    pub fn cue(&self, id: NodeId) -> Cue {
        self.cues.get(&id).copied().unwrap_or(Cue::None)
    }

    fn take(&mut self, id: NodeId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| *child != id);
        self.children.len() != before
    }
}

impl Strip for MemoryStrip {
    type Node = ();

    fn children(&self) -> Vec<NodeId> {
        self.children.clone()
    }

    fn append(&mut self, id: NodeId, _node: ()) -> Result<(), UploadError> {
        if self.refuse_appends {
            return Err(UploadError::Dom(format!("node {id} refused")));
        }
        self.children.push(id);
        Ok(())
    }

    fn remove(&mut self, id: NodeId) -> bool {
        self.cues.remove(&id);
        self.take(id)
    }

    fn insert_before(&mut self, id: NodeId, reference: NodeId) {
        if id == reference || !self.take(id) {
            return;
        }
        let at = self.position(reference).unwrap_or(self.children.len());
        self.children.insert(at, id);
    }

    fn insert_after(&mut self, id: NodeId, reference: NodeId) {
        if id == reference || !self.take(id) {
            return;
        }
        let at = self.position(reference).map_or(self.children.len(), |at| at + 1);
        self.children.insert(at, id);
    }

    fn set_cue(&mut self, id: NodeId, cue: Cue) {
        if cue == Cue::None {
            self.cues.remove(&id);
        } else {
            self.cues.insert(id, cue);
        }
    }

    fn clear_cues(&mut self) {
        self.cues.clear();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<Vec<String>>,
}

impl RecordingSink {
    pub fn last(&self) -> Vec<String> {
        self.writes.last().cloned().unwrap_or_default()
    }
}

impl FormSink<TestFile> for RecordingSink {
    fn replace(&mut self, files: &[&TestFile]) -> Result<(), UploadError> {
        self.writes
            .push(files.iter().map(|file| file.name.clone()).collect());
        Ok(())
    }
}
