//! Decoded message lookup tables and the ordered frame arena.

use std::sync::Arc;

use ahash::AHashMap;
use bufr_common::{Result, error::Error};
use bufr_format::Query;

use crate::field::FieldData;

type PathToIndexMap = AHashMap<Arc<str>, usize>;

/// The lookup table of one decoded message.
///
/// Maps canonical query path strings to the [`FieldData`] the decoder collected for
/// them. A path that is not present in the table was not found in the message.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    fields: Vec<FieldData>,
    paths: Vec<Arc<str>>,
    lookup: PathToIndexMap,
}

impl Frame {
    pub fn builder() -> FrameBuilder {
        FrameBuilder::default()
    }

    /// Returns the field data stored for `query`, if the path is present.
    #[inline]
    pub fn get(&self, query: &Query) -> Option<&FieldData> {
        self.get_by_str(query.as_str())
    }

    /// Returns the field data stored under the canonical path string `path`.
    pub fn get_by_str(&self, path: &str) -> Option<&FieldData> {
        self.lookup.get(path).map(|&i| &self.fields[i])
    }

    #[inline]
    pub fn contains(&self, query: &Query) -> bool {
        self.lookup.contains_key(query.as_str())
    }

    /// Paths present in this frame, in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builds a [`Frame`] one path at a time.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    pub fn new() -> FrameBuilder {
        FrameBuilder::default()
    }

    /// Adds the data of one query path.
    ///
    /// Fails if the path was already added.
    pub fn add_field(&mut self, query: &Query, data: FieldData) -> Result<&mut Self> {
        let key: Arc<str> = Arc::from(query.as_str());
        if self.frame.lookup.contains_key(&key) {
            return Err(Error::invalid_arg(
                "query",
                format!("duplicate path '{query}' in frame"),
            ));
        }
        self.frame.lookup.insert(key.clone(), self.frame.fields.len());
        self.frame.paths.push(key);
        self.frame.fields.push(data);
        Ok(self)
    }

    /// Parses `path` and adds its data.
    pub fn add(&mut self, path: &str, data: FieldData) -> Result<&mut Self> {
        let query = Query::parse(path)?;
        self.add_field(&query, data)
    }

    pub fn build(self) -> Frame {
        self.frame
    }
}

/// An ordered arena of frames.
///
/// The index of a frame in the arena is its row in every output assembled from it.
/// Frames are only ever borrowed by the engine.
#[derive(Debug, Clone, Default)]
pub struct Frames {
    frames: Vec<Frame>,
}

impl Frames {
    pub fn new() -> Frames {
        Frames::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }
}

impl From<Vec<Frame>> for Frames {
    fn from(frames: Vec<Frame>) -> Self {
        Frames { frames }
    }
}

impl FromIterator<Frame> for Frames {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Frames {
            frames: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Frames {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl std::ops::Index<usize> for Frames {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}
