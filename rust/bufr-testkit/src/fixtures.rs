//! Builders for hand-written frame collections.

use bufr_format::Query;
use bufr_frame::{Data, FieldData, FrameBuilder, Frames};

/// Accumulates fields per frame and builds a [`Frames`] collection.
///
/// Frames are addressed by index; a frame receiving no field is still part of the
/// collection (every field is absent from it).
///
/// # Panics
///
/// The methods panic on malformed input (bad query strings, inconsistent counts,
/// duplicate paths), which is the desired failure mode in tests.
pub struct FramesBuilder {
    frames: Vec<FrameBuilder>,
}

impl FramesBuilder {
    pub fn new(frame_count: usize) -> FramesBuilder {
        FramesBuilder {
            frames: (0..frame_count).map(|_| FrameBuilder::new()).collect(),
        }
    }

    /// Adds a value without repeat levels.
    pub fn scalar(self, frame: usize, path: &str, value: f64) -> FramesBuilder {
        self.field(
            frame,
            path,
            FieldData::scalar(vec![value]).expect("scalar field"),
        )
    }

    /// Adds a string value without repeat levels.
    pub fn string(self, frame: usize, path: &str, value: &str) -> FramesBuilder {
        self.field(
            frame,
            path,
            FieldData::scalar(vec![value]).expect("string field"),
        )
    }

    /// Adds a value repeated once per occurrence of the sequence `seq`.
    pub fn repeated(self, frame: usize, seq: &str, path: &str, values: Vec<f64>) -> FramesBuilder {
        let counts = vec![vec![values.len()]];
        self.nested(frame, &["*", seq], path, counts, values)
    }

    /// Adds string values repeated once per occurrence of the sequence `seq`.
    pub fn repeated_strings(
        self,
        frame: usize,
        seq: &str,
        path: &str,
        values: Vec<&str>,
    ) -> FramesBuilder {
        let counts = vec![vec![values.len()]];
        let dim_paths = dim_paths(&["*", seq]);
        self.field(
            frame,
            path,
            FieldData::new(Data::from(values), counts, dim_paths).expect("repeated field"),
        )
    }

    /// Adds a value with arbitrary repeat levels.
    pub fn nested(
        self,
        frame: usize,
        dims: &[&str],
        path: &str,
        counts: Vec<Vec<usize>>,
        values: Vec<f64>,
    ) -> FramesBuilder {
        let field = FieldData::new(values, counts, dim_paths(dims)).expect("nested field");
        self.field(frame, path, field)
    }

    pub fn field(mut self, frame: usize, path: &str, field: FieldData) -> FramesBuilder {
        self.frames[frame].add(path, field).expect("add field");
        self
    }

    pub fn build(self) -> Frames {
        self.frames.into_iter().map(FrameBuilder::build).collect()
    }
}

/// One frame per entry holding `value` at `path`, `None` entries leaving the path absent.
pub fn scalar_frames(path: &str, values: &[Option<f64>]) -> Frames {
    values
        .iter()
        .enumerate()
        .fold(FramesBuilder::new(values.len()), |builder, (frame, value)| {
            match value {
                Some(value) => builder.scalar(frame, path, *value),
                None => builder,
            }
        })
        .build()
}

/// One frame per entry holding the values at `path` repeated along `seq`, `None`
/// entries leaving the path absent.
pub fn repeated_frames(seq: &str, path: &str, values: &[Option<Vec<f64>>]) -> Frames {
    values
        .iter()
        .enumerate()
        .fold(FramesBuilder::new(values.len()), |builder, (frame, values)| {
            match values {
                Some(values) => builder.repeated(frame, seq, path, values.clone()),
                None => builder,
            }
        })
        .build()
}

pub fn dim_paths(dims: &[&str]) -> Vec<Query> {
    dims.iter()
        .map(|dim| Query::parse(dim).expect("dim path"))
        .collect()
}
