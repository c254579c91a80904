//! Seeded generation of jagged frame collections.
//!
//! Generated collections hold one repeated numeric field whose repeat counts vary
//! randomly per frame and per enclosing instance, plus a scalar key field usable for
//! grouping. Alongside the frames, the generator returns every decoded value with its
//! multi-index so that tests can check assembled outputs slot by slot.

use bufr_format::Query;
use bufr_frame::{FieldData, FrameBuilder, Frames};

/// Path of the generated scalar key field.
pub const KEY_PATH: &str = "*/KEY";

/// A generated frame collection and the values it holds.
#[derive(Debug, Clone)]
pub struct GeneratedFrames {
    pub frames: Frames,
    /// Query path of the repeated field.
    pub path: Query,
    /// Dimension paths of the repeated field, starting with the message itself.
    pub dim_paths: Vec<Query>,
    /// Per frame: every value of the repeated field with its multi-index below the
    /// frame, or `None` when the frame does not hold the field.
    pub values: Vec<Option<Vec<(Vec<usize>, f64)>>>,
    /// Per frame: the repeat counts of the repeated field, `None` when absent.
    pub counts: Vec<Option<Vec<Vec<usize>>>>,
    /// Per frame: the value of the key field (every frame holds one).
    pub keys: Vec<f64>,
}

impl GeneratedFrames {
    pub fn frame_count(&self) -> usize {
        self.values.len()
    }

    /// Largest repeat count per level over the given frames.
    pub fn max_counts_of(&self, frames: &[usize]) -> Vec<usize> {
        let mut max = vec![0usize; self.dim_paths.len() - 1];
        for counts in frames.iter().filter_map(|&f| self.counts[f].as_ref()) {
            for (m, level) in max.iter_mut().zip(counts) {
                *m = level.iter().copied().fold(*m, usize::max);
            }
        }
        max
    }

    /// Largest repeat count per level over all frames.
    pub fn max_counts(&self) -> Vec<usize> {
        self.max_counts_of(&(0..self.frame_count()).collect::<Vec<_>>())
    }
}

/// Generator of jagged frame collections.
pub struct JaggedGenerator {
    rng: fastrand::Rng,
    depth: usize,
    max_repeat: usize,
    absent_percent: u8,
    key_cardinality: u32,
}

impl JaggedGenerator {
    pub fn new(seed: u64) -> JaggedGenerator {
        JaggedGenerator {
            rng: fastrand::Rng::with_seed(seed),
            depth: 1,
            max_repeat: 4,
            absent_percent: 20,
            key_cardinality: 3,
        }
    }

    /// Number of repeat levels of the generated field (0 for a scalar field).
    pub fn with_depth(mut self, depth: usize) -> JaggedGenerator {
        self.depth = depth;
        self
    }

    /// Upper bound (inclusive) of every generated repeat count.
    pub fn with_max_repeat(mut self, max_repeat: usize) -> JaggedGenerator {
        self.max_repeat = max_repeat;
        self
    }

    /// Percentage of frames lacking the repeated field.
    pub fn with_absent_percent(mut self, percent: u8) -> JaggedGenerator {
        self.absent_percent = percent.min(100);
        self
    }

    pub fn with_key_cardinality(mut self, cardinality: u32) -> JaggedGenerator {
        self.key_cardinality = cardinality.max(1);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn generate(&mut self, frame_count: usize) -> GeneratedFrames {
        let mut dim_path = Query::root();
        let mut dim_paths = vec![dim_path.clone()];
        for level in 1..=self.depth {
            dim_path = dim_path.child(format!("L{level}"));
            dim_paths.push(dim_path.clone());
        }
        let path = dim_path.child("VAL");

        let mut frames = Frames::new();
        let mut values = Vec::with_capacity(frame_count);
        let mut frame_counts = Vec::with_capacity(frame_count);
        let mut keys = Vec::with_capacity(frame_count);

        for frame_idx in 0..frame_count {
            let mut builder = FrameBuilder::new();

            let key = self.rng.u32(0..self.key_cardinality) as f64;
            builder
                .add(KEY_PATH, FieldData::scalar(vec![key]).expect("key field"))
                .expect("add key");
            keys.push(key);

            if self.rng.u8(0..100) < self.absent_percent {
                values.push(None);
                frame_counts.push(None);
            } else {
                let (counts, indices) = self.generate_counts();
                let frame_values = (0..indices.len())
                    .map(|i| (frame_idx * 1000 + i) as f64)
                    .collect::<Vec<_>>();
                let field = if self.depth == 0 {
                    FieldData::scalar(frame_values.clone())
                } else {
                    FieldData::new(frame_values.clone(), counts.clone(), dim_paths.clone())
                }
                .expect("generated field");
                builder.add_field(&path, field).expect("add field");
                values.push(Some(indices.into_iter().zip(frame_values).collect()));
                frame_counts.push(Some(counts));
            }
            frames.push(builder.build());
        }

        GeneratedFrames {
            frames,
            path,
            dim_paths,
            values,
            counts: frame_counts,
            keys,
        }
    }

    /// Random repeat counts for one frame, with the multi-index of every value in
    /// depth-first order.
    fn generate_counts(&mut self) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let mut counts = Vec::with_capacity(self.depth);
        let mut prefixes: Vec<Vec<usize>> = vec![Vec::new()];
        for _ in 0..self.depth {
            let mut level_counts = Vec::with_capacity(prefixes.len());
            let mut next = Vec::new();
            for prefix in &prefixes {
                let count = self.rng.usize(0..=self.max_repeat);
                level_counts.push(count);
                for i in 0..count {
                    let mut index = prefix.clone();
                    index.push(i);
                    next.push(index);
                }
            }
            counts.push(level_counts);
            prefixes = next;
        }
        (counts, prefixes)
    }
}
