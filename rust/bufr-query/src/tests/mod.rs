use bufr_format::TypeInfo;
use bufr_frame::Frames;

use crate::{ResultSet, Target};

mod error_tests;
mod filter_tests;

fn repeated_target(name: &str, seq: &str, path: &str, type_info: TypeInfo) -> Target {
    Target::parse(name, &[path], type_info)
        .unwrap()
        .with_dim_paths(&["*", seq])
        .unwrap()
}

fn scalar_target(name: &str, path: &str, type_info: TypeInfo) -> Target {
    Target::parse(name, &[path], type_info).unwrap()
}

fn result_set(targets: Vec<Target>, frames: Frames) -> ResultSet {
    ResultSet::new(targets, frames).unwrap()
}
