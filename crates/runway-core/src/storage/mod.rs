//! Snapshot persistence and export.

mod json;
mod md;
mod store;

pub use json::{
    MAX_PERIODS, MAX_SNAPSHOT_BYTES, parse_snapshot, parse_snapshot_content, write_snapshot,
    write_snapshot_content,
};
pub use md::{write_markdown, write_markdown_content};
pub use store::FileStore;
