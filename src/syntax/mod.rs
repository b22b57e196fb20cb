//! Text to tree: the reader stage of the pipeline.

pub mod reader;

pub use reader::{read, read_all, Reader};
