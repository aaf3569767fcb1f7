//! I/O operations for reading and writing grayscale images

mod native;

pub use native::{output_path, read_grayscale, write_grayscale};
