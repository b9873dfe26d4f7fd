pub mod output;

pub use output::{create_writer, render_to_string, OutputFormat, OutputWriter};
