//! Rule file loaders.

mod text;
mod yaml;

pub use text::TextParser;
pub use yaml::{FieldSpec, YamlPolicy, YamlRule};
