pub mod artifact;

pub use artifact::{ArtifactWriter, GenomeSnapshot};
