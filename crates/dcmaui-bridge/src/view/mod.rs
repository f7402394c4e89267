mod registry;

pub use registry::{ViewEntry, ViewRegistry};
