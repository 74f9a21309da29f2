pub mod graticule;
pub mod labels;
pub mod layer;
pub mod lines;

pub use graticule::{Graticule, GraticuleConfig, GraticuleError, RenderOutcome};
pub use layer::*;
