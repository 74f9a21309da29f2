pub mod math;
pub mod rect;

// Foundation crate: small, well-tested primitives only.
pub use rect::*;
