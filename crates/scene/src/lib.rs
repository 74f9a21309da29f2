pub mod camera;
pub mod picking;
pub mod view;

pub use camera::*;
pub use picking::*;
pub use view::*;
