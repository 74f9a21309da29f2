#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Whether the layer is currently attached to the frame loop.
    fn is_active(&self) -> bool;
}
