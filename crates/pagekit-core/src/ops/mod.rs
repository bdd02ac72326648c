pub mod component_ops;
pub mod item_ops;
pub mod patch;

pub use component_ops::ComponentPatch;
pub use patch::merge_patch;
