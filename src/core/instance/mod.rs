pub mod model;
pub mod source;

pub use model::{AddonRequirement, InstanceDescriptor, LoaderRequirement};
pub use source::{load_descriptor, DescriptorLocation};
