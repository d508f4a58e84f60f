mod media_resource;

pub use media_resource::{MediaResource, ResourceKind};
