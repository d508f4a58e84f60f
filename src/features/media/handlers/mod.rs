pub mod media_handler;

pub use media_handler::{get_object_media, get_object_panorama};
