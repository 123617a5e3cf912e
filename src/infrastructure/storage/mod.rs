mod local_image_store;
mod path_builder;

pub use local_image_store::LocalImageStore;
pub use path_builder::PathBuilder;
