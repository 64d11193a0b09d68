pub mod impl_fake;
pub mod impl_image_folder;
pub mod interface;
pub mod resource;
