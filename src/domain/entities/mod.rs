mod advert;
mod image;
mod user;

pub use advert::Advert;
pub use image::Image;
pub use user::User;
