pub mod adverts;
pub mod health;
pub mod images;
pub mod users;

pub use adverts::{
    create_advert_handler, delete_advert_handler, get_advert_handler, AdvertResponse, ImageLinks,
};
pub use health::{health_handler, readiness_handler};
pub use images::get_image_handler;
pub use users::{sign_in_handler, sign_up_handler};
