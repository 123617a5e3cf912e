mod email;
mod ids;

pub use email::Email;
pub use ids::{AdvertId, ImageId, UserId};
