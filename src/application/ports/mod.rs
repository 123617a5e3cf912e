mod advert_repository;
mod clock;
mod credentials;
mod id_generator;
mod image_repository;
mod image_store;
mod user_repository;

pub use advert_repository::{AdvertRepository, RepositoryError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{CredentialError, PasswordHasher, TokenService};
pub use id_generator::{IdGenerator, UuidGenerator};
pub use image_repository::ImageRepository;
pub use image_store::{ImageStore, ImageStoreError};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use advert_repository::MockAdvertRepository;
#[cfg(test)]
pub use credentials::{MockPasswordHasher, MockTokenService};
#[cfg(test)]
pub use image_repository::MockImageRepository;
#[cfg(test)]
pub use image_store::MockImageStore;
#[cfg(test)]
pub use user_repository::MockUserRepository;
