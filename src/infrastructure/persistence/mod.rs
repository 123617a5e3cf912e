mod postgres_advert_repository;
mod postgres_image_repository;
mod postgres_user_repository;
mod table_names;

pub use postgres_advert_repository::PostgresAdvertRepository;
pub use postgres_image_repository::PostgresImageRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use table_names::TableNames;
