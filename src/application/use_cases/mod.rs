mod create_advert;
mod delete_advert;
mod get_advert;
mod get_image;
mod sign_in;
mod sign_up;

pub use create_advert::CreateAdvertUseCase;
pub use delete_advert::DeleteAdvertUseCase;
pub use get_advert::GetAdvertUseCase;
pub use get_image::GetImageUseCase;
pub use sign_in::SignInUseCase;
pub use sign_up::SignUpUseCase;
