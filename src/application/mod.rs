pub mod builder;
pub mod compensation;
pub mod dto;
pub mod errors;
pub mod ports;
pub mod use_cases;
pub mod validation;
