pub mod config;
pub mod generate;
pub mod inspect;
pub mod status;
