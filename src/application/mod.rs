pub mod app_error;
pub mod extract;
pub mod jwt;
pub mod password;
pub mod refresh_token;
pub mod use_cases;
pub mod validators;
