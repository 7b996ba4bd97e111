pub mod error;
pub mod logger;
pub mod monitor;
pub mod timing;
pub mod validation;
