pub mod merge;
pub mod services;
