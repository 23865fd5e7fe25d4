pub mod access_key;
pub mod app;
pub mod deployment;
