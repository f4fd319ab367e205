// Library for tests to access modules

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod sun;
pub mod version;
