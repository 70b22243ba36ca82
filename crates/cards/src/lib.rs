pub mod handler;
pub mod models;
pub mod palette;
mod repository;
pub mod service;
