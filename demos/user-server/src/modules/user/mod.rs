pub mod controller;
pub mod model;
mod repository;
mod service;

pub use model::UserNotFound;
pub use repository::UserRepositoryImpl;
pub use service::UserService;
