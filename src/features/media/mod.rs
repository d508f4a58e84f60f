pub mod dtos;
pub mod handlers;
pub mod models;
pub mod paths;
pub mod repository;
pub mod routes;
pub mod sanitize;
pub mod services;

pub use repository::PgMediaRepository;
pub use routes::routes;
pub use services::MediaService;
