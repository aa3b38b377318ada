pub mod handlers;
pub mod middleware;
pub mod results;
pub mod routes;
pub mod scan;

pub use routes::create_router;
