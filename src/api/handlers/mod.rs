//! HTTP request handlers.

mod contact_handler;
mod group_handler;

pub use contact_handler::contact_routes;
pub use group_handler::group_routes;
