mod handler;
mod model;

pub use handler::list_events;
pub use model::{AUTHORIZATION_REVOKED, NOT_AUTHORIZED};
