mod handler;
mod model;

pub use handler::{auth_status, delete_session, link_session};
