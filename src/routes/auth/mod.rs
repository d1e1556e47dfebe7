mod handler;
mod model;

pub use handler::{authorize, oauth2callback};
