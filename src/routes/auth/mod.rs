mod handler;
mod model;

pub use handler::{refresh, sign_in, sign_out};
