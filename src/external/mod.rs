pub mod client;

pub use client::{HTTP_CLIENT, REQUEST_TIMEOUT};
