#![warn(clippy::unwrap_used)]

pub mod page;
pub mod rest;
pub mod server;
pub mod swagger;

pub use server::{router, ApiServer};
pub use swagger::ApiDoc;
