pub mod feed;
pub mod runtime;
