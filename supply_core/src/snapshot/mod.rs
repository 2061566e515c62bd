pub mod builder;
pub mod dto;
pub mod store;
