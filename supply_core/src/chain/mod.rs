pub mod dto;
pub mod handler;

#[cfg(test)]
pub(crate) mod mock;
