pub mod extract;
pub mod summary;
