pub mod table;
pub mod transcript;
