pub mod ext;
pub mod sink;
