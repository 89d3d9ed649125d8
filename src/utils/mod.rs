pub mod bytes;
pub mod tmp;
