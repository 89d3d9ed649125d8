pub mod install;
pub mod search;
