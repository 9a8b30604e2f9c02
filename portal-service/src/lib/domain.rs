pub mod access;
pub mod page;
pub mod post;
pub mod user;
