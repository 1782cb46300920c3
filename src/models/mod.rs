pub mod following;
pub mod post;
pub mod user;
