pub mod application;
pub mod note;
pub mod resume;
pub mod user;
