pub mod assets;
pub mod auth;
pub mod guestbook;
pub mod instance;
