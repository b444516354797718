pub mod asset;
pub mod guest;
pub mod session;
pub mod user;
