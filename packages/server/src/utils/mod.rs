pub mod hash;
pub mod honeypot;
pub mod password;
