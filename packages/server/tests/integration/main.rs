mod common;

mod assets;
mod instance;
