pub mod deck;
pub mod headless;
pub mod init;
pub mod misc;
