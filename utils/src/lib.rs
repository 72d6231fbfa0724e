pub mod browser;
pub mod credentials;
pub mod html;
