pub mod files;
pub mod health;
pub mod history;
pub mod upload;
