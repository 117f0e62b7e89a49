pub mod analyzer;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod processing;
pub mod storage;
