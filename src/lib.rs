pub mod cli;
pub mod config;
pub mod console;
pub mod domain;
pub mod download;
pub mod extract;
pub mod http;
pub mod strategy;
