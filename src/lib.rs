pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod gateway;
pub mod services;
pub mod storage;
