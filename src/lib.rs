// src/lib.rs

//! Campus notice board client library

pub mod error;
pub mod interaction;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
