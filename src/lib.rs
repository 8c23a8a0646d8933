pub mod analyzer;
pub mod config;
pub mod console;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod storage;
pub mod utils;
