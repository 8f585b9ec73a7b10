pub mod algorithms;
pub mod configs;
pub mod error;
pub mod structures;
pub mod utils;
