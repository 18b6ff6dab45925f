pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod node_server;
pub mod nodes;
pub mod test;
pub mod time;
pub mod utils;
pub mod weather;
