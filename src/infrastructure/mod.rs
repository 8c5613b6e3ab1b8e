pub mod cors;
pub mod db;
pub mod mail;
pub mod utils;
