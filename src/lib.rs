#[macro_use]
pub mod macros;

pub mod api;
pub mod config;
pub mod crawler;
pub mod parser;
pub mod schema;
pub mod workbook;
