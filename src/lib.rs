pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod engine;
pub mod fetcher;
pub mod output;
pub mod records;
pub mod runner;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
mod tests;
