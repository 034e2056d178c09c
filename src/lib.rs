// Staffing Calendar scheduling library
// Exports all modules for testing and reuse

pub mod models;
pub mod scheduling;
pub mod services;
pub mod utils;
