// Service module exports

pub mod replay;
pub mod settings;
