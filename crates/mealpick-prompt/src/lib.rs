pub mod builder;
pub mod chain;
