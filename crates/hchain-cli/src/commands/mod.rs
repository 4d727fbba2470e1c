pub mod chain;
pub mod compare;
