pub mod collector;
pub mod finder;
pub mod parser;
pub mod types;
