pub mod operator;
pub mod parse;
