// Path Planning algorithms module

pub mod potential_field;

pub use potential_field::*;
