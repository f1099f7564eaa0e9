pub mod use_credits;

pub use use_credits::*;
