pub mod finder;
pub mod outcome;
pub mod state;
