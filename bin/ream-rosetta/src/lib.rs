pub mod cli;
pub mod startup_message;
