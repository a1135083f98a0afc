pub mod command;
pub mod transport;
