pub mod describe;
pub mod modules;

pub use describe::{describe_command, describe_host};
pub use modules::modules_command;
