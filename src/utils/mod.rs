pub mod command;
pub mod error;
pub mod format;
pub mod interactive;
pub mod output;

pub use command::*;
pub use interactive::*;
pub use output::{print_success, print_warning, OutputStyle};
