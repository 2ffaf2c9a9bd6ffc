mod setup;

pub use setup::{restore_terminal as cleanup, setup_terminal as setup, Tui};
