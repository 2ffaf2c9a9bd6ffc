// App module for portfolio_tui
// Holds the loaded site, selection, search and popup state

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, PopupView, Tab};
