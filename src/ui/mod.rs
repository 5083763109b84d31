//! Terminal output for the CLI.
//!
//! Commands write through the [`UserInterface`] trait so tests can capture
//! what would have been printed.
//!
//! # Example
//!
//! ```
//! use cms_consumer::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.content("<footer/>");
//! ui.error("Connection refused");
//!
//! assert_eq!(ui.output(), "<footer/>");
//! assert!(ui.has_error("refused"));
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Write fetched content verbatim to standard output.
    fn content(&mut self, body: &str);

    /// Display a message line.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
