//! Interactive tutor interface for Yeneta

mod commands;
mod state;
mod ui;

pub use commands::ReplCommand;
pub use state::{ConversationState, MAX_HISTORY_TURNS};
pub use ui::{
    display_banner, print_help, print_settings, read_line_with_history, render_answer,
    render_error, render_sources,
};

// Re-export core types
pub use yeneta_core::{Error, Result};
