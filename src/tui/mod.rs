// Structs and enums that are part of the public API of the TUI module
mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

// Re-export what the workflow consumes: the item types it inspects after a
// confirmed dialog, and the entry point that runs the terminal session.
pub use app_state::{DialogItem, DialogNode, ImportRequest, PackContent, SelectionState};

pub use self::run_dialog::run_import_tui;

// Main TUI loop and terminal setup/teardown
mod run_dialog {
    use super::app_logic::DialogApp;
    use super::app_state::ImportRequest;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::compendium::PackSource;
    use crate::hooks::Hooks;
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    /// Run the table-directory screen and, from it, the import dialog.
    /// Returns `Some` with the confirmed selection, or `None` when the user
    /// cancels (in which case nothing was mutated anywhere).
    pub fn run_import_tui(
        source: &dyn PackSource,
        hooks: &Hooks,
        existing_tables: Vec<String>,
        initial_name: String,
        preselect: Vec<String>,
    ) -> Result<Option<ImportRequest>> {
        let mut app = DialogApp::new(source, hooks, existing_tables, initial_name, preselect);

        let mut terminal = init_terminal()?;

        while !app.quit {
            terminal.draw(|frame| ui_frame(frame, &mut app))?;
            handle_events(&mut app)?;
        }

        restore_terminal(terminal)?;

        if app.confirmed {
            Ok(Some(ImportRequest {
                table_name: app.table_name,
                items: app.items,
            }))
        } else {
            Ok(None)
        }
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}
