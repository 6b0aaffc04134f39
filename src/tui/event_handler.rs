use super::app_logic::DialogApp;
use super::app_state::{AppMode, Screen};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

pub(super) fn handle_events(app: &mut DialogApp<'_>) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                match app.screen {
                    Screen::Directory => app.handle_directory_input(key_event)?,
                    Screen::Import => match app.mode {
                        AppMode::Normal => app.handle_normal_mode_input(key_event)?,
                        AppMode::EditingName => app.handle_name_mode_input(key_event),
                    },
                }
            }
        }
    }
    Ok(())
}
