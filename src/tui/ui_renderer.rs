use super::app_logic::DialogApp;
use super::app_state::{AppMode, Screen, SelectionState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn selection_glyph(state: SelectionState) -> &'static str {
    match state {
        SelectionState::NotSelected => "[ ] ",
        SelectionState::PartiallySelected => "[-] ",
        SelectionState::FullySelected => "[x] ",
    }
}

fn draw_directory_help_block(f: &mut Frame, app: &DialogApp<'_>, area: Rect) {
    let mut toolbar: Vec<String> = app
        .hooks
        .directory_actions()
        .iter()
        .map(|action| format!("{}: {}", action.key, action.label))
        .collect();
    toolbar.push("q/Esc: Quit".to_string());

    let help_text_lines_content = vec![
        Line::from(toolbar.join(" | ")),
        Line::from("Tables listed below were created in the output directory"),
    ];
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Roll Table Directory"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_directory_list_block(f: &mut Frame, app: &DialogApp<'_>, area: Rect) {
    let list_items: Vec<ListItem> = if app.existing_tables.is_empty() {
        vec![ListItem::new("(no roll tables yet)")]
    } else {
        app.existing_tables
            .iter()
            .map(|name| ListItem::new(name.clone()))
            .collect()
    };
    let list_widget =
        List::new(list_items).block(Block::default().borders(Borders::ALL).title("Roll Tables"));
    f.render_widget(list_widget, area);
}

fn draw_import_help_block(f: &mut Frame, _app: &DialogApp<'_>, area: Rect) {
    let help_text_lines_content = vec![
        Line::from("Arrows/jk: Nav | Space/Enter: Check | Tab/o: Fold | y: Import | q/Esc: Cancel"),
        Line::from("a: Select All | d: Deselect All | n: Table Name"),
    ];
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Import Compendiums"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_table_header_block(f: &mut Frame, app: &DialogApp<'_>, area: Rect) {
    let name_label = "Table Name: ";
    let title = if app.mode == AppMode::EditingName {
        "New Roll Table (Esc to cancel, Enter to apply)"
    } else {
        "New Roll Table"
    };
    let lines = vec![
        Line::from(format!("{}{}", name_label, app.table_name)),
        Line::from(format!("{}Select All", selection_glyph(app.global_state))),
    ];
    let header_paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(header_paragraph, area);

    if app.mode == AppMode::EditingName {
        let cursor_chars = app.table_name[..app.name_cursor_pos].chars().count();
        f.set_cursor_position((
            area.x + 1 + (name_label.len() + cursor_chars) as u16,
            area.y + 1,
        ));
    }
}

fn draw_pack_list_block(f: &mut Frame, app: &mut DialogApp<'_>, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_selection_is_visible_in_viewport();

    let visible_item_indices = app.get_visible_item_indices();
    let num_visible_items = visible_item_indices.len();

    let list_items_to_render_indices = visible_item_indices
        .get(
            app.scroll_offset
                ..(app.scroll_offset + app.list_viewport_height).min(num_visible_items),
        )
        .unwrap_or(&[]);

    let list_items: Vec<ListItem> = list_items_to_render_indices
        .iter()
        .map(|&item_actual_idx| {
            let item = &app.items[item_actual_idx];
            let full_line = if item.is_pack() {
                let expansion_prefix = if item.is_expanded { "[-] " } else { "[+] " };
                format!(
                    "{}{}{}",
                    expansion_prefix,
                    selection_glyph(item.state),
                    item.label
                )
            } else {
                format!("      {}{}", selection_glyph(item.state), item.label)
            };
            ListItem::new(full_line)
        })
        .collect();

    let list_widget = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select Entries to Import"),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ratatui::widgets::ListState::default();
    let current_position = visible_item_indices
        .iter()
        .position(|&idx| idx == app.current_selection_idx);

    if let Some(selected_idx_in_visible_list) = current_position {
        if selected_idx_in_visible_list >= app.scroll_offset
            && selected_idx_in_visible_list < app.scroll_offset + app.list_viewport_height
        {
            list_state_for_view.select(Some(selected_idx_in_visible_list - app.scroll_offset));
        }
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut DialogApp<'_>) {
    match app.screen {
        Screen::Directory => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([Constraint::Length(4), Constraint::Min(0)])
                .split(frame.area());
            draw_directory_help_block(frame, app, chunks[0]);
            draw_directory_list_block(frame, app, chunks[1]);
        }
        Screen::Import => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Length(4),
                    Constraint::Min(0),
                ])
                .split(frame.area());
            draw_import_help_block(frame, app, chunks[0]);
            draw_table_header_block(frame, app, chunks[1]);
            draw_pack_list_block(frame, app, chunks[2]);
        }
    }
}
