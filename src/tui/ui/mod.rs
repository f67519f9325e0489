//! TUI rendering module.
//!
//! This module handles all UI rendering for the terminal interface.
//! It's organized into submodules for maintainability:
//!
//! - `layout` - Layout calculations and text utilities
//! - `table` - Button group table rendering (header, rows, status line)
//! - `editor` - Button editor modal rendering
//! - `modals` - Modal popup rendering (command picker, help)

mod editor;
pub mod layout;
mod modals;
mod table;

// Re-export the main draw function
pub use self::draw::draw;

mod draw {

    use super::editor::draw_editor;
    use super::modals::{draw_help_popup, draw_picker};
    use super::table::{draw_groups, draw_header, draw_status_line};
    use crate::tui::App;
    use ratatui::{
        layout::{Constraint, Direction, Layout},
        widgets::Paragraph,
        Frame,
    };

    /// Main draw function - renders the entire TUI.
    pub fn draw(f: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Group table
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Button strip
            ])
            .split(f.area());

        draw_header(f, app, chunks[0]);
        draw_groups(f, app, chunks[1]);
        draw_status_line(f, app, chunks[2]);

        let strip = Paragraph::new(app.strip.line(chunks[3].width as usize));
        f.render_widget(strip, chunks[3]);

        // Overlays
        if app.show_editor() {
            draw_editor(f, app);
        }

        if app.show_picker() {
            draw_picker(f, app);
        }

        if app.show_help() {
            draw_help_popup(f, app);
        }
    }
}
