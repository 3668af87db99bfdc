//! Keyboard input handling and interactive loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::menu::{TreeAction, TreeMenu};
use super::render::truncate_to_width;

/// Convert a keyboard event to a TreeAction
///
/// While searching, printable keys feed the query instead of acting as
/// shortcuts.
pub fn key_to_action(key: KeyEvent, searching: bool) -> Option<TreeAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(TreeAction::Quit),
            _ => None,
        };
    }

    if searching {
        return match key.code {
            KeyCode::Char(c) => Some(TreeAction::SearchInput(c)),
            KeyCode::Backspace => Some(TreeAction::SearchBackspace),
            KeyCode::Esc | KeyCode::Enter => Some(TreeAction::EndSearch),
            KeyCode::Up => Some(TreeAction::Up),
            KeyCode::Down => Some(TreeAction::Down),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(TreeAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(TreeAction::Down),
        KeyCode::Char(' ') => Some(TreeAction::Toggle),
        KeyCode::Right | KeyCode::Char('l') => Some(TreeAction::Expand),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => Some(TreeAction::Collapse),
        KeyCode::Char('a') => Some(TreeAction::SelectAll),
        KeyCode::Char('n') => Some(TreeAction::SelectNone),
        KeyCode::Char('i') => Some(TreeAction::Invert),
        KeyCode::Char('/') => Some(TreeAction::StartSearch),
        KeyCode::Char('v') => Some(TreeAction::ToggleCopyVisibility),
        KeyCode::Char('b') => Some(TreeAction::ToggleCopySectionBox),
        KeyCode::Enter => Some(TreeAction::Confirm),
        KeyCode::Char('q') | KeyCode::Esc => Some(TreeAction::Quit),
        _ => None,
    }
}

/// Run the tree menu interactively
///
/// Returns true when the user confirmed, false when they quit. The menu keeps
/// the final selection and preferences either way.
pub fn run_interactive(
    menu: &mut TreeMenu,
    title: &str,
    supports_unicode: bool,
) -> std::io::Result<bool> {
    use crossterm::{
        cursor,
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{self, ClearType},
    };
    use std::io::{stdout, Write};

    terminal::enable_raw_mode()?;
    let mut stdout = stdout();

    let render_ui = |stdout: &mut std::io::Stdout, menu: &TreeMenu| -> std::io::Result<()> {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        let width = usize::from(width);

        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        let footer: Vec<String> = menu
            .render_status_bar(supports_unicode)
            .lines()
            .chain(std::iter::once(""))
            .map(str::to_string)
            .chain(menu.render_help_bar().lines().map(str::to_string))
            .collect();

        write!(stdout, "{}\r\n\r\n", truncate_to_width(title, width))?;

        // Scroll the tree so the cursor stays on screen.
        let rows = usize::from(height)
            .saturating_sub(footer.len() + 4)
            .max(1);
        let tree = menu.render(supports_unicode, true);
        let start = menu.cursor_position().saturating_sub(rows - 1);
        for line in tree.lines().skip(start).take(rows) {
            write!(stdout, "{}\r\n", truncate_to_width(line, width))?;
        }

        let separator = if supports_unicode {
            crate::ui::theme::icons::SEPARATOR
        } else {
            crate::ui::theme::icons_ascii::SEPARATOR
        };
        write!(stdout, "{}\r\n", separator.repeat(width.min(64)))?;

        for line in &footer {
            write!(stdout, "{}\r\n", truncate_to_width(line, width))?;
        }

        stdout.flush()?;
        Ok(())
    };

    execute!(stdout, cursor::Hide)?;

    let result = (|| -> std::io::Result<bool> {
        render_ui(&mut stdout, menu)?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(action) = key_to_action(key, menu.is_searching()) {
                    match action {
                        TreeAction::Confirm => break Ok(true),
                        TreeAction::Quit => break Ok(false),
                        _ => {
                            menu.handle_action(action);
                            render_ui(&mut stdout, menu)?;
                        }
                    }
                }
            } else {
                render_ui(&mut stdout, menu)?;
            }
        }
    })();

    // Restore the terminal even when the loop failed.
    let restore = execute!(
        stdout,
        cursor::Show,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0)
    );
    terminal::disable_raw_mode()?;
    restore?;

    result
}
