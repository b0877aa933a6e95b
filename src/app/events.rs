use super::{App, Mode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            // ctrl+c cancels regex entry, terminates everywhere else
            if matches!(self.mode, Mode::RegexEntry { .. }) {
                self.mode = Mode::Browsing;
            } else {
                self.is_exiting = true;
            }
            return Ok(());
        }

        match self.mode {
            Mode::Input { .. } => self.handle_input_key(key),
            Mode::Browsing => self.handle_browsing_key(key),
            Mode::RegexEntry { .. } => self.handle_regex_key(key),
            Mode::FullDetail { .. } => self.handle_detail_key(key),
        }

        Ok(())
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc => self.is_exiting = true,
            KeyCode::Backspace => {
                if let Mode::Input { buffer, .. } = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::Input { buffer, hint } = &mut self.mode {
                    buffer.push(c);
                    *hint = None;
                }
            }
            _ => {}
        }
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_expand(),
            KeyCode::Char('v') => self.open_detail(),
            KeyCode::Char('e') => self.set_level_filter("ERROR"),
            KeyCode::Char('w') => self.set_level_filter("WARN"),
            KeyCode::Char('i') => self.set_level_filter("INFO"),
            KeyCode::Char('d') => self.set_level_filter("DEBUG"),
            KeyCode::Char('a') => self.clear_filters(),
            KeyCode::Char('r') => self.enter_regex_entry(),
            _ => {}
        }
    }

    fn handle_regex_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.apply_exclude_patterns(),
            KeyCode::Esc => self.mode = Mode::Browsing,
            KeyCode::Backspace => {
                if let Mode::RegexEntry { buffer } = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::RegexEntry { buffer } = &mut self.mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.mode = Mode::Browsing,
            KeyCode::Up => {
                if let Mode::FullDetail { offset, .. } = &mut self.mode {
                    *offset = offset.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                let visible = self.detail_height();
                if let Mode::FullDetail { lines, offset } = &mut self.mode {
                    let max_scroll = lines.len().saturating_sub(visible);
                    *offset = (*offset + 1).min(max_scroll);
                }
            }
            _ => {}
        }
    }
}
