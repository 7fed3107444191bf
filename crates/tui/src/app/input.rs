use super::*;

impl App {
    /// Returns `Ok(true)` when the user asked to quit.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return Ok(false);
        }

        if self.show_console {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(12) | KeyCode::Char('`')) {
                self.show_console = false;
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::F(12) | KeyCode::Char('`') => self.show_console = true,
            KeyCode::Char('s') => {
                self.dispatch_command(Command::Start);
            }
            KeyCode::Char('t') => {
                self.dispatch_command(Command::Stop);
            }
            KeyCode::Char('l') => {
                self.dispatch_command(Command::Logout);
            }
            KeyCode::Char('r') => self.refresh_backend_status(),
            KeyCode::Char('c') => self.connect_channel(),
            KeyCode::Tab | KeyCode::Right => self.focus_next(),
            KeyCode::BackTab | KeyCode::Left => self.focus_previous(),
            KeyCode::Enter | KeyCode::Char(' ') => self.press_focused(),
            _ => {}
        }

        Ok(false)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<bool> {
        if self.show_help || self.show_console {
            return Ok(false);
        }

        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(command) = self.layout.button_at(mouse.column, mouse.row) {
                if let Some(idx) = Command::ALL.iter().position(|c| *c == command) {
                    self.focused_button = idx;
                }
                self.dispatch_command(command);
            }
        }

        Ok(false)
    }
}
