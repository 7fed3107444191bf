use super::*;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

const TITLE: &str = " WhatsMeow Control Panel ";

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let panels = self.layout.calculate_layout(area).to_vec();

        for panel in panels {
            match panel.panel_type {
                PanelType::Card => self.render_card(frame, panel.rect),
                PanelType::Status => self.render_status(frame, panel.rect),
                PanelType::Backend => self.render_backend(frame, panel.rect),
                PanelType::Pairing => self.render_pairing(frame, panel.rect),
                PanelType::Buttons => self.render_buttons(frame),
                PanelType::Footer => self.render_footer(frame, panel.rect),
            }
        }

        if self.show_help {
            self.render_help(frame, area);
        }

        if self.show_console {
            self.render_console(frame, area);
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(TITLE)
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
            area,
        );
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let style = if self.status.is_connected() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        };

        let badge = Line::from(vec![
            Span::raw(" "),
            Span::styled(format!(" Status: {} ", self.status), style),
        ]);
        frame.render_widget(Paragraph::new(badge), area);
    }

    fn render_backend(&self, frame: &mut Frame, area: Rect) {
        let text = match self.backend {
            Some(ref snapshot) => format!(
                " Backend reports: {}, {}",
                snapshot.status,
                if snapshot.logged_in {
                    "device paired"
                } else {
                    "no paired device"
                }
            ),
            None => " Backend reports: unknown, press [r] to refresh".to_string(),
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    fn render_pairing(&self, frame: &mut Frame, area: Rect) {
        if self.pairing_code.is_empty() {
            return;
        }

        let Some(ref view) = self.qr_view else {
            frame.render_widget(
                Paragraph::new("\nPairing code received but it cannot be drawn as a QR code.")
                    .alignment(Alignment::Center),
                area,
            );
            return;
        };

        if !view.fits(area.width, area.height) {
            frame.render_widget(
                Paragraph::new(format!(
                    "\nEnlarge the terminal to show the pairing QR code (needs {}x{}).",
                    view.width(),
                    view.height()
                ))
                .alignment(Alignment::Center),
                area,
            );
            return;
        }

        let top = area.y + (area.height - view.height()) / 2;
        let qr_area = Rect::new(area.x, top, area.width, view.height());
        let lines: Vec<Line> = view.lines().iter().map(|l| Line::raw(l.as_str())).collect();
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), qr_area);
    }

    fn render_buttons(&self, frame: &mut Frame) {
        for (idx, command) in Command::ALL.iter().enumerate() {
            let Some(rect) = self.layout.button_rect(*command) else {
                continue;
            };
            if rect.width == 0 || rect.height == 0 {
                continue;
            }

            let enabled = self.is_enabled(*command);
            let focused = idx == self.focused_button;

            let label_style = if !enabled {
                Style::default().fg(Color::DarkGray)
            } else {
                match command {
                    Command::Start => Style::default().fg(Color::Green),
                    Command::Stop => Style::default(),
                    Command::Logout => Style::default().fg(Color::Red),
                }
            };
            let border_style = if focused && enabled {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if focused {
                Style::default().fg(Color::Yellow)
            } else {
                label_style
            };

            frame.render_widget(
                Paragraph::new(command.label())
                    .style(label_style)
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(border_style),
                    ),
                rect,
            );
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let health_style = match self.channel_health {
            ChannelHealth::Live => Style::default().fg(Color::Green),
            ChannelHealth::Offline => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::Yellow),
        };
        let line = Line::from(vec![
            Span::raw(format!(" {}   ", self.keybinds.footer_hint())),
            Span::raw("channel: "),
            Span::styled(self.channel_health.to_string(), health_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help_text = self.keybinds.help_text();
        let popup_area = self.centered_rect(60, 70, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(help_text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Press ? to close "),
            ),
            popup_area,
        );
    }

    fn render_console(&self, frame: &mut Frame, area: Rect) {
        let popup_area = self.centered_rect(90, 80, area);
        let visible = popup_area.height.saturating_sub(2) as usize;
        let skip = self.console.len().saturating_sub(visible);

        let items: Vec<ListItem> = self
            .console
            .iter()
            .skip(skip)
            .map(|line| {
                let (tag, style) = match line.level {
                    ConsoleLevel::Debug => ("DEBUG", Style::default().fg(Color::DarkGray)),
                    ConsoleLevel::Info => ("INFO ", Style::default()),
                    ConsoleLevel::Error => ("ERROR", Style::default().fg(Color::Red)),
                };
                ListItem::new(format!(
                    "{} {} {}",
                    line.at.format("%H:%M:%S"),
                    tag,
                    line.message
                ))
                .style(style)
            })
            .collect();

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Developer console - F12 to close "),
            ),
            popup_area,
        );
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
                ratatui::layout::Constraint::Percentage(percent_y),
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
                ratatui::layout::Constraint::Percentage(percent_x),
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
