use meow_panel_link::Command;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;

use super::panel::{Panel, PanelType};

const FOOTER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const BACKEND_HEIGHT: u16 = 1;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 12;
const BUTTON_GAP: u16 = 2;

#[derive(Default)]
pub struct LayoutState {
    cached_panels: Vec<Panel>,
    button_rects: Vec<(Command, Rect)>,
}

impl LayoutState {
    pub fn calculate_layout(&mut self, area: Rect) -> &[Panel] {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)])
            .split(area);

        let card = main_layout[0];
        let inner = Block::bordered().inner(card);

        let card_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Length(BACKEND_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(BUTTON_HEIGHT),
            ])
            .split(inner);

        let button_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(BUTTON_GAP),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(BUTTON_GAP),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Min(0),
            ])
            .split(card_layout[3]);

        self.button_rects = Command::ALL
            .iter()
            .zip([button_row[0], button_row[2], button_row[4]])
            .map(|(command, rect)| (*command, rect))
            .collect();

        self.cached_panels = vec![
            Panel {
                panel_type: PanelType::Card,
                rect: card,
            },
            Panel {
                panel_type: PanelType::Status,
                rect: card_layout[0],
            },
            Panel {
                panel_type: PanelType::Backend,
                rect: card_layout[1],
            },
            Panel {
                panel_type: PanelType::Pairing,
                rect: card_layout[2],
            },
            Panel {
                panel_type: PanelType::Buttons,
                rect: card_layout[3],
            },
            Panel {
                panel_type: PanelType::Footer,
                rect: main_layout[1],
            },
        ];

        &self.cached_panels
    }

    pub fn button_rect(&self, command: Command) -> Option<Rect> {
        self.button_rects
            .iter()
            .find(|(c, _)| *c == command)
            .map(|(_, rect)| *rect)
    }

    pub fn button_at(&self, x: u16, y: u16) -> Option<Command> {
        self.button_rects
            .iter()
            .find(|(_, r)| {
                r.width > 0 && x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
            })
            .map(|(command, _)| *command)
    }
}
