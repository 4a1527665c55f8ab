//! Loading placeholder shown while a submission is in progress.

use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::theme::tui_palette as tp;

const WIDTH: u16 = 44;
const HEIGHT: u16 = 11;

/// One tall block followed by two thin bars, no interactive controls.
pub fn draw_skeleton(frame: &mut Frame<'_>, area: Rect) {
    let outer = super::centered(area, WIDTH, HEIGHT);
    let [card, _, line1, _, line2] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(outer);

    for rect in [card, line1, line2] {
        frame.render_widget(Block::default().style(tp::skeleton()), rect);
    }
}
