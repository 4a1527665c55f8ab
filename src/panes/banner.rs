//! Banner overlay anchored to the bottom of the screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::form::Banner;
use crate::theme::tui_palette as tp;

const MAX_WIDTH: u16 = 60;

pub fn draw_banner(frame: &mut Frame<'_>, area: Rect, banner: &Banner) {
    // 90% of the width, capped, four rows tall, one row above the bottom edge.
    let w = ((u32::from(area.width) * 9 / 10) as u16).min(MAX_WIDTH);
    let h = 4u16.min(area.height);
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h + 1);
    let banner_area = Rect::new(x, y, w, h);

    frame.render_widget(Clear, banner_area);

    let border = if banner.is_error {
        Style::default().fg(tp::ERROR)
    } else {
        Style::default().fg(tp::SUCCESS)
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} {} ", banner.icon(), banner.title()),
            tp::banner_title(banner.is_error),
        ))
        .borders(Borders::ALL)
        .border_style(border)
        .border_type(BorderType::Rounded);

    let text = Paragraph::new(Line::from(Span::styled(
        banner.message.as_str(),
        tp::banner_body(banner.is_error),
    )))
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(text, banner_area);
}
