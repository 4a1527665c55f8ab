//! The OTP card: code field and submit control, or the loading placeholder
//! while a submission is in progress.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::{Input, InputRequest};

use crate::action::Action;
use crate::form::{FormView, OTP_LENGTH};
use crate::panes::skeleton::draw_skeleton;
use crate::panes::{Pane, PaneState, centered};
use crate::theme::tui_palette as tp;
use crate::tui::{EventResponse, Frame};

const CARD_WIDTH: u16 = 40;
const CARD_HEIGHT: u16 = 11;

#[derive(Default)]
pub struct OtpEntryPane {
    input: Input,
}

impl OtpEntryPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the editor in step with the form, which owns the real value.
    fn sync(&mut self, code: &str) {
        if self.input.value() != code {
            self.input = Input::new(code.to_string());
        }
    }

    /// Apply `requests` to a copy of the editor and offer the result to the
    /// form. The editor only moves forward if the form took the value.
    fn offer(&mut self, requests: &[InputRequest], state: &mut PaneState<'_>) {
        self.sync(state.form.code().as_str());
        let mut candidate = self.input.clone();
        for req in requests {
            candidate.handle(req.clone());
        }
        if candidate.value() == self.input.value() {
            // cursor movement only
            self.input = candidate;
        } else if state.form.input(candidate.value()) {
            self.input = candidate;
        }
    }
}

fn key_request(key: &KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let req = match key.code {
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(req)
}

impl Pane for OtpEntryPane {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &mut PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(EventResponse::Stop(Action::Quit)));
        }
        if key.code == KeyCode::Esc {
            return Ok(Some(EventResponse::Stop(Action::Quit)));
        }
        if state.form.view() == FormView::Loading {
            return Ok(None);
        }

        if key.code == KeyCode::Enter {
            return Ok(Some(EventResponse::Stop(Action::Submit)));
        }
        if let Some(req) = key_request(&key) {
            self.offer(&[req], state);
            return Ok(Some(EventResponse::Stop(Action::Render)));
        }
        Ok(None)
    }

    fn handle_paste(
        &mut self,
        text: &str,
        state: &mut PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.form.view() == FormView::Loading {
            return Ok(None);
        }
        // Codes copied out of an email usually drag a newline along.
        let requests: Vec<InputRequest> = text.trim().chars().map(InputRequest::InsertChar).collect();
        self.offer(&requests, state);
        Ok(Some(EventResponse::Stop(Action::Render)))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()> {
        if state.form.view() == FormView::Loading {
            draw_skeleton(f, area);
            return Ok(());
        }
        self.sync(state.form.code().as_str());

        let card = centered(area, CARD_WIDTH, CARD_HEIGHT);
        f.render_widget(Clear, card);

        let block = Block::default()
            .title(Span::styled(" OTP ", tp::title_focused()))
            .title_bottom(
                Line::from(Span::styled(" Enter submit · Esc quit ", tp::hint())).right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(tp::focused_border())
            .border_type(BorderType::Rounded);
        let inner = block.inner(card);
        f.render_widget(block, card);

        let [description, _, label, field, _, button] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        f.render_widget(
            Paragraph::new(Span::styled(" Use OTP sent to email", tp::hint())),
            description,
        );
        f.render_widget(
            Paragraph::new(Span::styled(" OTP", Style::default().fg(tp::TEXT))),
            label,
        );

        // Field: lock icon, typed digits, placeholder dots for the rest.
        let field_block = Block::default()
            .borders(Borders::ALL)
            .border_style(tp::unfocused_border())
            .border_type(BorderType::Rounded);
        let field_inner = field_block.inner(field);
        f.render_widget(field_block, field);

        let code = self.input.value();
        let mut spans = vec![Span::styled("🔓 ", Style::default().fg(tp::MUTED))];
        for (i, ch) in code.chars().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                ch.to_string(),
                Style::default()
                    .fg(tp::ACCENT_BRIGHT)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        for i in code.len()..OTP_LENGTH {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled("·", Style::default().fg(tp::MUTED)));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), field_inner);

        // icon is two cells wide plus a space; each digit takes two cells
        let cursor_x = field_inner.x + 3 + (self.input.cursor() * 2) as u16;
        if cursor_x < field_inner.right() {
            f.set_cursor_position((cursor_x, field_inner.y));
        }

        f.render_widget(
            Paragraph::new(Span::styled("  Submit  ", tp::button())).alignment(Alignment::Center),
            button,
        );
        Ok(())
    }
}
