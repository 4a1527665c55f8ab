pub mod banner;
pub mod otp_entry;
pub mod skeleton;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

use crate::action::Action;
use crate::form::OtpEntryForm;
use crate::tui::{Event, EventResponse, Frame};

/// What a pane may read and change while handling an event or drawing.
pub struct PaneState<'a> {
    pub form: &'a mut OtpEntryForm,
}

/// Mirrors openapi-tui's `Pane` trait.
pub trait Pane {
    fn handle_events(
        &mut self,
        event: Event,
        state: &mut PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, state)?,
            Event::Mouse(mouse_event) => self.handle_mouse_events(mouse_event, state)?,
            Event::Paste(text) => self.handle_paste(&text, state)?,
            _ => None,
        };
        Ok(r)
    }

    #[allow(unused_variables)]
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &mut PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    #[allow(unused_variables)]
    fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        state: &mut PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    #[allow(unused_variables)]
    fn handle_paste(
        &mut self,
        text: &str,
        state: &mut PaneState<'_>,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &PaneState<'_>) -> Result<()>;
}

/// Centre a `width` x `height` box inside `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
