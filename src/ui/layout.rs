//! Layout helpers and the status bar

use crate::app::App;
use crate::state::StepKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Content area above the status bar
pub fn content_area(area: Rect) -> Rect {
    Rect {
        height: area.height.saturating_sub(1),
        ..area
    }
}

/// Center a fixed-size card inside the given area, clamped to fit
pub fn centered_card(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    if app.state.wizard.submission_in_flight() {
        spans.push(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow),
        ));
    } else {
        let hints = step_hints(&app.state.wizard.step().kind);
        spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    }

    // Quit hint on the right
    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current step
fn step_hints(kind: &StepKind) -> &'static str {
    match kind {
        StepKind::Landing => "Enter:get started  q:quit",
        StepKind::PersonalInfo => "Tab:next field  Enter:continue  Esc:back",
        StepKind::Info { .. } | StepKind::RegionMessage => "Enter:next  Esc:back",
        StepKind::Question { .. } => "y/n:answer  Up/Down:select  Enter:confirm  Esc:back",
        StepKind::RegionSelect { .. } => "1/2:choose  Up/Down:select  Enter:confirm  Esc:back",
        StepKind::Community => "Enter:submit  Esc:back",
        StepKind::ThankYou => "Enter:return home",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_card_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let card = centered_card(area, 60, 10);
        assert_eq!(card, Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn test_centered_card_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let card = centered_card(area, 60, 10);
        assert_eq!(card.width, 30);
        assert_eq!(card.height, 8);
    }

    #[test]
    fn test_content_area_reserves_status_bar() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(content_area(area).height, 23);
    }
}
