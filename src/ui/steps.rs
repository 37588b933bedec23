//! Per-step rendering: one centered card per wizard state

use super::components::{render_button, BUTTON_HEIGHT};
use super::layout::centered_card;
use crate::app::App;
use crate::state::{IdentityField, Region, TextField};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Community platforms shown on the community step
const PLATFORMS: &[(&str, &str)] = &[
    ("Telegram", "t.me/ourproject"),
    ("Discord", "discord.gg/ourproject"),
    ("X (Twitter)", "x.com/ourproject"),
    ("YouTube", "youtube.com/@ourproject"),
];

fn card_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

pub fn draw_landing(frame: &mut Frame, area: Rect) {
    let card = centered_card(area, 64, 11);
    let block = card_block("Welcome");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .margin(1)
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "Join the Ecosystem!",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let tagline = Paragraph::new("Take action with our devices, or support the mission and stay updated.")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(tagline, chunks[1]);

    let button_area = centered_card(chunks[3], 18, BUTTON_HEIGHT);
    render_button(frame, button_area, "Get Started", true, true);
}

pub fn draw_personal_info(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered_card(area, 52, 17);
    let block = card_block("Personal Information");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(inner);

    let identity = &app.state.identity;
    let fields = [
        (&identity.first_name, IdentityField::FirstName, 0usize),
        (&identity.last_name, IdentityField::LastName, 1),
        (&identity.email, IdentityField::Email, 2),
    ];

    for (i, (field, id, index)) in fields.iter().enumerate() {
        let is_active = identity.active_field_index == *index;
        draw_text_field(frame, chunks[i * 2], field, is_active);

        if let Some(message) = identity.error_for(*id) {
            let error = Paragraph::new(message).style(Style::default().fg(Color::Red));
            frame.render_widget(error, chunks[i * 2 + 1]);
        }
    }
}

fn draw_text_field(frame: &mut Frame, area: Rect, field: &TextField, is_active: bool) {
    let border_color = if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let value = if is_active {
        format!("{}█", field.as_text())
    } else {
        field.as_text().to_string()
    };

    let widget = Paragraph::new(value).block(
        Block::default()
            .title(format!(" {} ", field.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(widget, area);
}

pub fn draw_info(frame: &mut Frame, area: Rect, title: &str, body: &str) {
    let card = centered_card(area, 60, 11);
    let block = card_block(title);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(BUTTON_HEIGHT)])
        .margin(1)
        .split(inner);

    let text = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(text, chunks[0]);

    let button_area = centered_card(chunks[1], 12, BUTTON_HEIGHT);
    render_button(frame, button_area, "Next", true, true);
}

pub fn draw_question(frame: &mut Frame, area: Rect, question: &str, app: &App) {
    draw_two_choices(frame, area, question, "Yes", "No", app.state.choice);
}

pub fn draw_region(frame: &mut Frame, area: Rect, question: &str, app: &App) {
    draw_two_choices(
        frame,
        area,
        question,
        Region::NorthAmerica.label(),
        Region::EuropeWorldwide.label(),
        app.state.choice,
    );
}

fn draw_two_choices(
    frame: &mut Frame,
    area: Rect,
    question: &str,
    first: &str,
    second: &str,
    choice: usize,
) {
    let card = centered_card(area, 60, 14);
    let block = card_block("Question");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .margin(1)
        .split(inner);

    let text = Paragraph::new(question)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, chunks[0]);

    let first_area = centered_card(chunks[1], 30, BUTTON_HEIGHT);
    render_button(frame, first_area, first, choice == 0, true);
    let second_area = centered_card(chunks[2], 30, BUTTON_HEIGHT);
    render_button(frame, second_area, second, choice == 1, true);
}

pub fn draw_region_message(frame: &mut Frame, area: Rect, app: &App) {
    let body = match app.state.record.region {
        Region::EuropeWorldwide => {
            "For customers in Europe / Worldwide, please contact our sales team to place an order."
        }
        _ => "For customers in North America, you can place your order with our retail partner.",
    };

    draw_info(frame, area, "Thank you for your interest in the phone!", body);
}

pub fn draw_community(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered_card(area, 60, 9 + PLATFORMS.len() as u16);
    let block = card_block("Community");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(PLATFORMS.len() as u16),
            Constraint::Min(0),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .margin(1)
        .split(inner);

    let intro = Paragraph::new("Be sure to participate in our community channels.")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(intro, chunks[0]);

    let links: Vec<Line> = PLATFORMS
        .iter()
        .map(|(name, url)| {
            Line::from(vec![
                Span::styled(*name, Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(*url, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let links_widget = Paragraph::new(links).alignment(Alignment::Center);
    frame.render_widget(links_widget, chunks[1]);

    let in_flight = app.state.wizard.submission_in_flight();
    let label = if in_flight { "Submitting..." } else { "Submit" };
    let button_area = centered_card(chunks[3], 18, BUTTON_HEIGHT);
    render_button(frame, button_area, label, !in_flight, !in_flight);
}

pub fn draw_thank_you(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered_card(area, 60, 12);
    let block = card_block("Thank you");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .margin(1)
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "Thank you for joining us!",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = app
        .state
        .status_message
        .as_deref()
        .unwrap_or("We'll keep you updated with the latest news and opportunities.");
    let text = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(text, chunks[1]);

    let button_area = centered_card(chunks[2], 20, BUTTON_HEIGHT);
    render_button(frame, button_area, "Return to Home", true, true);
}
