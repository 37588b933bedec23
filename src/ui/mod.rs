//! UI module for rendering the funnel

mod components;
mod layout;
mod steps;

use crate::app::App;
use crate::state::StepKind;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = layout::content_area(frame.area());

    match &app.state.wizard.step().kind {
        StepKind::Landing => steps::draw_landing(frame, area),
        StepKind::PersonalInfo => steps::draw_personal_info(frame, area, app),
        StepKind::Info { title, body } => steps::draw_info(frame, area, title, body),
        StepKind::Question { question, .. } => steps::draw_question(frame, area, question, app),
        StepKind::RegionSelect { question } => steps::draw_region(frame, area, question, app),
        StepKind::RegionMessage => steps::draw_region_message(frame, area, app),
        StepKind::Community => steps::draw_community(frame, area, app),
        StepKind::ThankYou => steps::draw_thank_you(frame, area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog overlays everything
    if let Some(message) = &app.state.error_message {
        components::render_error_dialog(frame, message);
    }
}
