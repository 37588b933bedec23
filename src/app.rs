//! Application core: key handling and submission orchestration

use crate::config::FunnelConfig;
use crate::gateway::{
    build_http_client, HttpLeadStore, HttpNotificationDispatcher, SubmissionGateway,
    SubmissionRecord,
};
use crate::state::{AppState, Outcome, Region, StepKind, Transition};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Gateway for persistence and notification dispatch
    gateway: SubmissionGateway,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance wired to the HTTP gateway
    pub fn new(config: &FunnelConfig) -> Result<Self> {
        let client = build_http_client(config.request_timeout())?;
        let base_url = config.gateway_url();
        let api_key = config.gateway_api_key();

        let gateway = SubmissionGateway::new(
            Box::new(HttpLeadStore::new(client.clone(), base_url.clone(), api_key.clone())),
            Box::new(HttpNotificationDispatcher::new(client, base_url, api_key)),
        );

        Ok(Self {
            state: AppState::new(config.wizard_plan()),
            gateway,
            quit: false,
        })
    }

    /// Create an App with a custom gateway (used in tests)
    #[cfg(test)]
    pub fn with_gateway(plan: crate::state::WizardPlan, gateway: SubmissionGateway) -> Self {
        Self {
            state: AppState::new(plan),
            gateway,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.has_error() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match &self.state.wizard.step().kind {
            StepKind::Landing => match key.code {
                KeyCode::Enter => self.advance(Outcome::Next),
                KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                _ => {}
            },
            StepKind::PersonalInfo => self.handle_personal_info_key(key),
            StepKind::Info { .. } | StepKind::RegionMessage => match key.code {
                KeyCode::Enter => self.advance(Outcome::Next),
                KeyCode::Esc => self.advance(Outcome::Back),
                _ => {}
            },
            StepKind::Question { .. } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.advance(Outcome::Answer(true)),
                KeyCode::Char('n') | KeyCode::Char('N') => self.advance(Outcome::Answer(false)),
                KeyCode::Up | KeyCode::Down | KeyCode::Tab => self.toggle_choice(),
                KeyCode::Enter => self.advance(Outcome::Answer(self.state.choice == 0)),
                KeyCode::Esc => self.advance(Outcome::Back),
                _ => {}
            },
            StepKind::RegionSelect { .. } => match key.code {
                KeyCode::Char('1') => self.advance(Outcome::RegionChosen(Region::NorthAmerica)),
                KeyCode::Char('2') => self.advance(Outcome::RegionChosen(Region::EuropeWorldwide)),
                KeyCode::Up | KeyCode::Down | KeyCode::Tab => self.toggle_choice(),
                KeyCode::Enter => {
                    let region = if self.state.choice == 0 {
                        Region::NorthAmerica
                    } else {
                        Region::EuropeWorldwide
                    };
                    self.advance(Outcome::RegionChosen(region));
                }
                KeyCode::Esc => self.advance(Outcome::Back),
                _ => {}
            },
            StepKind::Community => match key.code {
                KeyCode::Enter => self.submit().await,
                KeyCode::Esc => self.advance(Outcome::Back),
                _ => {}
            },
            StepKind::ThankYou => {
                if key.code == KeyCode::Enter {
                    self.advance(Outcome::ReturnHome);
                    self.state.reset_inputs();
                }
            }
        }

        Ok(())
    }

    fn handle_personal_info_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.identity.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.identity.prev_field(),
            KeyCode::Backspace => self.state.identity.active_field_mut().pop_char(),
            KeyCode::Char(c) => self.state.identity.active_field_mut().push_char(c),
            KeyCode::Enter => {
                // Record the three fields, then let the engine decide
                self.state.identity.apply_to(&mut self.state.record);
                self.advance(Outcome::Next);
            }
            KeyCode::Esc => self.advance(Outcome::Back),
            _ => {}
        }
    }

    /// Flip the highlighted option on two-choice steps
    fn toggle_choice(&mut self) {
        self.state.choice = 1 - self.state.choice;
    }

    /// Apply an outcome to the wizard and reconcile the input state
    fn advance(&mut self, outcome: Outcome) {
        match self.state.wizard.apply(outcome, &mut self.state.record) {
            Transition::Moved(step) => {
                tracing::debug!(step = ?step, "moved to step");
                self.state.choice = 0;
                self.state.identity.errors.clear();
            }
            Transition::Blocked(errors) => {
                self.state.identity.errors = errors;
            }
            Transition::Ignored => {}
        }
    }

    /// Run the gateway call behind the in-flight guard
    async fn submit(&mut self) {
        if !self.state.wizard.begin_submission() {
            return;
        }

        let record = SubmissionRecord::from_form(&self.state.record);
        tracing::info!(submission_id = %record.submission_id, "submitting lead");

        match self.gateway.submit(&record).await {
            Ok(receipt) => {
                self.state.wizard.finish_submission(receipt.persisted);
                self.state.status_message = Some(if receipt.notified {
                    "Your information has been submitted and confirmation emails are on the way."
                        .to_string()
                } else {
                    "Your information was saved, but there was an issue sending confirmation emails."
                        .to_string()
                });
            }
            Err(err) => {
                tracing::error!(error = %err, "submission failed");
                self.state.wizard.finish_submission(false);
                self.state
                    .push_error("Failed to submit the form. Please try again.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MockLeadStore, MockNotificationDispatcher};
    use crate::state::{StepId, WizardPlan};
    use anyhow::anyhow;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(store: MockLeadStore, dispatcher: MockNotificationDispatcher) -> App {
        App::with_gateway(
            WizardPlan::standard(),
            SubmissionGateway::new(Box::new(store), Box::new(dispatcher)),
        )
    }

    fn quiet_mocks() -> (MockLeadStore, MockNotificationDispatcher) {
        (MockLeadStore::new(), MockNotificationDispatcher::new())
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Drive the standard funnel from Landing to Community
    async fn walk_to_community(app: &mut App) {
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_text(app, "Ada").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "Lovelace").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "ada@x.io").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::Community);
    }

    #[tokio::test]
    async fn test_typing_and_validation_errors() {
        let (store, dispatcher) = quiet_mocks();
        let mut app = app_with(store, dispatcher);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::PersonalInfo);

        // Submit with everything empty: blocked with three errors
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::PersonalInfo);
        assert_eq!(app.state.identity.errors.len(), 3);
    }

    #[tokio::test]
    async fn test_full_walkthrough_reaches_community() {
        let (store, dispatcher) = quiet_mocks();
        let mut app = app_with(store, dispatcher);
        walk_to_community(&mut app).await;
        assert_eq!(
            app.state.record.interests(),
            vec!["europe", "pre-register", "newsletter"]
        );
    }

    #[tokio::test]
    async fn test_submit_success_reaches_thank_you() {
        let mut store = MockLeadStore::new();
        store.expect_insert_lead().times(1).returning(|_| Ok(()));
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher.expect_dispatch().times(1).returning(|_| Ok(()));

        let mut app = app_with(store, dispatcher);
        walk_to_community(&mut app).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::ThankYou);
        assert!(app
            .state
            .status_message
            .as_deref()
            .unwrap()
            .contains("confirmation emails are on the way"));
    }

    #[tokio::test]
    async fn test_submit_with_notification_failure_still_advances() {
        let mut store = MockLeadStore::new();
        store.expect_insert_lead().times(1).returning(|_| Ok(()));
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_dispatch()
            .times(1)
            .returning(|_| Err(anyhow!("smtp down")));

        let mut app = app_with(store, dispatcher);
        walk_to_community(&mut app).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::ThankYou);
        assert!(app
            .state
            .status_message
            .as_deref()
            .unwrap()
            .contains("issue sending confirmation emails"));
    }

    #[tokio::test]
    async fn test_submit_persistence_failure_stays_with_error() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert_lead()
            .times(1)
            .returning(|_| Err(anyhow!("db unavailable")));
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher.expect_dispatch().times(0);

        let mut app = app_with(store, dispatcher);
        walk_to_community(&mut app).await;
        let record_before = app.state.record.clone();

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::Community);
        assert!(app.state.has_error());
        assert_eq!(app.state.record, record_before);
    }

    #[tokio::test]
    async fn test_arrow_selection_confirms_highlighted_option() {
        let (store, dispatcher) = quiet_mocks();
        let mut app = app_with(store, dispatcher);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_text(&mut app, "Ada").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "Lovelace").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "ada@x.io").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::Region);

        // Down highlights the second region, Enter confirms it
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        assert_eq!(app.state.choice, 1);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.record.region, Region::EuropeWorldwide);

        // The highlight resets on every move
        assert_eq!(app.state.choice, 0);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::PhoneQuestion);

        // Down highlights "No"; Enter records a negative answer
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.record.pre_register, Some(false));

        // Up and Down toggle between the two options
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Up)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.record.stay_informed, Some(true));
    }

    #[tokio::test]
    async fn test_error_dialog_is_modal() {
        let (store, dispatcher) = quiet_mocks();
        let mut app = app_with(store, dispatcher);
        app.state.push_error("boom");

        // Keys other than Enter/Esc do nothing while the dialog is up
        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
        assert!(app.state.has_error());
        assert_eq!(app.state.wizard.current_id(), StepId::Landing);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(!app.state.has_error());
    }

    #[tokio::test]
    async fn test_return_home_resets_everything() {
        let mut store = MockLeadStore::new();
        store.expect_insert_lead().times(1).returning(|_| Ok(()));
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher.expect_dispatch().times(1).returning(|_| Ok(()));

        let mut app = app_with(store, dispatcher);
        walk_to_community(&mut app).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::ThankYou);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.wizard.current_id(), StepId::Landing);
        assert_eq!(app.state.record, Default::default());
        assert_eq!(app.state.identity.first_name.as_text(), "");
        assert!(app.state.status_message.is_none());
    }

    #[tokio::test]
    async fn test_quit_from_landing() {
        let (store, dispatcher) = quiet_mocks();
        let mut app = app_with(store, dispatcher);
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }
}
