//! Branching wizard state machine
//!
//! Steps are declared as data: each `StepDef` carries its fixed back
//! edge and forward edge(s), so the whole funnel is a transition table
//! the engine walks without any rendering involved. Two shipped plans
//! (`standard` and `extended`) are configurations of the same engine.

use super::field::FieldError;
use super::form_record::{FormRecord, PrefField, Region};

/// One node of the finite state machine, one screen of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    Landing,
    PersonalInfo,
    Introduction,
    NodeQuestion,
    Region,
    ConditionalMessage,
    PhoneQuestion,
    OrderInfo,
    StayInformed,
    RouterQuestion,
    Newsletter,
    Community,
    ThankYou,
}

/// What a step displays and which outcomes it accepts
#[derive(Debug, Clone)]
pub enum StepKind {
    Landing,
    PersonalInfo,
    /// Informational screen with fixed forward/back edges
    Info {
        title: &'static str,
        body: &'static str,
    },
    /// Yes/no question writing one preference field. `yes_next` /
    /// `no_next` override the default forward edge per answer; a
    /// skip or detour is a named edge, not a condition re-checked
    /// downstream.
    Question {
        field: PrefField,
        question: &'static str,
        yes_next: Option<StepId>,
        no_next: Option<StepId>,
    },
    /// Records the delivery region and advances unconditionally
    RegionSelect { question: &'static str },
    /// Content selected by the previously recorded region; no mutation
    RegionMessage,
    Community,
    ThankYou,
}

/// A state plus its pre-wired edges
#[derive(Debug, Clone)]
pub struct StepDef {
    pub id: StepId,
    pub kind: StepKind,
    /// Fixed predecessor, independent of traversal history
    pub back: Option<StepId>,
    /// Default forward edge
    pub next: Option<StepId>,
}

/// Declarative list of step definitions
#[derive(Debug, Clone)]
pub struct WizardPlan {
    steps: Vec<StepDef>,
}

impl WizardPlan {
    /// The 10-state funnel: region and three questions, no hardware
    /// detours.
    pub fn standard() -> Self {
        use self::StepId as S;
        Self {
            steps: vec![
                StepDef {
                    id: S::Landing,
                    kind: StepKind::Landing,
                    back: None,
                    next: Some(S::PersonalInfo),
                },
                StepDef {
                    id: S::PersonalInfo,
                    kind: StepKind::PersonalInfo,
                    back: Some(S::Landing),
                    next: Some(S::Introduction),
                },
                StepDef {
                    id: S::Introduction,
                    kind: StepKind::Info {
                        title: "Let's find out what you're interested in.",
                        body: "We'll walk you through a couple of quick questions.",
                    },
                    back: Some(S::PersonalInfo),
                    next: Some(S::Region),
                },
                StepDef {
                    id: S::Region,
                    kind: StepKind::RegionSelect {
                        question: "Please select your preferred delivery region for your phone.",
                    },
                    back: Some(S::Introduction),
                    next: Some(S::ConditionalMessage),
                },
                StepDef {
                    id: S::ConditionalMessage,
                    kind: StepKind::RegionMessage,
                    back: Some(S::Region),
                    next: Some(S::PhoneQuestion),
                },
                StepDef {
                    id: S::PhoneQuestion,
                    kind: StepKind::Question {
                        field: PrefField::PreRegister,
                        question: "Would you like to pre-register for the phone? Pre-registration is required before production starts.",
                        yes_next: None,
                        no_next: None,
                    },
                    back: Some(S::ConditionalMessage),
                    next: Some(S::StayInformed),
                },
                StepDef {
                    id: S::StayInformed,
                    kind: StepKind::Question {
                        field: PrefField::StayInformed,
                        question: "Would you like to be informed about new devices, software releases, and upcoming initiatives?",
                        yes_next: None,
                        no_next: None,
                    },
                    back: Some(S::PhoneQuestion),
                    next: Some(S::Newsletter),
                },
                StepDef {
                    id: S::Newsletter,
                    kind: StepKind::Question {
                        field: PrefField::Newsletter,
                        question: "Would you like to join our general newsletter for project updates?",
                        yes_next: None,
                        no_next: None,
                    },
                    back: Some(S::StayInformed),
                    next: Some(S::Community),
                },
                StepDef {
                    id: S::Community,
                    kind: StepKind::Community,
                    back: Some(S::Newsletter),
                    next: Some(S::ThankYou),
                },
                StepDef {
                    id: S::ThankYou,
                    kind: StepKind::ThankYou,
                    back: None,
                    next: Some(S::Landing),
                },
            ],
        }
    }

    /// The 13-state funnel: adds the node question (which can skip the
    /// region pair entirely), a pre-registration detour, and the
    /// router question.
    pub fn extended() -> Self {
        use self::StepId as S;
        Self {
            steps: vec![
                StepDef {
                    id: S::Landing,
                    kind: StepKind::Landing,
                    back: None,
                    next: Some(S::PersonalInfo),
                },
                StepDef {
                    id: S::PersonalInfo,
                    kind: StepKind::PersonalInfo,
                    back: Some(S::Landing),
                    next: Some(S::Introduction),
                },
                StepDef {
                    id: S::Introduction,
                    kind: StepKind::Info {
                        title: "Let's find out what you're interested in.",
                        body: "We'll walk you through a couple of quick questions.",
                    },
                    back: Some(S::PersonalInfo),
                    next: Some(S::NodeQuestion),
                },
                StepDef {
                    id: S::NodeQuestion,
                    kind: StepKind::Question {
                        field: PrefField::WantsNode,
                        question: "Would you like to run a node and help power the grid?",
                        // "no" skips the region pair entirely
                        yes_next: Some(S::Region),
                        no_next: Some(S::PhoneQuestion),
                    },
                    back: Some(S::Introduction),
                    next: Some(S::Region),
                },
                StepDef {
                    id: S::Region,
                    kind: StepKind::RegionSelect {
                        question: "Please select your preferred delivery region for your phone.",
                    },
                    back: Some(S::NodeQuestion),
                    next: Some(S::ConditionalMessage),
                },
                StepDef {
                    id: S::ConditionalMessage,
                    kind: StepKind::RegionMessage,
                    back: Some(S::Region),
                    next: Some(S::PhoneQuestion),
                },
                StepDef {
                    id: S::PhoneQuestion,
                    kind: StepKind::Question {
                        field: PrefField::PreRegister,
                        question: "Would you like to pre-register for the phone? Pre-registration is required before production starts.",
                        // "yes" detours through the order info screen,
                        // rejoining where "no" goes
                        yes_next: Some(S::OrderInfo),
                        no_next: None,
                    },
                    back: Some(S::ConditionalMessage),
                    next: Some(S::StayInformed),
                },
                StepDef {
                    id: S::OrderInfo,
                    kind: StepKind::Info {
                        title: "Pre-registration noted!",
                        body: "Our team will reach out with ordering details as soon as the next production batch opens.",
                    },
                    back: Some(S::PhoneQuestion),
                    next: Some(S::StayInformed),
                },
                StepDef {
                    id: S::StayInformed,
                    kind: StepKind::Question {
                        field: PrefField::StayInformed,
                        question: "Would you like to be informed about new devices, software releases, and upcoming initiatives?",
                        yes_next: None,
                        no_next: None,
                    },
                    back: Some(S::PhoneQuestion),
                    next: Some(S::RouterQuestion),
                },
                StepDef {
                    id: S::RouterQuestion,
                    kind: StepKind::Question {
                        field: PrefField::RouterPreregister,
                        question: "Would you like to pre-register for the router?",
                        yes_next: None,
                        no_next: None,
                    },
                    back: Some(S::StayInformed),
                    next: Some(S::Newsletter),
                },
                StepDef {
                    id: S::Newsletter,
                    kind: StepKind::Question {
                        field: PrefField::Newsletter,
                        question: "Would you like to join our general newsletter for project updates?",
                        yes_next: None,
                        no_next: None,
                    },
                    back: Some(S::RouterQuestion),
                    next: Some(S::Community),
                },
                StepDef {
                    id: S::Community,
                    kind: StepKind::Community,
                    back: Some(S::Newsletter),
                    next: Some(S::ThankYou),
                },
                StepDef {
                    id: S::ThankYou,
                    kind: StepKind::ThankYou,
                    back: None,
                    next: Some(S::Landing),
                },
            ],
        }
    }

    pub fn steps(&self) -> &[StepDef] {
        &self.steps
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }
}

/// A user action interpreted against the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Next,
    Back,
    Answer(bool),
    RegionChosen(Region),
    ReturnHome,
}

/// Result of applying an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved(StepId),
    /// Forward transition refused by validation; stay and show errors
    Blocked(Vec<FieldError>),
    /// Outcome not accepted by the current step
    Ignored,
}

/// The navigation controller: owns the current step index and the
/// submission in-flight guard.
#[derive(Debug, Clone)]
pub struct Wizard {
    plan: WizardPlan,
    current: usize,
    submission_in_flight: bool,
}

impl Wizard {
    pub fn new(plan: WizardPlan) -> Self {
        Self {
            plan,
            current: 0,
            submission_in_flight: false,
        }
    }

    pub fn step(&self) -> &StepDef {
        &self.plan.steps[self.current]
    }

    pub fn current_id(&self) -> StepId {
        self.step().id
    }

    pub fn submission_in_flight(&self) -> bool {
        self.submission_in_flight
    }

    /// Apply a user outcome to the current step, performing the step's
    /// field write and taking its wired edge.
    pub fn apply(&mut self, outcome: Outcome, record: &mut FormRecord) -> Transition {
        // No navigation while the gateway call is pending
        if self.submission_in_flight {
            return Transition::Ignored;
        }

        let step = self.step().clone();

        if outcome == Outcome::Back {
            return self.go(step.back);
        }

        match (&step.kind, outcome) {
            (StepKind::Landing, Outcome::Next) => self.go(step.next),
            (StepKind::PersonalInfo, Outcome::Next) => {
                let errors = record.validate_identity();
                if errors.is_empty() {
                    self.go(step.next)
                } else {
                    Transition::Blocked(errors)
                }
            }
            (StepKind::Info { .. }, Outcome::Next) => self.go(step.next),
            (StepKind::RegionMessage, Outcome::Next) => self.go(step.next),
            (
                StepKind::Question {
                    field,
                    yes_next,
                    no_next,
                    ..
                },
                Outcome::Answer(value),
            ) => {
                record.set_answer(*field, value);
                let target = if value {
                    yes_next.or(step.next)
                } else {
                    no_next.or(step.next)
                };
                self.go(target)
            }
            (StepKind::RegionSelect { .. }, Outcome::RegionChosen(region)) => {
                record.region = region;
                self.go(step.next)
            }
            (StepKind::ThankYou, Outcome::ReturnHome) => {
                record.reset();
                self.go(step.next)
            }
            // The Community forward edge goes through the submission
            // guard, not through apply.
            _ => Transition::Ignored,
        }
    }

    /// Arm the in-flight guard. Returns false if the current step is
    /// not Community or a submission is already pending.
    pub fn begin_submission(&mut self) -> bool {
        if self.submission_in_flight || !matches!(self.step().kind, StepKind::Community) {
            return false;
        }
        self.submission_in_flight = true;
        true
    }

    /// Release the guard; on persistence success take the Community
    /// forward edge to ThankYou, otherwise stay put.
    pub fn finish_submission(&mut self, persisted: bool) {
        if !self.submission_in_flight {
            return;
        }
        self.submission_in_flight = false;
        if persisted {
            let next = self.step().next;
            self.go(next);
        }
    }

    fn go(&mut self, target: Option<StepId>) -> Transition {
        match target.and_then(|id| self.plan.index_of(id)) {
            Some(index) => {
                self.current = index;
                Transition::Moved(self.plan.steps[index].id)
            }
            None => Transition::Ignored,
        }
    }
}
