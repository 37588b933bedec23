//! The mutable record of answers collected across wizard steps

use super::field::{is_valid_email, FieldError, IdentityField};

/// Delivery region recorded on the region step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    NorthAmerica,
    EuropeWorldwide,
    #[default]
    Unset,
}

impl Region {
    /// Interest token sent to the gateway, `None` while unset
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::NorthAmerica => Some("north-america"),
            Self::EuropeWorldwide => Some("europe"),
            Self::Unset => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::EuropeWorldwide => "Europe/Worldwide",
            Self::Unset => "",
        }
    }
}

/// Tri-state preference fields, identified so question steps can be
/// parameterized instead of hand-duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefField {
    WantsNode,
    PreRegister,
    StayInformed,
    RouterPreregister,
    Newsletter,
}

/// Declaration order of the preference fields; the `interests` list
/// preserves this order.
pub const PREF_FIELDS: &[PrefField] = &[
    PrefField::WantsNode,
    PrefField::PreRegister,
    PrefField::StayInformed,
    PrefField::RouterPreregister,
    PrefField::Newsletter,
];

impl PrefField {
    pub fn token(&self) -> &'static str {
        match self {
            Self::WantsNode => "node",
            Self::PreRegister => "pre-register",
            Self::StayInformed => "stay-informed",
            Self::RouterPreregister => "router-pre-register",
            Self::Newsletter => "newsletter",
        }
    }
}

/// The single mutable entity of the funnel. Fields are written by the
/// step currently active and only cleared by a full restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub region: Region,
    pub wants_node: Option<bool>,
    pub pre_register: Option<bool>,
    pub stay_informed: Option<bool>,
    pub router_preregister: Option<bool>,
    pub newsletter: Option<bool>,
}

impl FormRecord {
    pub fn set_answer(&mut self, field: PrefField, value: bool) {
        match field {
            PrefField::WantsNode => self.wants_node = Some(value),
            PrefField::PreRegister => self.pre_register = Some(value),
            PrefField::StayInformed => self.stay_informed = Some(value),
            PrefField::RouterPreregister => self.router_preregister = Some(value),
            PrefField::Newsletter => self.newsletter = Some(value),
        }
    }

    pub fn answer(&self, field: PrefField) -> Option<bool> {
        match field {
            PrefField::WantsNode => self.wants_node,
            PrefField::PreRegister => self.pre_register,
            PrefField::StayInformed => self.stay_informed,
            PrefField::RouterPreregister => self.router_preregister,
            PrefField::Newsletter => self.newsletter,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Interests for the gateway payload: the region token (if set)
    /// followed by one token per affirmative answer, in declaration
    /// order. Unset and negative answers contribute nothing.
    pub fn interests(&self) -> Vec<String> {
        let mut interests = Vec::new();
        if let Some(token) = self.region.token() {
            interests.push(token.to_string());
        }
        for field in PREF_FIELDS {
            if self.answer(*field) == Some(true) {
                interests.push(field.token().to_string());
            }
        }
        interests
    }

    /// Validate the fields collected on the personal info step.
    /// An empty result means the forward transition is allowed.
    pub fn validate_identity(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push(FieldError {
                field: IdentityField::FirstName,
                message: "First name is required",
            });
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError {
                field: IdentityField::LastName,
                message: "Last name is required",
            });
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError {
                field: IdentityField::Email,
                message: "Email is required",
            });
        } else if !is_valid_email(self.email.trim()) {
            errors.push(FieldError {
                field: IdentityField::Email,
                message: "Invalid email format",
            });
        }
        errors
    }

    /// Full restart: every field back to empty/unanswered
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
