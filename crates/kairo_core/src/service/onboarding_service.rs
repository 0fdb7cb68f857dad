//! First-launch onboarding.
//!
//! # Contract
//! - Only valid while `is_first_time_user` is set.
//! - Completion clears the flag (which writes the storage marker), stores the
//!   user name and prepends one unread welcome message.

use crate::clock::Clock;
use crate::model::inbox::Message;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::next_id;
use crate::store::{Action, Store};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const WELCOME_SENDER: &str = "Maayo";
pub const WELCOME_SUBJECT: &str = "Welcome to Kairo!";
pub const WELCOME_BODY: &str = "I'm Maayo, founder of Kairo, and I'm thrilled you're here.

Kairo was built to help busy people and teams take control of their day, not just at work but in life. Whether you're managing client deadlines, household priorities, payments or personal goals, Kairo brings everything into one calm place so you can think clearly and act with confidence.

Welcome again. Here's to calmer days, clearer priorities, and getting the right things done.

Warmly,
Maayo
Founder, Kairo";

/// Onboarding form. Only the full name is stored; email is checked for shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingForm {
    pub full_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingError {
    AlreadyOnboarded,
    EmptyFullName,
    InvalidEmail(String),
    NoFreeMessageId,
}

impl Display for OnboardingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyOnboarded => write!(f, "onboarding already completed"),
            Self::EmptyFullName => write!(f, "full name is required"),
            Self::InvalidEmail(email) => write!(f, "invalid email address: {email}"),
            Self::NoFreeMessageId => write!(f, "no free message id"),
        }
    }
}

impl Error for OnboardingError {}

impl OnboardingForm {
    pub fn validate(&self) -> Result<(), OnboardingError> {
        if self.full_name.trim().is_empty() {
            return Err(OnboardingError::EmptyFullName);
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err(OnboardingError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

pub struct OnboardingService<'a, S: KeyValueStore, C: Clock> {
    store: &'a mut Store<S>,
    clock: C,
}

impl<'a, S: KeyValueStore, C: Clock> OnboardingService<'a, S, C> {
    pub fn new(store: &'a mut Store<S>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn is_pending(&self) -> bool {
        self.store.state().is_first_time_user
    }

    /// Completes onboarding; returns the welcome message id.
    pub fn complete(&mut self, form: &OnboardingForm) -> Result<i64, OnboardingError> {
        if !self.is_pending() {
            return Err(OnboardingError::AlreadyOnboarded);
        }
        form.validate()?;
        let now = self.clock.now();
        let id = next_id(
            self.store.state().messages.iter().map(|message| message.id),
            now.timestamp_millis(),
        )
        .ok_or(OnboardingError::NoFreeMessageId)?;

        self.store.dispatch(Action::SetFirstTimeUser(false));

        let mut settings = self.store.state().settings.as_ref().clone();
        settings.user_name = form.full_name.trim().to_string();
        self.store.dispatch(Action::SetSettings(settings));

        let current = &self.store.state().messages;
        let mut messages = Vec::with_capacity(current.len() + 1);
        messages.push(Message {
            id,
            from: WELCOME_SENDER.to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            body: WELCOME_BODY.to_string(),
            date: now,
            read: false,
        });
        messages.extend(current.iter().cloned());
        self.store.dispatch(Action::SetMessages(messages));

        info!("event=onboarding_complete module=service status=ok message_id={id}");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{OnboardingError, OnboardingForm};

    fn form(name: &str, email: &str) -> OnboardingForm {
        OnboardingForm {
            full_name: name.to_string(),
            email: email.to_string(),
            ..OnboardingForm::default()
        }
    }

    #[test]
    fn validation_requires_name_and_plausible_email() {
        assert_eq!(form("", "").validate(), Err(OnboardingError::EmptyFullName));
        assert!(form("Ada", "").validate().is_ok());
        assert!(form("Ada", "ada@example.com").validate().is_ok());
        assert!(matches!(
            form("Ada", "ada@localhost").validate(),
            Err(OnboardingError::InvalidEmail(_))
        ));
    }
}
