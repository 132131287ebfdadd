//! # Lead-Capture Form
//!
//! Three steps, each gated on its own fields:
//!
//! ```text
//! Personal ──advance()──► Address ──advance()──► Review ──submit()──► CheckoutProfile
//!    name, tax id ≥ 11,      postal code ≥ 8,
//!    phone ≥ 10, birth date  street, number, district, city, state
//! ```
//!
//! Email and company are collected but optional.

use crate::format::{format_phone, format_postal_code, format_tax_id};
use crate::guard::{complete_checkout, CheckoutError, CheckoutOutcome, Navigator};
use minisite_document::CheckoutProfile;
use minisite_renderer::AnalyticsSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

const MIN_TAX_ID_LEN: usize = 11;
const MIN_PHONE_LEN: usize = 10;
const MIN_POSTAL_CODE_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Personal,
    Address,
    Review,
}

impl CheckoutStep {
    /// 1-based position for step indicators
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Personal => 1,
            CheckoutStep::Address => 2,
            CheckoutStep::Review => 3,
        }
    }

    fn next(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Personal => Some(CheckoutStep::Address),
            CheckoutStep::Address => Some(CheckoutStep::Review),
            CheckoutStep::Review => None,
        }
    }

    fn previous(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Personal => None,
            CheckoutStep::Address => Some(CheckoutStep::Personal),
            CheckoutStep::Review => Some(CheckoutStep::Address),
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStep::Personal => "personal",
            CheckoutStep::Address => "address",
            CheckoutStep::Review => "review",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    TaxId,
    BirthDate,
    Phone,
    Email,
    Company,
    PostalCode,
    Street,
    Number,
    District,
    City,
    State,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{step} step is incomplete: {missing:?}")]
    Incomplete {
        step: CheckoutStep,
        missing: Vec<ProfileField>,
    },

    #[error("the form can only be submitted from the review step")]
    NotAtReview,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Checkout form for one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub product_name: String,
    pub product_price: String,
    target: String,
    step: CheckoutStep,
    profile: CheckoutProfile,
}

impl CheckoutForm {
    /// `target` is the merchant redirect, checked only when the form completes
    pub fn new(
        product_name: impl Into<String>,
        product_price: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            product_price: product_price.into(),
            target: target.into(),
            step: CheckoutStep::Personal,
            profile: CheckoutProfile::default(),
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn profile(&self) -> &CheckoutProfile {
        &self.profile
    }

    /// Set a field, applying its input mask
    pub fn set(&mut self, field: ProfileField, value: &str) {
        let profile = &mut self.profile;
        match field {
            ProfileField::FullName => profile.full_name = value.to_string(),
            ProfileField::TaxId => profile.tax_id = format_tax_id(value),
            ProfileField::BirthDate => profile.birth_date = value.to_string(),
            ProfileField::Phone => profile.phone = format_phone(value),
            ProfileField::Email => profile.email = value.to_string(),
            ProfileField::Company => {
                profile.company = (!value.is_empty()).then(|| value.to_string())
            }
            ProfileField::PostalCode => profile.postal_code = format_postal_code(value),
            ProfileField::Street => profile.street = value.to_string(),
            ProfileField::Number => profile.number = value.to_string(),
            ProfileField::District => profile.district = value.to_string(),
            ProfileField::City => profile.city = value.to_string(),
            ProfileField::State => profile.state = value.to_string(),
        }
    }

    /// Required fields of `step` that are still missing or too short
    pub fn missing(&self, step: CheckoutStep) -> Vec<ProfileField> {
        let p = &self.profile;
        let checks: Vec<(ProfileField, bool)> = match step {
            CheckoutStep::Personal => vec![
                (ProfileField::FullName, !p.full_name.trim().is_empty()),
                (ProfileField::TaxId, p.tax_id.chars().count() >= MIN_TAX_ID_LEN),
                (ProfileField::Phone, p.phone.chars().count() >= MIN_PHONE_LEN),
                (ProfileField::BirthDate, !p.birth_date.trim().is_empty()),
            ],
            CheckoutStep::Address => vec![
                (
                    ProfileField::PostalCode,
                    p.postal_code.chars().count() >= MIN_POSTAL_CODE_LEN,
                ),
                (ProfileField::Street, !p.street.trim().is_empty()),
                (ProfileField::Number, !p.number.trim().is_empty()),
                (ProfileField::District, !p.district.trim().is_empty()),
                (ProfileField::City, !p.city.trim().is_empty()),
                (ProfileField::State, !p.state.trim().is_empty()),
            ],
            CheckoutStep::Review => Vec::new(),
        };

        checks
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_valid(&self, step: CheckoutStep) -> bool {
        self.missing(step).is_empty()
    }

    /// Move to the next step if the current one validates
    pub fn advance(&mut self) -> Result<CheckoutStep, FormError> {
        let missing = self.missing(self.step);
        if !missing.is_empty() {
            return Err(FormError::Incomplete {
                step: self.step,
                missing,
            });
        }
        if let Some(next) = self.step.next() {
            debug!(from = %self.step, to = %next, "checkout step advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> CheckoutStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// The captured profile, once every step validates
    pub fn submit(&self) -> Result<CheckoutProfile, FormError> {
        if self.step != CheckoutStep::Review {
            return Err(FormError::NotAtReview);
        }
        for step in [CheckoutStep::Personal, CheckoutStep::Address] {
            let missing = self.missing(step);
            if !missing.is_empty() {
                return Err(FormError::Incomplete { step, missing });
            }
        }
        Ok(self.profile.clone())
    }

    /// Submit and hand the profile to the checkout guard
    pub fn finish<N: Navigator, S: AnalyticsSink>(
        &self,
        navigator: &mut N,
        sink: &mut S,
    ) -> Result<CheckoutOutcome, FormError> {
        let profile = self.submit()?;
        Ok(complete_checkout(&self.target, &profile, navigator, sink)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_personal(form: &mut CheckoutForm) {
        form.set(ProfileField::FullName, "Ana Souza");
        form.set(ProfileField::TaxId, "12345678901");
        form.set(ProfileField::Phone, "11987654321");
        form.set(ProfileField::BirthDate, "1990-04-01");
    }

    #[test]
    fn test_personal_step_gates_advance() {
        let mut form = CheckoutForm::new("Course", "R$ 97,00", "#");
        form.set(ProfileField::FullName, "Ana");

        match form.advance() {
            Err(FormError::Incomplete { step, missing }) => {
                assert_eq!(step, CheckoutStep::Personal);
                assert_eq!(
                    missing,
                    vec![ProfileField::TaxId, ProfileField::Phone, ProfileField::BirthDate]
                );
            }
            other => panic!("Expected incomplete, got {:?}", other),
        }
        assert_eq!(form.step(), CheckoutStep::Personal);

        fill_personal(&mut form);
        assert_eq!(form.advance().unwrap(), CheckoutStep::Address);
    }

    #[test]
    fn test_masks_are_applied_on_set() {
        let mut form = CheckoutForm::new("Course", "", "#");
        form.set(ProfileField::TaxId, "12345678901");
        form.set(ProfileField::PostalCode, "01310100");
        form.set(ProfileField::Company, "");

        assert_eq!(form.profile().tax_id, "123.456.789-01");
        assert_eq!(form.profile().postal_code, "01310-100");
        assert_eq!(form.profile().company, None);
    }

    #[test]
    fn test_back_stops_at_first_step() {
        let mut form = CheckoutForm::new("Course", "", "#");
        fill_personal(&mut form);
        form.advance().unwrap();

        assert_eq!(form.back(), CheckoutStep::Personal);
        assert_eq!(form.back(), CheckoutStep::Personal);
        assert_eq!(form.step().number(), 1);
    }

    #[test]
    fn test_submit_requires_review() {
        let mut form = CheckoutForm::new("Course", "", "#");
        fill_personal(&mut form);
        assert_eq!(form.submit(), Err(FormError::NotAtReview));
    }
}
