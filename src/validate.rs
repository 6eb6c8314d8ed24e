// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Checks applied at the mutation boundary before an action is accepted.

use crate::errors::StoreError;
use crate::models::{
    Adjustments, ExpenseDraft, GoalDraft, InsuranceDraft, InvestmentDraft, LoanDraft, LoanType,
    PersonalLoanDraft, TemplateDraft,
};
use rust_decimal::Decimal;

pub fn require_text(field: &'static str, value: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Largest amount accepted for any money field (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

fn require_within_cap(field: &'static str, value: Decimal) -> Result<Decimal, StoreError> {
    if value > MAX_AMOUNT {
        return Err(StoreError::invalid(
            field,
            format!("{} is above the maximum of {}", value, MAX_AMOUNT),
        ));
    }
    Ok(value)
}

pub fn require_positive(field: &'static str, value: Decimal) -> Result<Decimal, StoreError> {
    if value <= Decimal::ZERO {
        return Err(StoreError::NotPositive { field });
    }
    require_within_cap(field, value)
}

pub fn require_non_negative(field: &'static str, value: Decimal) -> Result<Decimal, StoreError> {
    if value < Decimal::ZERO {
        return Err(StoreError::Negative { field });
    }
    require_within_cap(field, value)
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Normalizes a draft in place (trimmed text, dropped blank notes) or rejects it.
pub trait Validate: Sized {
    fn validated(self) -> Result<Self, StoreError>;
}

impl Validate for ExpenseDraft {
    fn validated(self) -> Result<Self, StoreError> {
        Ok(Self {
            name: require_text("name", &self.name)?,
            category: require_text("category", &self.category)?,
            amount: require_positive("amount", self.amount)?,
            icon: self.icon.trim().to_string(),
            note: optional_text(self.note),
            ..self
        })
    }
}

impl Validate for GoalDraft {
    fn validated(self) -> Result<Self, StoreError> {
        Ok(Self {
            name: require_text("name", &self.name)?,
            category: require_text("category", &self.category)?,
            target_amount: require_positive("target amount", self.target_amount)?,
            saved_amount: require_non_negative("saved amount", self.saved_amount)?,
            icon: self.icon.trim().to_string(),
            ..self
        })
    }
}

impl Validate for InvestmentDraft {
    fn validated(self) -> Result<Self, StoreError> {
        Ok(Self {
            title: require_text("title", &self.title)?,
            category: require_text("category", &self.category)?,
            amount: require_positive("amount", self.amount)?,
            note: optional_text(self.note),
            ..self
        })
    }
}

impl Validate for LoanDraft {
    fn validated(self) -> Result<Self, StoreError> {
        Ok(Self {
            person_name: require_text("person name", &self.person_name)?,
            reason: self.reason.trim().to_string(),
            amount: require_positive("amount", self.amount)?,
            ..self
        })
    }
}

impl Validate for PersonalLoanDraft {
    fn validated(self) -> Result<Self, StoreError> {
        let custom_type_label = optional_text(self.custom_type_label);
        if self.loan_type == LoanType::Other && custom_type_label.is_none() {
            return Err(StoreError::EmptyField {
                field: "custom loan type",
            });
        }
        if let Some(total) = self.total_loan_amount {
            require_positive("total loan amount", total)?;
        }
        if let Some(outstanding) = self.outstanding_amount {
            require_non_negative("outstanding amount", outstanding)?;
        }
        if let Some(emi) = self.emi_amount {
            require_positive("EMI amount", emi)?;
        }
        if let Some(day) = self.emi_day_of_month {
            if !(1..=31).contains(&day) {
                return Err(StoreError::invalid(
                    "EMI day of month",
                    format!("{} is not between 1 and 31", day),
                ));
            }
        }
        Ok(Self {
            lender_name: require_text("lender name", &self.lender_name)?,
            custom_type_label,
            note: optional_text(self.note),
            ..self
        })
    }
}

impl Validate for InsuranceDraft {
    fn validated(self) -> Result<Self, StoreError> {
        Ok(Self {
            provider_name: require_text("provider name", &self.provider_name)?,
            plan_name: require_text("plan name", &self.plan_name)?,
            monthly_amount: require_positive("monthly amount", self.monthly_amount)?,
            note: optional_text(self.note),
            ..self
        })
    }
}

impl Validate for TemplateDraft {
    fn validated(self) -> Result<Self, StoreError> {
        Ok(Self {
            title: require_text("title", &self.title)?,
            category: require_text("category", &self.category)?,
            amount: require_positive("amount", self.amount)?,
            icon: self.icon.trim().to_string(),
        })
    }
}

impl Validate for Adjustments {
    fn validated(self) -> Result<Self, StoreError> {
        if self.emergency_target_months < 1 {
            return Err(StoreError::NotPositive {
                field: "emergency target months",
            });
        }
        Ok(Self {
            manual_assets: require_non_negative("manual assets", self.manual_assets)?,
            manual_liabilities: require_non_negative("manual liabilities", self.manual_liabilities)?,
            essential_monthly_expense: require_non_negative(
                "essential monthly expense",
                self.essential_monthly_expense,
            )?,
            ..self
        })
    }
}
