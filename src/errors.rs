// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a store action is rejected. A rejected action leaves the state untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("Amount {amount} exceeds remaining {remaining}")]
    ExceedsOutstanding { amount: Decimal, remaining: Decimal },
    #[error("Choose a currency first (USD, INR, EUR, GBP, JPY, AED)")]
    CurrencyNotChosen,
    #[error("Failed to persist snapshot: {0}")]
    Persistence(String),
}

impl StoreError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
