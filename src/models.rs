// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::month::MonthKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Anything the store keeps in an id-addressed collection.
pub trait Record {
    const KIND: &'static str;
    fn id(&self) -> Uuid;
}

macro_rules! record {
    ($ty:ty, $kind:literal) => {
        impl Record for $ty {
            const KIND: &'static str = $kind;
            fn id(&self) -> Uuid {
                self.id
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Inr,
    Eur,
    Gbp,
    Jpy,
    Aed,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Inr,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Aed,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Aed => "AED",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| format!("Unsupported currency '{}' (use USD|INR|EUR|GBP|JPY|AED)", s))
    }
}

/// Trailing month span used to scope charts, averages and non-carried totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DashboardWindow {
    One,
    #[default]
    Three,
    Six,
    Twelve,
}

impl DashboardWindow {
    pub fn months(&self) -> usize {
        match self {
            DashboardWindow::One => 1,
            DashboardWindow::Three => 3,
            DashboardWindow::Six => 6,
            DashboardWindow::Twelve => 12,
        }
    }
}

impl TryFrom<u8> for DashboardWindow {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DashboardWindow::One),
            3 => Ok(DashboardWindow::Three),
            6 => Ok(DashboardWindow::Six),
            12 => Ok(DashboardWindow::Twelve),
            other => Err(format!("Unsupported window {} (use 1|3|6|12)", other)),
        }
    }
}

impl From<DashboardWindow> for u8 {
    fn from(value: DashboardWindow) -> Self {
        value.months() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub recurring: bool,
}

impl Expense {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    /// Deadline.
    pub date: NaiveDate,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub emergency: bool,
}

impl SavingGoal {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Display progress, capped at 100 even when over-funded.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        crate::analytics::aggregate::share(self.saved_amount, self.target_amount)
            .min(Decimal::ONE_HUNDRED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Investment {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Money lent to someone else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: Uuid,
    pub person_name: String,
    #[serde(default)]
    pub reason: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_month: Option<MonthKey>,
    #[serde(default)]
    pub repaid: bool,
    #[serde(default)]
    pub repaid_amount: Decimal,
}

impl Loan {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoanType {
    Home,
    Car,
    Personal,
    Education,
    Gold,
    CreditCard,
    Business,
    Other,
}

impl LoanType {
    pub fn label(&self) -> &'static str {
        match self {
            LoanType::Home => "Home",
            LoanType::Car => "Car",
            LoanType::Personal => "Personal",
            LoanType::Education => "Education",
            LoanType::Gold => "Gold",
            LoanType::CreditCard => "Credit Card",
            LoanType::Business => "Business",
            LoanType::Other => "Other",
        }
    }
}

impl FromStr for LoanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "home" => Ok(LoanType::Home),
            "car" => Ok(LoanType::Car),
            "personal" => Ok(LoanType::Personal),
            "education" => Ok(LoanType::Education),
            "gold" => Ok(LoanType::Gold),
            "creditcard" => Ok(LoanType::CreditCard),
            "business" => Ok(LoanType::Business),
            "other" => Ok(LoanType::Other),
            _ => Err(format!("Unknown loan type '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiPayment {
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Money the user owes a lender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalLoan {
    pub id: Uuid,
    pub lender_name: String,
    pub loan_type: LoanType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type_label: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_loan_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outstanding_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_day_of_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_emi_date: Option<NaiveDate>,
    #[serde(default)]
    pub payments: Vec<EmiPayment>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PersonalLoan {
    pub fn start_month(&self) -> MonthKey {
        MonthKey::from_date(self.start_date)
    }

    pub fn type_label(&self) -> &str {
        match (self.loan_type, self.custom_type_label.as_deref()) {
            (LoanType::Other, Some(label)) if !label.trim().is_empty() => label,
            (t, _) => t.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsurance {
    pub id: Uuid,
    pub provider_name: String,
    pub plan_name: String,
    pub monthly_amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A fixed monthly bill tile. Paying it never creates an [`Expense`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub paid_months: BTreeSet<MonthKey>,
}

fn default_true() -> bool {
    true
}

record!(Expense, "Expense");
record!(SavingGoal, "Saving goal");
record!(Investment, "Investment");
record!(Loan, "Loan");
record!(PersonalLoan, "Personal loan");
record!(LifeInsurance, "Insurance policy");
record!(RecurringTemplate, "Recurring template");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Adjustments {
    pub manual_assets: Decimal,
    pub manual_liabilities: Decimal,
    pub essential_monthly_expense: Decimal,
    pub emergency_target_months: u32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            manual_assets: Decimal::ZERO,
            manual_liabilities: Decimal::ZERO,
            essential_monthly_expense: Decimal::ZERO,
            emergency_target_months: 6,
        }
    }
}

/// The whole tracker: preferences plus every entity collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceState {
    pub currency: Option<Currency>,
    pub selected_month: MonthKey,
    pub dashboard_window: DashboardWindow,
    pub spending_budget: Decimal,
    pub savings_budget: Decimal,
    pub monthly_budgets: BTreeMap<MonthKey, Decimal>,
    pub category_limits: BTreeMap<String, Decimal>,
    pub carry_forward_spending: bool,
    pub carry_forward_savings: bool,
    pub expenses: Vec<Expense>,
    pub saving_goals: Vec<SavingGoal>,
    pub investments: Vec<Investment>,
    pub loans: Vec<Loan>,
    pub personal_loans: Vec<PersonalLoan>,
    pub life_insurance: Vec<LifeInsurance>,
    pub recurring_templates: Vec<RecurringTemplate>,
    pub adjustments: Adjustments,
}

// Drafts carry the caller-editable fields of each entity. Ids and lifecycle
// flags (repaid, closed, paid, paid months) are owned by the store.

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub name: String,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub icon: String,
    pub note: Option<String>,
    pub recurring: bool,
}

impl From<&Expense> for ExpenseDraft {
    fn from(e: &Expense) -> Self {
        Self {
            name: e.name.clone(),
            category: e.category.clone(),
            amount: e.amount,
            date: e.date,
            icon: e.icon.clone(),
            note: e.note.clone(),
            recurring: e.recurring,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub name: String,
    pub category: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    pub date: NaiveDate,
    pub icon: String,
    pub emergency: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentDraft {
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanDraft {
    pub person_name: String,
    pub reason: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub due_month: Option<MonthKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalLoanDraft {
    pub lender_name: String,
    pub loan_type: LoanType,
    pub custom_type_label: Option<String>,
    pub start_date: NaiveDate,
    pub total_loan_amount: Option<Decimal>,
    pub outstanding_amount: Option<Decimal>,
    pub emi_amount: Option<Decimal>,
    pub emi_day_of_month: Option<u32>,
    pub next_emi_date: Option<NaiveDate>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsuranceDraft {
    pub provider_name: String,
    pub plan_name: String,
    pub monthly_amount: Decimal,
    pub due_date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub icon: String,
}
