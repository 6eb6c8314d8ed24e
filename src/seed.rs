// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed starter dataset used when no usable snapshot exists.

use crate::models::{
    Adjustments, DashboardWindow, EmiPayment, Expense, FinanceState, Investment, LifeInsurance,
    Loan, LoanType, PersonalLoan, RecurringTemplate, SavingGoal,
};
use crate::month::MonthKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn month(y: i32, m: u32) -> MonthKey {
    MonthKey::new(y, m).unwrap_or_default()
}

/// Stable id for seed record `n`; the first eight hex digits are `n`, so
/// short ids stay distinct.
pub fn seed_id(n: u32) -> Uuid {
    Uuid::from_u128((u128::from(n) << 96) | 0x5eed)
}

fn money(units: i64, scale: u32) -> Decimal {
    Decimal::new(units, scale)
}

pub fn seed_state() -> FinanceState {
    FinanceState {
        currency: None,
        selected_month: month(2026, 2),
        dashboard_window: DashboardWindow::Three,
        spending_budget: money(3000, 0),
        savings_budget: money(1000, 0),
        monthly_budgets: BTreeMap::new(),
        category_limits: BTreeMap::from([("Groceries".to_string(), money(400, 0))]),
        carry_forward_spending: true,
        carry_forward_savings: true,
        expenses: vec![
            Expense {
                id: seed_id(0x1001),
                name: "Groceries".into(),
                category: "Groceries".into(),
                amount: money(56, 0),
                date: day(2026, 2, 18),
                icon: "🛒".into(),
                note: None,
                recurring: false,
            },
            Expense {
                id: seed_id(0x1002),
                name: "Lunch".into(),
                category: "Lunch".into(),
                amount: money(125, 1),
                date: day(2026, 2, 19),
                icon: "🍱".into(),
                note: None,
                recurring: false,
            },
            Expense {
                id: seed_id(0x1003),
                name: "Electricity".into(),
                category: "Utilities".into(),
                amount: money(80, 0),
                date: day(2026, 1, 6),
                icon: "💡".into(),
                note: Some("January bill".into()),
                recurring: true,
            },
        ],
        saving_goals: vec![
            SavingGoal {
                id: seed_id(0x2001),
                name: "Emergency Fund".into(),
                category: "Safety".into(),
                target_amount: money(5000, 0),
                saved_amount: money(800, 0),
                date: day(2026, 12, 31),
                icon: "🛟".into(),
                emergency: true,
            },
            SavingGoal {
                id: seed_id(0x2002),
                name: "Vacation".into(),
                category: "Travel".into(),
                target_amount: money(1500, 0),
                saved_amount: money(300, 0),
                date: day(2026, 8, 1),
                icon: "🏖️".into(),
                emergency: false,
            },
        ],
        investments: vec![Investment {
            id: seed_id(0x3001),
            title: "Index fund".into(),
            category: "Mutual funds".into(),
            amount: money(500, 0),
            date: day(2026, 1, 10),
            note: None,
        }],
        loans: vec![Loan {
            id: seed_id(0x4001),
            person_name: "Rahul".into(),
            reason: "Concert tickets".into(),
            amount: money(80, 0),
            date: day(2026, 2, 10),
            due_month: Some(month(2026, 3)),
            repaid: false,
            repaid_amount: Decimal::ZERO,
        }],
        personal_loans: vec![PersonalLoan {
            id: seed_id(0x5001),
            lender_name: "City Bank".into(),
            loan_type: LoanType::Car,
            custom_type_label: None,
            start_date: day(2025, 11, 5),
            total_loan_amount: Some(money(1000, 0)),
            outstanding_amount: None,
            emi_amount: Some(money(150, 0)),
            emi_day_of_month: Some(5),
            next_emi_date: Some(day(2026, 3, 5)),
            payments: vec![EmiPayment {
                amount: money(200, 0),
                date: Some(day(2025, 12, 5)),
            }],
            closed: false,
            note: None,
        }],
        life_insurance: vec![LifeInsurance {
            id: seed_id(0x6001),
            provider_name: "SafeLife".into(),
            plan_name: "Term cover".into(),
            monthly_amount: money(45, 0),
            due_date: day(2026, 2, 28),
            paid: false,
            note: None,
        }],
        recurring_templates: vec![
            RecurringTemplate {
                id: seed_id(0x7001),
                title: "Rent".into(),
                category: "Housing".into(),
                amount: money(1200, 0),
                icon: "🏠".into(),
                active: true,
                paid_months: BTreeSet::from([month(2026, 1)]),
            },
            RecurringTemplate {
                id: seed_id(0x7002),
                title: "Streaming".into(),
                category: "Entertainment".into(),
                amount: money(15, 0),
                icon: "📺".into(),
                active: true,
                paid_months: BTreeSet::new(),
            },
        ],
        adjustments: Adjustments::default(),
    }
}
