// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::month_or_selected;
use crate::analytics::aggregate::{
    BudgetSummary, SavingsSummary, budget_for_month, budget_summary, category_totals,
    lifetime_spent, limit_statuses, monthly_spending, over_limit_count, savings_summary,
};
use crate::analytics::insurance::{
    insurance_due_soon, overdue_insurance, total_monthly_premium, unpaid_premium_total,
};
use crate::analytics::loans::{
    LendingSummary, due_soon_personal_loans, lending_summary, overdue_loans,
    overdue_personal_loans, receivable_outstanding, total_monthly_emi_due,
    total_personal_outstanding,
};
use crate::analytics::networth::{
    BaselineSource, EmergencyReadiness, NetWorthTrend, emergency_readiness, net_position,
    net_worth_trend,
};
use crate::analytics::recurring::{monthly_recurring_total, recurring_summary};
use crate::models::{Currency, FinanceState};
use crate::month::MonthKey;
use crate::store::Store;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub, today)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("limits", sub)) => limits(store, sub)?,
        Some(("spending", sub)) => spending(store, sub)?,
        Some(("networth", sub)) => networth(store, sub)?,
        Some(("trend", sub)) => trend(store, sub)?,
        Some(("readiness", sub)) => readiness(store, sub)?,
        Some(("recurring", sub)) => recurring(store, sub)?,
        Some(("dues", sub)) => {
            let days = *sub.get_one::<i64>("days").context("Missing --days")?;
            let items = dues(store.state(), today, days);
            if !maybe_print_json(sub.get_flag("json"), &items)? {
                print_dues(store.state().currency, &items);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Headline figures for the selected month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub currency: Option<Currency>,
    pub month: MonthKey,
    pub window_months: usize,
    pub budget: BudgetSummary,
    pub lifetime_spent: Decimal,
    pub over_limit_count: usize,
    pub savings: SavingsSummary,
    pub lending: LendingSummary,
    pub monthly_emi_due: Decimal,
    pub personal_outstanding: Decimal,
    pub monthly_premium: Decimal,
    pub unpaid_premium: Decimal,
    pub recurring_total: Decimal,
    pub net_worth: Decimal,
}

pub fn overview(state: &FinanceState, today: NaiveDate) -> Overview {
    let month = state.selected_month;
    Overview {
        currency: state.currency,
        month,
        window_months: state.dashboard_window.months(),
        budget: budget_summary(state, month),
        lifetime_spent: lifetime_spent(state),
        over_limit_count: over_limit_count(state, month),
        savings: savings_summary(state),
        lending: lending_summary(state, today),
        monthly_emi_due: total_monthly_emi_due(state),
        personal_outstanding: total_personal_outstanding(state),
        monthly_premium: total_monthly_premium(state),
        unpaid_premium: unpaid_premium_total(state),
        recurring_total: monthly_recurring_total(state, month),
        net_worth: net_position(state).net,
    }
}

fn summary(store: &Store, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let o = overview(store.state(), today);
    if maybe_print_json(sub.get_flag("json"), &o)? {
        return Ok(());
    }
    let ccy = o.currency;
    let rows = vec![
        vec!["Month".into(), o.month.to_string()],
        vec!["Budget".into(), fmt_money(&o.budget.budget, ccy)],
        vec!["Spent this month".into(), fmt_money(&o.budget.spent, ccy)],
        vec!["Left".into(), fmt_money(&o.budget.left, ccy)],
        vec!["Used".into(), fmt_percent(&o.budget.percent_used)],
        vec!["Categories over limit".into(), o.over_limit_count.to_string()],
        vec!["Spent (lifetime)".into(), fmt_money(&o.lifetime_spent, ccy)],
        vec!["Saved".into(), fmt_money(&o.savings.total_saved, ccy)],
        vec!["Invested".into(), fmt_money(&o.savings.total_invested, ccy)],
        vec![
            "Savings budget progress".into(),
            fmt_percent(&o.savings.budget_progress),
        ],
        vec!["Lent outstanding".into(), fmt_money(&o.lending.outstanding, ccy)],
        vec!["Loans outstanding".into(), fmt_money(&o.personal_outstanding, ccy)],
        vec!["EMIs per month".into(), fmt_money(&o.monthly_emi_due, ccy)],
        vec!["Premiums per month".into(), fmt_money(&o.monthly_premium, ccy)],
        vec!["Recurring this month".into(), fmt_money(&o.recurring_total, ccy)],
        vec!["Net worth".into(), fmt_money(&o.net_worth, ccy)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn categories(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_selected(store, sub)?;
    let totals = category_totals(store.state(), month);
    if maybe_print_json(sub.get_flag("json"), &totals)? {
        return Ok(());
    }
    let ccy = store.state().currency;
    let data = totals
        .iter()
        .map(|t| {
            vec![
                t.category.clone(),
                fmt_money(&t.amount, ccy),
                fmt_percent(&t.percentage),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    Ok(())
}

fn limits(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_selected(store, sub)?;
    let statuses = limit_statuses(store.state(), month);
    if maybe_print_json(sub.get_flag("json"), &statuses)? {
        return Ok(());
    }
    let ccy = store.state().currency;
    let data = statuses
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                fmt_money(&s.limit, ccy),
                fmt_money(&s.spent, ccy),
                fmt_money(&s.remaining, ccy),
                if s.over_limit { "OVER".into() } else { "ok".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Limit", "Spent", "Remaining", "Status"], data)
    );
    Ok(())
}

fn spending(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let state = store.state();
    let series = monthly_spending(
        state,
        state.selected_month,
        state.dashboard_window.months(),
    );
    if maybe_print_json(sub.get_flag("json"), &series)? {
        return Ok(());
    }
    let data = series
        .iter()
        .map(|s| {
            vec![
                s.month.to_string(),
                fmt_money(&s.amount, state.currency),
                fmt_money(&budget_for_month(state, s.month), state.currency),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Spent", "Budget"], data));
    Ok(())
}

fn networth(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let n = net_position(store.state());
    if maybe_print_json(sub.get_flag("json"), &n)? {
        return Ok(());
    }
    let ccy = store.state().currency;
    let rows = vec![
        vec!["Savings and investments".into(), fmt_money(&n.investing_assets, ccy)],
        vec!["Money lent".into(), fmt_money(&n.money_lent_receivable, ccy)],
        vec!["Other assets".into(), fmt_money(&n.manual_assets, ccy)],
        vec!["Total assets".into(), fmt_money(&n.total_assets, ccy)],
        vec!["Loans".into(), fmt_money(&n.personal_loan_liabilities, ccy)],
        vec!["Other liabilities".into(), fmt_money(&n.manual_liabilities, ccy)],
        vec!["Total liabilities".into(), fmt_money(&n.total_liabilities, ccy)],
        vec!["Net worth".into(), fmt_money(&n.net, ccy)],
    ];
    println!("{}", pretty_table(&["Line", "Amount"], rows));
    Ok(())
}

fn trend(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let t = net_worth_trend(store.state());
    if maybe_print_json(sub.get_flag("json"), &t)? {
        return Ok(());
    }
    match t {
        NetWorthTrend::InsufficientData => {
            println!("Not enough history for a trend yet (needs at least two months)");
        }
        NetWorthTrend::Series(points) => {
            let ccy = store.state().currency;
            let data = points
                .iter()
                .map(|p| {
                    vec![
                        p.month.to_string(),
                        fmt_money(&p.assets, ccy),
                        fmt_money(&p.liabilities, ccy),
                        fmt_money(&p.net, ccy),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Month", "Assets", "Liabilities", "Net"], data)
            );
        }
    }
    Ok(())
}

fn readiness(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let r = emergency_readiness(store.state());
    if maybe_print_json(sub.get_flag("json"), &r)? {
        return Ok(());
    }
    match r {
        EmergencyReadiness::Undetermined => {
            println!("No emergency fund goal found (flag one with: goal add --emergency)");
        }
        EmergencyReadiness::Assessed(report) => {
            let ccy = store.state().currency;
            let source = match report.baseline.source {
                BaselineSource::EssentialExpense => "essential expense",
                BaselineSource::TrailingAverage => "3-month average",
            };
            let rows = vec![
                vec!["Goal".into(), report.goal_name.clone()],
                vec!["Saved".into(), fmt_money(&report.saved, ccy)],
                vec![
                    "Monthly baseline".into(),
                    format!("{} ({})", fmt_money(&report.baseline.amount, ccy), source),
                ],
                vec![
                    "Months covered".into(),
                    format!("{:.1}", report.months_covered.round_dp(1)),
                ],
                vec!["Target months".into(), report.target_months.to_string()],
                vec!["Progress".into(), fmt_percent(&report.progress)],
            ];
            println!("{}", pretty_table(&["Emergency fund", "Value"], rows));
        }
    }
    Ok(())
}

fn recurring(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_selected(store, sub)?;
    let s = recurring_summary(store.state(), month);
    if maybe_print_json(sub.get_flag("json"), &s)? {
        return Ok(());
    }
    let ccy = store.state().currency;
    let rows = vec![
        vec!["Bills paid".into(), fmt_money(&s.templates_paid, ccy)],
        vec!["Bills pending".into(), fmt_money(&s.templates_pending, ccy)],
        vec!["Recurring expenses".into(), fmt_money(&s.ledger_flagged, ccy)],
        vec!["Total".into(), fmt_money(&s.total, ccy)],
        vec!["Active bills".into(), s.active_templates.to_string()],
    ];
    let header = format!("Recurring {}", month);
    println!("{}", pretty_table(&[header.as_str(), "Amount"], rows));
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueItem {
    pub kind: &'static str,
    pub name: String,
    pub amount: Decimal,
    /// A day, or a month for receivables.
    pub when: String,
    pub overdue: bool,
}

/// Upcoming and overdue obligations, earliest first.
pub fn dues(state: &FinanceState, today: NaiveDate, days: i64) -> Vec<DueItem> {
    let mut items = Vec::new();
    for (loans, overdue) in [
        (due_soon_personal_loans(state, today, days), false),
        (overdue_personal_loans(state, today), true),
    ] {
        items.extend(loans.into_iter().map(|l| DueItem {
            kind: "emi",
            name: l.lender_name.clone(),
            amount: l.emi_amount.unwrap_or(Decimal::ZERO),
            when: l.next_emi_date.map(|d| d.to_string()).unwrap_or_default(),
            overdue,
        }));
    }
    for (policies, overdue) in [
        (insurance_due_soon(state, today, days), false),
        (overdue_insurance(state, today), true),
    ] {
        items.extend(policies.into_iter().map(|p| DueItem {
            kind: "premium",
            name: format!("{} {}", p.provider_name, p.plan_name),
            amount: p.monthly_amount,
            when: p.due_date.to_string(),
            overdue,
        }));
    }
    items.extend(overdue_loans(state, today).into_iter().map(|l| DueItem {
        kind: "receivable",
        name: l.person_name.clone(),
        amount: receivable_outstanding(l),
        when: l.due_month.map(|m| m.to_string()).unwrap_or_default(),
        overdue: true,
    }));
    items.sort_by(|a, b| a.when.cmp(&b.when));
    items
}

fn print_dues(ccy: Option<Currency>, items: &[DueItem]) {
    if items.is_empty() {
        println!("Nothing due");
        return;
    }
    let data = items
        .iter()
        .map(|i| {
            vec![
                i.kind.to_string(),
                i.name.clone(),
                fmt_money(&i.amount, ccy),
                i.when.clone(),
                if i.overdue { "overdue".into() } else { "due soon".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Kind", "Name", "Amount", "When", "Status"], data)
    );
}
