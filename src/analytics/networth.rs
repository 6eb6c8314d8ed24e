// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::aggregate::{goals_in_scope, investments_in_scope, share, sum_amounts};
use super::loans::{personal_outstanding, total_personal_outstanding, total_receivable_outstanding};
use super::window::{month_span, spent_for_month, window_months};
use crate::models::{FinanceState, SavingGoal};
use crate::month::MonthKey;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Trailing months averaged when no essential monthly expense is configured.
pub const BASELINE_MONTHS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPosition {
    pub investing_assets: Decimal,
    pub money_lent_receivable: Decimal,
    pub manual_assets: Decimal,
    pub total_assets: Decimal,
    pub personal_loan_liabilities: Decimal,
    pub manual_liabilities: Decimal,
    pub total_liabilities: Decimal,
    pub net: Decimal,
}

pub fn net_position(state: &FinanceState) -> NetPosition {
    let saved = sum_amounts(goals_in_scope(state).iter().map(|g| g.saved_amount));
    let invested = sum_amounts(investments_in_scope(state).iter().map(|i| i.amount));
    let investing_assets = saved.saturating_add(invested);
    let money_lent_receivable = total_receivable_outstanding(state);
    let manual_assets = state.adjustments.manual_assets;
    let personal_loan_liabilities = total_personal_outstanding(state);
    let manual_liabilities = state.adjustments.manual_liabilities;

    let total_assets = sum_amounts([investing_assets, money_lent_receivable, manual_assets]);
    let total_liabilities = personal_loan_liabilities.saturating_add(manual_liabilities);
    NetPosition {
        investing_assets,
        money_lent_receivable,
        manual_assets,
        total_assets,
        personal_loan_liabilities,
        manual_liabilities,
        total_liabilities,
        net: total_assets.saturating_sub(total_liabilities),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: MonthKey,
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "points", rename_all = "camelCase")]
pub enum NetWorthTrend {
    /// Fewer than two months to plot.
    InsufficientData,
    Series(Vec<TrendPoint>),
}

fn earliest_record_month(state: &FinanceState) -> Option<MonthKey> {
    let goals = state.saving_goals.iter().map(|g| g.month());
    let investments = state.investments.iter().map(|i| i.month());
    let loans = state.loans.iter().map(|l| l.month());
    let liabilities = state.personal_loans.iter().map(|p| p.start_month());
    goals.chain(investments).chain(loans).chain(liabilities).min()
}

/// Cumulative assets, liabilities and net per month, from the earliest dated
/// record through the selected month.
pub fn net_worth_trend(state: &FinanceState) -> NetWorthTrend {
    let Some(start) = earliest_record_month(state) else {
        return NetWorthTrend::InsufficientData;
    };
    let points: Vec<TrendPoint> = month_span(start, state.selected_month)
        .into_iter()
        .map(|month| {
            let saved = sum_amounts(
                state
                    .saving_goals
                    .iter()
                    .filter(|g| g.month() <= month)
                    .map(|g| g.saved_amount),
            );
            let invested = sum_amounts(
                state
                    .investments
                    .iter()
                    .filter(|i| i.month() <= month)
                    .map(|i| i.amount),
            );
            let liabilities = sum_amounts(
                state
                    .personal_loans
                    .iter()
                    .filter(|p| p.start_month() <= month)
                    .map(personal_outstanding),
            );
            let assets = saved.saturating_add(invested);
            TrendPoint {
                month,
                assets,
                liabilities,
                net: assets.saturating_sub(liabilities),
            }
        })
        .collect();
    if points.len() < 2 {
        NetWorthTrend::InsufficientData
    } else {
        NetWorthTrend::Series(points)
    }
}

/// The emergency fund: the first goal flagged as such, else the first whose
/// name or category mentions "emergency".
pub fn emergency_goal(state: &FinanceState) -> Option<&SavingGoal> {
    let mentions = |text: &str| text.to_lowercase().contains("emergency");
    state
        .saving_goals
        .iter()
        .find(|g| g.emergency)
        .or_else(|| {
            state
                .saving_goals
                .iter()
                .find(|g| mentions(&g.name) || mentions(&g.category))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BaselineSource {
    EssentialExpense,
    TrailingAverage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub amount: Decimal,
    pub source: BaselineSource,
}

/// Monthly cost the emergency fund is measured against.
pub fn baseline_monthly_cost(state: &FinanceState) -> Baseline {
    let essential = state.adjustments.essential_monthly_expense;
    if essential > Decimal::ZERO {
        return Baseline {
            amount: essential,
            source: BaselineSource::EssentialExpense,
        };
    }
    let months = window_months(state.selected_month, BASELINE_MONTHS);
    let total = sum_amounts(months.iter().map(|m| spent_for_month(state, *m)));
    Baseline {
        amount: total / Decimal::from(BASELINE_MONTHS as u64),
        source: BaselineSource::TrailingAverage,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub goal_id: Uuid,
    pub goal_name: String,
    pub saved: Decimal,
    pub baseline: Baseline,
    pub months_covered: Decimal,
    pub target_months: u32,
    pub progress: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "report", rename_all = "camelCase")]
pub enum EmergencyReadiness {
    /// No goal could be identified as the emergency fund.
    Undetermined,
    Assessed(ReadinessReport),
}

pub fn emergency_readiness(state: &FinanceState) -> EmergencyReadiness {
    let Some(goal) = emergency_goal(state) else {
        return EmergencyReadiness::Undetermined;
    };
    let baseline = baseline_monthly_cost(state);
    let target_months = state.adjustments.emergency_target_months;
    let (months_covered, progress) = if baseline.amount.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let covered = goal
            .saved_amount
            .checked_div(baseline.amount)
            .unwrap_or(Decimal::MAX);
        let progress = share(covered, Decimal::from(target_months)).min(Decimal::ONE_HUNDRED);
        (covered, progress)
    };
    EmergencyReadiness::Assessed(ReadinessReport {
        goal_id: goal.id,
        goal_name: goal.name.clone(),
        saved: goal.saved_amount,
        baseline,
        months_covered,
        target_months,
        progress,
    })
}
