// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The state container. Every action works on a copy of the current state and
//! swaps it in only when the whole action succeeds, then hands the full
//! snapshot to the persistence adapter.

use crate::analytics::loans::{effective_repaid, personal_outstanding, receivable_outstanding};
use crate::db::{SnapshotAdapter, decode_snapshot, encode_snapshot};
use crate::errors::StoreError;
use crate::models::{
    Adjustments, Currency, DashboardWindow, EmiPayment, Expense, ExpenseDraft, FinanceState,
    GoalDraft, InsuranceDraft, Investment, InvestmentDraft, LifeInsurance, Loan, LoanDraft,
    PersonalLoan, PersonalLoanDraft, Record, RecurringTemplate, SavingGoal, TemplateDraft,
};
use crate::month::MonthKey;
use crate::seed::seed_state;
use crate::validate::{Validate, require_non_negative, require_positive, require_text};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Where the state came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Snapshot,
    Seed,
}

pub struct Store {
    state: FinanceState,
    adapter: Box<dyn SnapshotAdapter>,
}

fn find_mut<T: Record>(items: &mut [T], id: Uuid) -> Result<&mut T, StoreError> {
    items
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or(StoreError::NotFound { kind: T::KIND, id })
}

fn remove<T: Record>(items: &mut Vec<T>, id: Uuid) -> Result<T, StoreError> {
    let idx = items
        .iter()
        .position(|r| r.id() == id)
        .ok_or(StoreError::NotFound { kind: T::KIND, id })?;
    Ok(items.remove(idx))
}

fn expense_from(id: Uuid, d: ExpenseDraft) -> Expense {
    Expense {
        id,
        name: d.name,
        category: d.category,
        amount: d.amount,
        date: d.date,
        icon: d.icon,
        note: d.note,
        recurring: d.recurring,
    }
}

fn goal_from(id: Uuid, d: GoalDraft) -> SavingGoal {
    SavingGoal {
        id,
        name: d.name,
        category: d.category,
        target_amount: d.target_amount,
        saved_amount: d.saved_amount,
        date: d.date,
        icon: d.icon,
        emergency: d.emergency,
    }
}

fn investment_from(id: Uuid, d: InvestmentDraft) -> Investment {
    Investment {
        id,
        title: d.title,
        category: d.category,
        amount: d.amount,
        date: d.date,
        note: d.note,
    }
}

/// Next EMI date one month on, pinned to the loan's EMI day when it has one.
fn advance_emi(next: NaiveDate, emi_day: Option<u32>) -> NaiveDate {
    MonthKey::from_date(next)
        .next()
        .day_clamped(emi_day.unwrap_or(next.day()))
}

impl Store {
    /// Reads the adapter once. A missing, unreadable or corrupt snapshot falls
    /// back to the seed dataset.
    pub fn load(adapter: Box<dyn SnapshotAdapter>) -> (Self, LoadSource) {
        let loaded = match adapter.read_slot() {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(state) => Some(state),
                Err(err) => {
                    warn!(error = %format!("{:#}", err), "Snapshot is corrupt, falling back to seed data");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %format!("{:#}", err), "Snapshot is unreadable, falling back to seed data");
                None
            }
        };
        let (state, source) = match loaded {
            Some(state) => (state, LoadSource::Snapshot),
            None => (seed_state(), LoadSource::Seed),
        };
        info!(source = ?source, "Store opened");
        (Self { state, adapter }, source)
    }

    pub fn open(adapter: Box<dyn SnapshotAdapter>) -> Self {
        Self::load(adapter).0
    }

    /// Wraps an existing state without touching the adapter.
    pub fn with_state(adapter: Box<dyn SnapshotAdapter>, state: FinanceState) -> Self {
        Self { state, adapter }
    }

    pub fn state(&self) -> &FinanceState {
        &self.state
    }

    pub fn require_currency(&self) -> Result<Currency, StoreError> {
        self.state.currency.ok_or(StoreError::CurrencyNotChosen)
    }

    /// Writes the current snapshot to the adapter.
    pub fn persist(&self) -> Result<(), StoreError> {
        let raw = encode_snapshot(&self.state)
            .map_err(|e| StoreError::Persistence(format!("{:#}", e)))?;
        self.adapter
            .write_slot(&raw)
            .map_err(|e| StoreError::Persistence(format!("{:#}", e)))
    }

    fn commit<T>(
        &mut self,
        action: &'static str,
        apply: impl FnOnce(&mut FinanceState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.state.clone();
        let out = match apply(&mut next) {
            Ok(out) => out,
            Err(err) => {
                warn!(action, error = %err, "Rejected store action");
                return Err(err);
            }
        };
        self.state = next;
        debug!(action, "Committed store action");
        self.persist()?;
        Ok(out)
    }

    pub fn reset_to_seed(&mut self) -> Result<(), StoreError> {
        self.commit("reset_to_seed", |s| {
            *s = seed_state();
            Ok(())
        })
    }

    // Preferences

    pub fn set_currency(&mut self, currency: Currency) -> Result<(), StoreError> {
        self.commit("set_currency", |s| {
            s.currency = Some(currency);
            Ok(())
        })
    }

    pub fn set_selected_month(&mut self, month: MonthKey) -> Result<(), StoreError> {
        self.commit("set_selected_month", |s| {
            s.selected_month = month;
            Ok(())
        })
    }

    pub fn set_dashboard_window(&mut self, window: DashboardWindow) -> Result<(), StoreError> {
        self.commit("set_dashboard_window", |s| {
            s.dashboard_window = window;
            Ok(())
        })
    }

    pub fn set_spending_budget(&mut self, amount: Decimal) -> Result<(), StoreError> {
        self.commit("set_spending_budget", |s| {
            s.spending_budget = require_non_negative("spending budget", amount)?;
            Ok(())
        })
    }

    pub fn set_savings_budget(&mut self, amount: Decimal) -> Result<(), StoreError> {
        self.commit("set_savings_budget", |s| {
            s.savings_budget = require_non_negative("savings budget", amount)?;
            Ok(())
        })
    }

    /// Sets a budget for one month, or clears it with `None` so the month
    /// falls back to the spending budget.
    pub fn set_month_budget(
        &mut self,
        month: MonthKey,
        amount: Option<Decimal>,
    ) -> Result<(), StoreError> {
        self.commit("set_month_budget", |s| {
            match amount {
                Some(amount) => {
                    let amount = require_non_negative("month budget", amount)?;
                    s.monthly_budgets.insert(month, amount);
                }
                None => {
                    s.monthly_budgets.remove(&month);
                }
            }
            Ok(())
        })
    }

    pub fn set_category_limit(&mut self, category: &str, limit: Decimal) -> Result<(), StoreError> {
        self.commit("set_category_limit", |s| {
            let category = require_text("category", category)?;
            let limit = require_positive("category limit", limit)?;
            s.category_limits.insert(category, limit);
            Ok(())
        })
    }

    pub fn clear_category_limit(&mut self, category: &str) -> Result<(), StoreError> {
        self.commit("clear_category_limit", |s| {
            let category = require_text("category", category)?;
            s.category_limits
                .remove(&category)
                .map(|_| ())
                .ok_or_else(|| StoreError::invalid("category", format!("no limit set for '{}'", category)))
        })
    }

    pub fn set_carry_forward_spending(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.commit("set_carry_forward_spending", |s| {
            s.carry_forward_spending = enabled;
            Ok(())
        })
    }

    pub fn set_carry_forward_savings(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.commit("set_carry_forward_savings", |s| {
            s.carry_forward_savings = enabled;
            Ok(())
        })
    }

    pub fn set_adjustments(&mut self, adjustments: Adjustments) -> Result<(), StoreError> {
        self.commit("set_adjustments", |s| {
            s.adjustments = adjustments.validated()?;
            Ok(())
        })
    }

    // Expenses

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<Uuid, StoreError> {
        self.commit("add_expense", |s| {
            let id = Uuid::new_v4();
            s.expenses.push(expense_from(id, draft.validated()?));
            Ok(id)
        })
    }

    pub fn update_expense(&mut self, id: Uuid, draft: ExpenseDraft) -> Result<(), StoreError> {
        self.commit("update_expense", |s| {
            let draft = draft.validated()?;
            *find_mut(&mut s.expenses, id)? = expense_from(id, draft);
            Ok(())
        })
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("delete_expense", |s| remove(&mut s.expenses, id).map(|_| ()))
    }

    // Saving goals

    pub fn add_goal(&mut self, draft: GoalDraft) -> Result<Uuid, StoreError> {
        self.commit("add_goal", |s| {
            let id = Uuid::new_v4();
            s.saving_goals.push(goal_from(id, draft.validated()?));
            Ok(id)
        })
    }

    pub fn update_goal(&mut self, id: Uuid, draft: GoalDraft) -> Result<(), StoreError> {
        self.commit("update_goal", |s| {
            let draft = draft.validated()?;
            *find_mut(&mut s.saving_goals, id)? = goal_from(id, draft);
            Ok(())
        })
    }

    pub fn delete_goal(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("delete_goal", |s| remove(&mut s.saving_goals, id).map(|_| ()))
    }

    pub fn deposit_to_goal(&mut self, id: Uuid, amount: Decimal) -> Result<(), StoreError> {
        self.commit("deposit_to_goal", |s| {
            let amount = require_positive("deposit", amount)?;
            let goal = find_mut(&mut s.saving_goals, id)?;
            goal.saved_amount = goal
                .saved_amount
                .checked_add(amount)
                .ok_or_else(|| StoreError::invalid("deposit", "saved amount would overflow"))?;
            Ok(())
        })
    }

    pub fn withdraw_from_goal(&mut self, id: Uuid, amount: Decimal) -> Result<(), StoreError> {
        self.commit("withdraw_from_goal", |s| {
            let amount = require_positive("withdrawal", amount)?;
            let goal = find_mut(&mut s.saving_goals, id)?;
            if amount > goal.saved_amount {
                return Err(StoreError::ExceedsOutstanding {
                    amount,
                    remaining: goal.saved_amount,
                });
            }
            goal.saved_amount -= amount;
            Ok(())
        })
    }

    // Investments

    pub fn add_investment(&mut self, draft: InvestmentDraft) -> Result<Uuid, StoreError> {
        self.commit("add_investment", |s| {
            let id = Uuid::new_v4();
            s.investments.push(investment_from(id, draft.validated()?));
            Ok(id)
        })
    }

    pub fn update_investment(&mut self, id: Uuid, draft: InvestmentDraft) -> Result<(), StoreError> {
        self.commit("update_investment", |s| {
            let draft = draft.validated()?;
            *find_mut(&mut s.investments, id)? = investment_from(id, draft);
            Ok(())
        })
    }

    pub fn delete_investment(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("delete_investment", |s| remove(&mut s.investments, id).map(|_| ()))
    }

    // Receivables

    pub fn add_loan(&mut self, draft: LoanDraft) -> Result<Uuid, StoreError> {
        self.commit("add_loan", |s| {
            let d = draft.validated()?;
            let id = Uuid::new_v4();
            s.loans.push(Loan {
                id,
                person_name: d.person_name,
                reason: d.reason,
                amount: d.amount,
                date: d.date,
                due_month: d.due_month,
                repaid: false,
                repaid_amount: Decimal::ZERO,
            });
            Ok(id)
        })
    }

    /// Edits the loan terms. Repayment progress is kept; a repaid loan stays
    /// fully repaid at the new amount.
    pub fn update_loan(&mut self, id: Uuid, draft: LoanDraft) -> Result<(), StoreError> {
        self.commit("update_loan", |s| {
            let d = draft.validated()?;
            let loan = find_mut(&mut s.loans, id)?;
            if loan.repaid {
                loan.repaid_amount = d.amount;
            } else if loan.repaid_amount > d.amount {
                return Err(StoreError::invalid(
                    "amount",
                    format!("{} is below the {} already repaid", d.amount, loan.repaid_amount),
                ));
            }
            loan.person_name = d.person_name;
            loan.reason = d.reason;
            loan.amount = d.amount;
            loan.date = d.date;
            loan.due_month = d.due_month;
            Ok(())
        })
    }

    pub fn delete_loan(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("delete_loan", |s| remove(&mut s.loans, id).map(|_| ()))
    }

    /// Records a partial or full repayment; the loan flips to repaid once
    /// nothing is outstanding.
    pub fn add_repayment(&mut self, id: Uuid, delta: Decimal) -> Result<(), StoreError> {
        self.commit("add_repayment", |s| {
            let delta = require_positive("repayment", delta)?;
            let loan = find_mut(&mut s.loans, id)?;
            let remaining = receivable_outstanding(loan);
            if delta > remaining {
                return Err(StoreError::ExceedsOutstanding {
                    amount: delta,
                    remaining,
                });
            }
            loan.repaid_amount = effective_repaid(loan).saturating_add(delta).min(loan.amount);
            if loan.repaid_amount >= loan.amount {
                loan.repaid = true;
            }
            Ok(())
        })
    }

    /// Flips the repaid flag. Marking repaid snaps the repaid amount to the
    /// loan amount; un-marking leaves the repaid amount as it was.
    pub fn toggle_loan_repaid(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("toggle_loan_repaid", |s| {
            let loan = find_mut(&mut s.loans, id)?;
            loan.repaid = !loan.repaid;
            if loan.repaid {
                loan.repaid_amount = loan.amount;
            }
            Ok(())
        })
    }

    // Personal loans

    pub fn add_personal_loan(&mut self, draft: PersonalLoanDraft) -> Result<Uuid, StoreError> {
        self.commit("add_personal_loan", |s| {
            let d = draft.validated()?;
            let id = Uuid::new_v4();
            s.personal_loans.push(PersonalLoan {
                id,
                lender_name: d.lender_name,
                loan_type: d.loan_type,
                custom_type_label: d.custom_type_label,
                start_date: d.start_date,
                total_loan_amount: d.total_loan_amount,
                outstanding_amount: d.outstanding_amount,
                emi_amount: d.emi_amount,
                emi_day_of_month: d.emi_day_of_month,
                next_emi_date: d.next_emi_date,
                payments: Vec::new(),
                closed: false,
                note: d.note,
            });
            Ok(id)
        })
    }

    /// Edits loan terms; the payment ledger and closed flag are kept.
    pub fn update_personal_loan(
        &mut self,
        id: Uuid,
        draft: PersonalLoanDraft,
    ) -> Result<(), StoreError> {
        self.commit("update_personal_loan", |s| {
            let d = draft.validated()?;
            let loan = find_mut(&mut s.personal_loans, id)?;
            loan.lender_name = d.lender_name;
            loan.loan_type = d.loan_type;
            loan.custom_type_label = d.custom_type_label;
            loan.start_date = d.start_date;
            loan.total_loan_amount = d.total_loan_amount;
            loan.outstanding_amount = d.outstanding_amount;
            loan.emi_amount = d.emi_amount;
            loan.emi_day_of_month = d.emi_day_of_month;
            loan.next_emi_date = d.next_emi_date;
            loan.note = d.note;
            Ok(())
        })
    }

    pub fn delete_personal_loan(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("delete_personal_loan", |s| {
            remove(&mut s.personal_loans, id).map(|_| ())
        })
    }

    /// Appends a payment to the loan's ledger and moves the next EMI date on
    /// by one month. A loan paid down to zero is closed.
    pub fn record_personal_loan_payment(
        &mut self,
        id: Uuid,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        self.commit("record_personal_loan_payment", |s| {
            let amount = require_positive("payment", amount)?;
            let loan = find_mut(&mut s.personal_loans, id)?;
            if loan.closed {
                return Err(StoreError::invalid("personal loan", "loan is closed"));
            }
            let remaining = personal_outstanding(loan);
            if remaining > Decimal::ZERO && amount > remaining {
                return Err(StoreError::ExceedsOutstanding { amount, remaining });
            }
            loan.payments.push(EmiPayment {
                amount,
                date: Some(date),
            });
            if let Some(next) = loan.next_emi_date {
                loan.next_emi_date = Some(advance_emi(next, loan.emi_day_of_month));
            }
            if remaining > Decimal::ZERO && personal_outstanding(loan).is_zero() {
                loan.closed = true;
            }
            Ok(())
        })
    }

    pub fn toggle_personal_loan_closed(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("toggle_personal_loan_closed", |s| {
            let loan = find_mut(&mut s.personal_loans, id)?;
            loan.closed = !loan.closed;
            Ok(())
        })
    }

    // Life insurance

    pub fn add_insurance(&mut self, draft: InsuranceDraft) -> Result<Uuid, StoreError> {
        self.commit("add_insurance", |s| {
            let d = draft.validated()?;
            let id = Uuid::new_v4();
            s.life_insurance.push(LifeInsurance {
                id,
                provider_name: d.provider_name,
                plan_name: d.plan_name,
                monthly_amount: d.monthly_amount,
                due_date: d.due_date,
                paid: false,
                note: d.note,
            });
            Ok(id)
        })
    }

    pub fn update_insurance(&mut self, id: Uuid, draft: InsuranceDraft) -> Result<(), StoreError> {
        self.commit("update_insurance", |s| {
            let d = draft.validated()?;
            let policy = find_mut(&mut s.life_insurance, id)?;
            policy.provider_name = d.provider_name;
            policy.plan_name = d.plan_name;
            policy.monthly_amount = d.monthly_amount;
            policy.due_date = d.due_date;
            policy.note = d.note;
            Ok(())
        })
    }

    pub fn delete_insurance(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("delete_insurance", |s| {
            remove(&mut s.life_insurance, id).map(|_| ())
        })
    }

    pub fn toggle_insurance_paid(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("toggle_insurance_paid", |s| {
            let policy = find_mut(&mut s.life_insurance, id)?;
            policy.paid = !policy.paid;
            Ok(())
        })
    }

    // Recurring templates

    pub fn add_recurring_template(&mut self, draft: TemplateDraft) -> Result<Uuid, StoreError> {
        self.commit("add_recurring_template", |s| {
            let d = draft.validated()?;
            let id = Uuid::new_v4();
            s.recurring_templates.push(RecurringTemplate {
                id,
                title: d.title,
                category: d.category,
                amount: d.amount,
                icon: d.icon,
                active: true,
                paid_months: BTreeSet::new(),
            });
            Ok(id)
        })
    }

    pub fn update_recurring_template(
        &mut self,
        id: Uuid,
        draft: TemplateDraft,
    ) -> Result<(), StoreError> {
        self.commit("update_recurring_template", |s| {
            let d = draft.validated()?;
            let template = find_mut(&mut s.recurring_templates, id)?;
            template.title = d.title;
            template.category = d.category;
            template.amount = d.amount;
            template.icon = d.icon;
            Ok(())
        })
    }

    pub fn delete_recurring_template(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.commit("delete_recurring_template", |s| {
            remove(&mut s.recurring_templates, id).map(|_| ())
        })
    }

    /// Marks `month` paid if it was not, unmarks it if it was.
    pub fn toggle_recurring_template_paid(
        &mut self,
        id: Uuid,
        month: MonthKey,
    ) -> Result<(), StoreError> {
        self.commit("toggle_recurring_template_paid", |s| {
            let template = find_mut(&mut s.recurring_templates, id)?;
            if !template.paid_months.remove(&month) {
                template.paid_months.insert(month);
            }
            Ok(())
        })
    }

    pub fn set_recurring_template_active(
        &mut self,
        id: Uuid,
        active: bool,
    ) -> Result<(), StoreError> {
        self.commit("set_recurring_template_active", |s| {
            find_mut(&mut s.recurring_templates, id)?.active = active;
            Ok(())
        })
    }
}
