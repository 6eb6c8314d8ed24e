// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use walletwise::analytics::loans::{
    due_soon_personal_loans, lending_summary, overdue_loans, overdue_personal_loans,
    personal_outstanding, receivable_outstanding, total_monthly_emi_due,
};
use walletwise::db::MemorySlot;
use walletwise::errors::StoreError;
use walletwise::models::{EmiPayment, FinanceState, LoanDraft, LoanType, PersonalLoan, PersonalLoanDraft};
use walletwise::seed::{seed_id, seed_state};
use walletwise::store::Store;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn store() -> Store {
    Store::with_state(Box::new(MemorySlot::default()), seed_state())
}

fn liability(total: Option<&str>, outstanding: Option<&str>, payments: &[&str]) -> PersonalLoan {
    PersonalLoan {
        id: uuid::Uuid::new_v4(),
        lender_name: "Bank".into(),
        loan_type: LoanType::Home,
        custom_type_label: None,
        start_date: day("2025-01-01"),
        total_loan_amount: total.map(dec),
        outstanding_amount: outstanding.map(dec),
        emi_amount: Some(dec("100")),
        emi_day_of_month: None,
        next_emi_date: None,
        payments: payments
            .iter()
            .map(|a| EmiPayment {
                amount: dec(a),
                date: None,
            })
            .collect(),
        closed: false,
        note: None,
    }
}

#[test]
fn full_repayment_marks_loan_repaid() {
    let mut s = store();
    let id = seed_id(0x4001);
    s.add_repayment(id, dec("80")).unwrap();
    let loan = s.state().loans.iter().find(|l| l.id == id).unwrap();
    assert_eq!(receivable_outstanding(loan), Decimal::ZERO);
    assert!(loan.repaid);
    assert_eq!(loan.repaid_amount, dec("80"));
}

#[test]
fn repayment_cannot_exceed_outstanding() {
    let mut s = store();
    let id = seed_id(0x4001);
    s.add_repayment(id, dec("50")).unwrap();
    let err = s.add_repayment(id, dec("40")).unwrap_err();
    assert!(matches!(err, StoreError::ExceedsOutstanding { .. }));
    assert!(matches!(
        s.add_repayment(id, Decimal::ZERO).unwrap_err(),
        StoreError::NotPositive { .. }
    ));
    let loan = s.state().loans.iter().find(|l| l.id == id).unwrap();
    assert_eq!(loan.repaid_amount, dec("50"));
    assert!(!loan.repaid);
    assert_eq!(receivable_outstanding(loan), dec("30"));
}

#[test]
fn toggling_repaid_off_keeps_repaid_amount() {
    let mut s = store();
    let id = seed_id(0x4001);
    s.toggle_loan_repaid(id).unwrap();
    {
        let loan = s.state().loans.iter().find(|l| l.id == id).unwrap();
        assert!(loan.repaid);
        assert_eq!(loan.repaid_amount, dec("80"));
    }
    s.toggle_loan_repaid(id).unwrap();
    let loan = s.state().loans.iter().find(|l| l.id == id).unwrap();
    assert!(!loan.repaid);
    assert_eq!(loan.repaid_amount, dec("80"));
    assert_eq!(receivable_outstanding(loan), Decimal::ZERO);
}

#[test]
fn repayment_after_unflagging_a_settled_loan_is_rejected() {
    let mut s = store();
    let id = seed_id(0x4001);
    s.add_repayment(id, dec("80")).unwrap();
    s.toggle_loan_repaid(id).unwrap();
    {
        let loan = s.state().loans.iter().find(|l| l.id == id).unwrap();
        assert!(!loan.repaid);
        assert_eq!(loan.repaid_amount, dec("80"));
    }

    let before = s.state().clone();
    let err = s.add_repayment(id, dec("1")).unwrap_err();
    match err {
        StoreError::ExceedsOutstanding { amount, remaining } => {
            assert_eq!(amount, dec("1"));
            assert_eq!(remaining, Decimal::ZERO);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(*s.state(), before);

    // Flagging it again is the way back.
    s.toggle_loan_repaid(id).unwrap();
    let loan = s.state().loans.iter().find(|l| l.id == id).unwrap();
    assert!(loan.repaid);
    assert_eq!(loan.repaid_amount, dec("80"));
}

#[test]
fn loan_amount_cannot_drop_below_repaid() {
    let mut s = store();
    let id = seed_id(0x4001);
    s.add_repayment(id, dec("60")).unwrap();
    let draft = LoanDraft {
        person_name: "Rahul".into(),
        reason: "Tickets".into(),
        amount: dec("50"),
        date: day("2026-02-10"),
        due_month: None,
    };
    assert!(matches!(
        s.update_loan(id, draft.clone()).unwrap_err(),
        StoreError::InvalidValue { .. }
    ));
    s.update_loan(
        id,
        LoanDraft {
            amount: dec("100"),
            ..draft
        },
    )
    .unwrap();
    let loan = s.state().loans.iter().find(|l| l.id == id).unwrap();
    assert_eq!(receivable_outstanding(loan), dec("40"));
    assert_eq!(loan.due_month, None);
}

#[test]
fn receivable_overdue_only_after_due_month() {
    let state = seed_state();
    assert!(overdue_loans(&state, day("2026-03-31")).is_empty());
    assert_eq!(overdue_loans(&state, day("2026-04-01")).len(), 1);

    let summary = lending_summary(&state, day("2026-04-01"));
    assert_eq!(summary.total_lent, dec("80"));
    assert_eq!(summary.outstanding, dec("80"));
    assert_eq!(summary.open_count, 1);
    assert_eq!(summary.overdue_count, 1);
}

#[test]
fn personal_outstanding_from_ledger_or_balance() {
    assert_eq!(
        personal_outstanding(&liability(Some("1000"), None, &["200"])),
        dec("800")
    );
    // A positive running balance wins over the original total.
    assert_eq!(
        personal_outstanding(&liability(Some("1000"), Some("500"), &["200"])),
        dec("300")
    );
    // A zero balance is not authoritative; the total is used instead.
    assert_eq!(
        personal_outstanding(&liability(Some("1000"), Some("0"), &[])),
        dec("1000")
    );
    assert_eq!(personal_outstanding(&liability(None, None, &[])), Decimal::ZERO);
    assert_eq!(
        personal_outstanding(&liability(Some("100"), None, &["60", "70"])),
        Decimal::ZERO
    );
    let mut closed = liability(Some("1000"), None, &[]);
    closed.closed = true;
    assert_eq!(personal_outstanding(&closed), Decimal::ZERO);
}

#[test]
fn recording_payments_advances_schedule_and_closes() {
    let mut s = store();
    let id = seed_id(0x5001);
    s.record_personal_loan_payment(id, dec("150"), day("2026-03-05"))
        .unwrap();
    {
        let loan = s.state().personal_loans.iter().find(|l| l.id == id).unwrap();
        assert_eq!(loan.payments.len(), 2);
        assert_eq!(loan.next_emi_date, Some(day("2026-04-05")));
        assert_eq!(personal_outstanding(loan), dec("650"));
    }
    assert!(matches!(
        s.record_personal_loan_payment(id, dec("700"), day("2026-04-05"))
            .unwrap_err(),
        StoreError::ExceedsOutstanding { .. }
    ));
    s.record_personal_loan_payment(id, dec("650"), day("2026-04-05"))
        .unwrap();
    let loan = s.state().personal_loans.iter().find(|l| l.id == id).unwrap();
    assert!(loan.closed);
    assert_eq!(personal_outstanding(loan), Decimal::ZERO);
    assert!(
        s.record_personal_loan_payment(id, dec("1"), day("2026-05-05"))
            .is_err()
    );
}

#[test]
fn emi_day_is_clamped_to_month_end() {
    let mut s = Store::with_state(Box::new(MemorySlot::default()), FinanceState::default());
    let id = s
        .add_personal_loan(PersonalLoanDraft {
            lender_name: "Card".into(),
            loan_type: LoanType::CreditCard,
            custom_type_label: None,
            start_date: day("2025-12-31"),
            total_loan_amount: Some(dec("600")),
            outstanding_amount: None,
            emi_amount: Some(dec("100")),
            emi_day_of_month: Some(31),
            next_emi_date: Some(day("2026-01-31")),
            note: None,
        })
        .unwrap();
    s.record_personal_loan_payment(id, dec("100"), day("2026-01-31"))
        .unwrap();
    s.record_personal_loan_payment(id, dec("100"), day("2026-02-28"))
        .unwrap();
    let loan = &s.state().personal_loans[0];
    assert_eq!(loan.next_emi_date, Some(day("2026-03-31")));
}

#[test]
fn due_soon_excludes_overdue_and_closed() {
    let mut s = store();
    let id = seed_id(0x5001);
    let state = s.state();
    assert_eq!(due_soon_personal_loans(state, day("2026-03-01"), 7).len(), 1);
    assert_eq!(due_soon_personal_loans(state, day("2026-03-05"), 0).len(), 1);
    assert!(due_soon_personal_loans(state, day("2026-02-20"), 7).is_empty());
    assert!(due_soon_personal_loans(state, day("2026-03-06"), 7).is_empty());
    assert_eq!(overdue_personal_loans(state, day("2026-03-06")).len(), 1);
    assert_eq!(total_monthly_emi_due(state), dec("150"));

    s.toggle_personal_loan_closed(id).unwrap();
    assert!(due_soon_personal_loans(s.state(), day("2026-03-01"), 7).is_empty());
    assert!(overdue_personal_loans(s.state(), day("2026-03-06")).is_empty());
    assert_eq!(total_monthly_emi_due(s.state()), Decimal::ZERO);
}

#[test]
fn other_loan_type_needs_a_label() {
    let mut s = store();
    let draft = PersonalLoanDraft {
        lender_name: "Uncle".into(),
        loan_type: LoanType::Other,
        custom_type_label: Some("   ".into()),
        start_date: day("2026-01-01"),
        total_loan_amount: Some(dec("500")),
        outstanding_amount: None,
        emi_amount: None,
        emi_day_of_month: None,
        next_emi_date: None,
        note: None,
    };
    assert!(matches!(
        s.add_personal_loan(draft.clone()).unwrap_err(),
        StoreError::EmptyField { .. }
    ));
    let id = s
        .add_personal_loan(PersonalLoanDraft {
            custom_type_label: Some("Family".into()),
            ..draft
        })
        .unwrap();
    let loan = s.state().personal_loans.iter().find(|l| l.id == id).unwrap();
    assert_eq!(loan.type_label(), "Family");
}
