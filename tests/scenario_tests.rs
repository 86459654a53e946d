use bmvt_ledger::application::workflow::ValidationIssue;
use bmvt_ledger::domain::installment::InstallmentStatus;
use bmvt_ledger::domain::ledger::LedgerStage;
use bmvt_ledger::domain::money::Fcfa;
use bmvt_ledger::domain::offer::PassportNumber;
use bmvt_ledger::domain::payment::PaymentStatus;
use bmvt_ledger::error::LedgerError;

mod common;

use common::{draft, in_memory_service, offer};

const PASSPORT: &str = "A1234567";

#[tokio::test]
async fn test_full_ledger_lifecycle() {
    let service = in_memory_service(vec![offer(PASSPORT, 5_350_000)]);
    let passport = PassportNumber::parse(PASSPORT).unwrap();

    // 1. First payment, no discount
    let state = service.snapshot(&passport, Some(Fcfa::ZERO)).await.unwrap();
    assert_eq!(state.total_due, Fcfa::new(5_350_000));
    assert_eq!(state.remaining_before, Fcfa::new(5_350_000));
    assert_eq!(state.stage(), LedgerStage::New);

    let first = service
        .record_payment(draft(PASSPORT, 2_000_000, Some(0)))
        .await
        .unwrap();
    assert_eq!(first.entry.installment.remaining_after, Fcfa::new(3_350_000));
    assert_eq!(first.entry.payment.status, PaymentStatus::Partial);
    assert_eq!(first.entry.installment.status, InstallmentStatus::InProgress);

    // 2. Discount introduced; the requested amount exceeds what is left
    let (state, report) = service
        .preview(&draft(PASSPORT, 3_350_000, Some(350_000)))
        .await
        .unwrap();
    assert_eq!(state.effective_discount, Fcfa::new(350_000));
    assert_eq!(state.total_due, Fcfa::new(5_000_000));
    assert_eq!(state.remaining_before, Fcfa::new(3_000_000));
    assert_eq!(state.montant_max(), Fcfa::new(3_000_000));
    assert_eq!(
        report.issues,
        vec![ValidationIssue::AmountOutOfRange {
            proposed: Fcfa::new(3_350_000),
            max: Fcfa::new(3_000_000)
        }]
    );

    let rejected = service
        .record_payment(draft(PASSPORT, 3_350_000, Some(350_000)))
        .await;
    assert!(matches!(rejected, Err(LedgerError::Validation(_))));
    assert_eq!(service.statement(&passport).await.unwrap().payments.len(), 1);

    // 3. Corrected amount settles the ledger
    let second = service
        .record_payment(draft(PASSPORT, 3_000_000, Some(350_000)))
        .await
        .unwrap();
    assert_eq!(second.entry.payment.discount, Fcfa::new(350_000));
    assert_eq!(second.entry.payment.total_due_at_time, Fcfa::new(5_000_000));
    assert_eq!(second.entry.installment.remaining_after, Fcfa::ZERO);
    assert_eq!(second.entry.payment.status, PaymentStatus::Complete);
    assert_eq!(second.entry.installment.status, InstallmentStatus::Settled);

    // 4. Terminal: any further payment is refused
    let state = service.snapshot(&passport, None).await.unwrap();
    assert_eq!(state.locked_discount, Some(Fcfa::new(350_000)));
    assert_eq!(state.montant_max(), Fcfa::ZERO);
    let refused = service.record_payment(draft(PASSPORT, 1, None)).await;
    assert!(matches!(refused, Err(LedgerError::SettledConflict { passport }) if passport == PASSPORT));

    let statement = service.statement(&passport).await.unwrap();
    assert_eq!(statement.stage(), LedgerStage::Complete);
    assert_eq!(statement.payments.len(), 2);
    assert_eq!(statement.installments.len(), 2);
}

#[tokio::test]
async fn test_zero_price_package_rejects_every_entry() {
    let service = in_memory_service(vec![offer("Z0000001", 0)]);
    let passport = PassportNumber::parse("Z0000001").unwrap();

    let state = service.snapshot(&passport, None).await.unwrap();
    assert_eq!(state.total_due, Fcfa::ZERO);
    assert_eq!(state.remaining_before, Fcfa::ZERO);

    for amount in [1, 1_000, 5_000_000] {
        let result = service.record_payment(draft("Z0000001", amount, None)).await;
        assert!(matches!(result, Err(LedgerError::SettledConflict { .. })));
    }

    let statement = service.statement(&passport).await.unwrap();
    assert!(statement.payments.is_empty());
    assert_eq!(statement.stage(), LedgerStage::New);
}

#[tokio::test]
async fn test_locked_discount_cannot_be_changed() {
    let service = in_memory_service(vec![offer(PASSPORT, 1_000_000)]);

    service
        .record_payment(draft(PASSPORT, 100_000, Some(200_000)))
        .await
        .unwrap();

    let result = service
        .record_payment(draft(PASSPORT, 100_000, Some(500_000)))
        .await;
    assert!(matches!(result, Err(LedgerError::Validation(msg)) if msg.contains("locked")));

    // The original lock still drives the balance.
    let passport = PassportNumber::parse(PASSPORT).unwrap();
    let state = service.snapshot(&passport, Some(Fcfa::new(500_000))).await.unwrap();
    assert_eq!(state.effective_discount, Fcfa::new(200_000));
    assert_eq!(state.remaining_before, Fcfa::new(700_000));
}

#[tokio::test]
async fn test_missing_method_and_date_block_commit() {
    let service = in_memory_service(vec![offer(PASSPORT, 1_000_000)]);
    let mut incomplete = draft(PASSPORT, 100_000, None);
    incomplete.method = None;
    incomplete.date = None;

    let result = service.record_payment(incomplete).await;
    assert!(matches!(
        result,
        Err(LedgerError::Validation(msg)) if msg.contains("method") && msg.contains("date")
    ));
}
