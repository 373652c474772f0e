//! History re-attribution for closing sales.
//!
//! Dividend and benefit income is earned by the lot as a whole, but per-sale
//! reporting needs that income on the closing transaction. When a sale event
//! is booked, every record currently attached to the lot is copied - not
//! moved - onto the sale: the copy carries identical figures under a
//! `ClosedSale` attachment while the original stays on the lot as its
//! lifetime record. A sale spanning several purchase events gets one full
//! copy set per sale event, not a proportional split.

use uuid::Uuid;

use crate::income::{BenefitRecord, HistoryAttachment, IncomeRecord};

/// Copies the lot's current income and benefit records onto a sale event.
pub fn copy_history_to_sale(
    sell_event_id: &str,
    incomes: &[IncomeRecord],
    benefits: &[BenefitRecord],
) -> (Vec<IncomeRecord>, Vec<BenefitRecord>) {
    let income_copies = incomes
        .iter()
        .map(|record| IncomeRecord {
            id: Uuid::new_v4().to_string(),
            attachment: HistoryAttachment::ClosedSale(sell_event_id.to_string()),
            amount: record.amount,
            payment_date: record.payment_date,
        })
        .collect();

    let benefit_copies = benefits
        .iter()
        .map(|record| BenefitRecord {
            id: Uuid::new_v4().to_string(),
            attachment: HistoryAttachment::ClosedSale(sell_event_id.to_string()),
            value: record.value,
            payment_date: record.payment_date,
        })
        .collect();

    (income_copies, benefit_copies)
}
