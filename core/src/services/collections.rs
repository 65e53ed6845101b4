use chrono::NaiveDate;
use uuid::Uuid;

use super::{call, format_cents, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::collections::{
    CollectionAttempt, CollectionAttemptRequest, CollectionItem, OverdueInvoice,
};

/// Overdue invoices as of `today`, most overdue first.
pub async fn overdue<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    location_id: Option<Uuid>,
    today: NaiveDate,
) -> ServiceResult<Vec<CollectionItem>> {
    let invoices: Vec<OverdueInvoice> = call(
        session,
        "collections.overdue",
        resources::collections::list_overdue(location_id),
    )
    .await?;
    let mut items: Vec<CollectionItem> = invoices
        .into_iter()
        .map(|invoice| to_item(invoice, today))
        .collect();
    items.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    Ok(items)
}

pub async fn record_attempt<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    invoice_id: Uuid,
    input: &CollectionAttemptRequest,
) -> ServiceResult<CollectionAttempt> {
    call(
        session,
        "collections.record_attempt",
        resources::collections::record_attempt(invoice_id, input),
    )
    .await
}

pub fn to_item(invoice: OverdueInvoice, today: NaiveDate) -> CollectionItem {
    CollectionItem {
        invoice_id: invoice.id,
        customer_name: invoice.customer_name,
        amount_due: format_cents(invoice.amount_due_cents),
        days_overdue: (today - invoice.due_date).num_days().max(0),
        attempts: invoice.attempts,
    }
}
