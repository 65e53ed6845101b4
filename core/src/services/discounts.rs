use uuid::Uuid;

use super::{call, call_discarding, format_cents, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::discounts::{Discount, DiscountRequest, DiscountResponse};

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    active_only: bool,
) -> ServiceResult<Vec<Discount>> {
    let discounts: Vec<DiscountResponse> =
        call(session, "discounts.list", resources::discounts::list(active_only)).await?;
    Ok(discounts.into_iter().map(to_discount).collect())
}

/// Create a discount code. Backend rejections (for example a duplicate
/// code) come back as `ServiceErrorKind::Rejected` with the backend's text.
pub async fn create<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &DiscountRequest,
) -> ServiceResult<Discount> {
    let discount: DiscountResponse =
        call(session, "discounts.create", resources::discounts::create(input)).await?;
    Ok(to_discount(discount))
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &DiscountRequest,
) -> ServiceResult<Discount> {
    let discount: DiscountResponse = call(
        session,
        "discounts.update",
        resources::discounts::update(id, input),
    )
    .await?;
    Ok(to_discount(discount))
}

pub async fn delete<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<()> {
    call_discarding(session, "discounts.delete", resources::discounts::delete(id)).await
}

pub fn to_discount(dto: DiscountResponse) -> Discount {
    let label = match (dto.discount_percent, dto.discount_amount_cents) {
        (Some(percent), _) => format!("{percent}% off"),
        (None, Some(cents)) => format!("{} off", format_cents(cents)),
        (None, None) => "No discount".to_string(),
    };
    Discount {
        id: dto.id,
        code: dto.code,
        name: dto.name,
        label,
        remaining_redemptions: dto
            .max_redemptions
            .map(|max| max.saturating_sub(dto.times_redeemed)),
        active: dto.is_active,
    }
}
