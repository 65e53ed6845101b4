use uuid::Uuid;

use super::{call, call_discarding, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::events::{EventRequest, EventResponse, EventWindow, ScheduledEvent};

/// Events in `window`, earliest first.
pub async fn schedule<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    window: &EventWindow,
) -> ServiceResult<Vec<ScheduledEvent>> {
    let events: Vec<EventResponse> =
        call(session, "events.schedule", resources::events::list(window)).await?;
    let mut scheduled: Vec<ScheduledEvent> = events.into_iter().map(to_scheduled).collect();
    scheduled.sort_by_key(|event| event.start_at);
    Ok(scheduled)
}

pub async fn create<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &EventRequest,
) -> ServiceResult<ScheduledEvent> {
    let event: EventResponse =
        call(session, "events.create", resources::events::create(input)).await?;
    Ok(to_scheduled(event))
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &EventRequest,
) -> ServiceResult<ScheduledEvent> {
    let event: EventResponse =
        call(session, "events.update", resources::events::update(id, input)).await?;
    Ok(to_scheduled(event))
}

pub async fn delete<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<()> {
    call_discarding(session, "events.delete", resources::events::delete(id)).await
}

pub fn to_scheduled(dto: EventResponse) -> ScheduledEvent {
    ScheduledEvent {
        id: dto.id,
        title: dto.program_name.unwrap_or_else(|| "Open session".to_string()),
        location: dto.location_name.unwrap_or_default(),
        start_at: dto.start_at,
        end_at: dto.end_at,
        spots_left: dto
            .capacity
            .map(|capacity| capacity.saturating_sub(dto.enrolled)),
    }
}
