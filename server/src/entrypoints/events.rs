use std::time::Duration;

use pixel_phantoms_server::{consts, context::Context};
use rocket::{
    response::stream::{Event, EventStream},
    serde::json::Json,
    State,
};
use shared::{source::Origin, Countdown, CountdownTicker, EventProposal, SourceError};
use tracing::{error, warn};

use super::types::{
    bad_request, not_found, unavailable, ApiError, ApiResult, EventResponse, EventsResponse,
    NextEventResponse, ProposalRequest, ProposalResponse,
};

#[utoipa::path(context_path = "/events", responses(
    (status = 200, description = "Get a page of upcoming events", body = EventsResponse),
    (status = 400, description = "Invalid page", body = ErrorResponse),
    (status = 503, description = "No event source could be read", body = ErrorResponse)
))]
#[get("/?<page>")]
pub async fn get_events(context: &State<Context>, page: Option<usize>) -> ApiResult<EventsResponse> {
    let page_number = page.unwrap_or(1);
    if page_number == 0 {
        return Err(bad_request(consts::INVALID_PAGE));
    }

    let loaded = match context.load_events().await {
        Err(e) => {
            error!("Failed to load events: {e}");
            return Err(unavailable(consts::EVENTS_UNAVAILABLE));
        }
        Ok(value) => value,
    };

    let next_up = loaded
        .next_upcoming(chrono::Utc::now())
        .cloned()
        .map(EventResponse::from);
    let notice = (loaded.origin == Origin::Fallback).then(|| consts::OFFLINE_NOTICE.to_string());
    let view = shared::page(&loaded.events, page_number, context.env.events_per_page);
    let message = view
        .items
        .is_empty()
        .then(|| consts::NO_EVENTS_MESSAGE.to_string());

    Ok(Json(EventsResponse {
        events: view.map(EventResponse::from).into(),
        next_up,
        origin: loaded.origin.to_string(),
        notice,
        message,
    }))
}

async fn next_event(context: &Context) -> Result<(EventResponse, chrono::DateTime<chrono::Utc>), ApiError> {
    let loaded = match context.load_events().await {
        Err(e) => {
            error!("Failed to load events: {e}");
            return Err(unavailable(consts::EVENTS_UNAVAILABLE));
        }
        Ok(value) => value,
    };

    let event = loaded
        .next_upcoming(chrono::Utc::now())
        .cloned()
        .ok_or_else(|| not_found(consts::NO_EVENTS_MESSAGE))?;
    let target = event
        .date
        .instant()
        .ok_or_else(|| not_found(consts::NO_EVENTS_MESSAGE))?;
    Ok((event.into(), target))
}

#[utoipa::path(context_path = "/events", responses(
    (status = 200, description = "Get the next upcoming event and the time left", body = NextEventResponse),
    (status = 404, description = "No upcoming event", body = ErrorResponse),
    (status = 503, description = "No event source could be read", body = ErrorResponse)
))]
#[get("/next")]
pub async fn get_next_event(context: &State<Context>) -> ApiResult<NextEventResponse> {
    let (event, target) = next_event(context).await?;
    let countdown = Countdown::between(chrono::Utc::now(), target)
        .ok_or_else(|| not_found(consts::NO_EVENTS_MESSAGE))?;

    Ok(Json(NextEventResponse {
        event,
        countdown: countdown.into(),
    }))
}

#[utoipa::path(context_path = "/events", responses(
    (status = 200, description = "Server-sent countdown ticks until the next event starts", content_type = "text/event-stream", body = String),
    (status = 404, description = "No upcoming event", body = ErrorResponse),
    (status = 503, description = "No event source could be read", body = ErrorResponse)
))]
#[get("/countdown")]
pub async fn get_countdown(context: &State<Context>) -> Result<EventStream![], ApiError> {
    let (_, target) = next_event(context).await?;
    let mut ticks = CountdownTicker::spawn(
        target,
        Duration::from_secs(consts::COUNTDOWN_PERIOD_IN_SECONDS),
    );

    Ok(EventStream! {
        while let Some(tick) = ticks.next().await {
            yield Event::json(&tick).event("countdown");
        }
    })
}

#[utoipa::path(context_path = "/events", request_body = ProposalRequest, responses(
    (status = 200, description = "Proposal forwarded to the events endpoint", body = ProposalResponse),
    (status = 400, description = "Missing title or date", body = ErrorResponse),
    (status = 503, description = "Proposal endpoint unavailable", body = ErrorResponse)
))]
#[post("/proposals", format = "json", data = "<proposal>")]
pub async fn post_proposal(
    context: &State<Context>,
    proposal: Json<ProposalRequest>,
) -> ApiResult<ProposalResponse> {
    let ProposalRequest {
        title,
        kind,
        date,
        description,
    } = proposal.into_inner();
    if title.trim().is_empty() || date.trim().is_empty() {
        return Err(bad_request(consts::PROPOSAL_MISSING_FIELDS));
    }

    let proposal = EventProposal::new(title.trim(), kind, date.trim(), description);
    let receipt = match context.submit_proposal(&proposal).await {
        Err(e @ SourceError::NotConfigured(_)) => {
            warn!("Proposal rejected: {e}");
            return Err(unavailable(consts::PROPOSALS_UNAVAILABLE));
        }
        Err(e) => {
            error!("Failed to submit proposal: {e}");
            return Err(unavailable(consts::PROPOSALS_UNAVAILABLE));
        }
        Ok(value) => value,
    };

    Ok(Json(receipt.into()))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing event entrypoints", |rocket| async {
        rocket.mount(
            "/events",
            rocket::routes![get_events, get_next_event, get_countdown, post_proposal],
        )
    })
}
