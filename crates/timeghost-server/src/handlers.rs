//! HTTP request handlers.
//!
//! Page handlers render HTML through [`Pages`](crate::pages::Pages). A
//! selection that fails is not an HTTP error for pages: the visitor gets a
//! normal page saying no pairing was found. The JSON endpoint reports the
//! same failure as `422`.

use std::sync::Arc;

use axum::Form;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use minijinja::context;
use serde::Deserialize;
use timeghost_core::{Anchor, Event, SearchOrder, SelectError, Selector, Timeghost};
use tracing::{info, warn};

use crate::error::WebError;
use crate::state::AppState;
use crate::view::{EventView, TimeghostView};

/// Message shown when the selector gives up.
pub const NO_PAIRING_MESSAGE: &str = "Sorry, could not find a valid pairing this time.";

/// Run a selector over a fresh copy of the catalog.
fn search(
    state: &AppState,
    middle: Option<&str>,
    anchor: Anchor,
    order: SearchOrder,
) -> Result<Result<Timeghost, SelectError>, WebError> {
    let middle = middle.map(|slug| state.catalog.resolve(slug)).transpose()?;
    let selector = Selector::new(state.catalog.working_copy())
        .middle(middle)
        .anchor(anchor)
        .order(order)
        .max_tries(state.max_tries);
    Ok(selector.run(&mut rand::rng()))
}

fn render_ghost(state: &AppState, ghost: &Timeghost) -> Result<Html<String>, WebError> {
    let html = state.pages.render(
        "timeghost.html",
        context! { timeghost => TimeghostView::from(ghost) },
    )?;
    Ok(Html(html))
}

fn search_page(
    state: &AppState,
    middle: Option<&str>,
    anchor: Anchor,
    order: SearchOrder,
) -> Result<Html<String>, WebError> {
    match search(state, middle, anchor, order)? {
        Ok(ghost) => render_ghost(state, &ghost),
        Err(err) => {
            warn!(error = %err, ?anchor, ?order, "selection failed");
            let html = state.pages.render(
                "error.html",
                context! { message => NO_PAIRING_MESSAGE, detail => err.to_string() },
            )?;
            Ok(Html(html))
        }
    }
}

// ---------------------------------------------------------------------------
// Random middle
// ---------------------------------------------------------------------------

/// `GET /` and `GET /worst/random`.
pub async fn worst_random(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    search_page(&state, None, Anchor::Now, SearchOrder::Chronological)
}

/// `GET /random/random`.
pub async fn random_random(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    search_page(&state, None, Anchor::Now, SearchOrder::Random)
}

/// `GET /arbitrary/worst/random`.
pub async fn arbitrary_worst_random(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, WebError> {
    search_page(&state, None, Anchor::Arbitrary, SearchOrder::Chronological)
}

/// `GET /arbitrary/random/random`.
pub async fn arbitrary_random_random(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, WebError> {
    search_page(&state, None, Anchor::Arbitrary, SearchOrder::Random)
}

// ---------------------------------------------------------------------------
// Pinned middle
// ---------------------------------------------------------------------------

/// `GET /worst/{slug}`.
pub async fn worst_pinned(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    search_page(&state, Some(&slug), Anchor::Now, SearchOrder::Chronological)
}

/// `GET /random/{slug}`.
pub async fn random_pinned(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    search_page(&state, Some(&slug), Anchor::Now, SearchOrder::Random)
}

/// `GET /arbitrary/worst/{slug}`.
pub async fn arbitrary_worst_pinned(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    search_page(&state, Some(&slug), Anchor::Arbitrary, SearchOrder::Chronological)
}

/// `GET /arbitrary/random/{slug}`.
pub async fn arbitrary_random_pinned(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    search_page(&state, Some(&slug), Anchor::Arbitrary, SearchOrder::Random)
}

// ---------------------------------------------------------------------------
// Fully specified
// ---------------------------------------------------------------------------

/// `GET /{first}/{middle}/{last}`: render the triple as given, valid or not.
pub async fn fully_specified(
    State(state): State<Arc<AppState>>,
    Path((first, middle, last)): Path<(String, String, String)>,
) -> Result<Html<String>, WebError> {
    let ghost = Timeghost::unchecked(
        state.catalog.resolve(&first)?,
        state.catalog.resolve(&middle)?,
        state.catalog.resolve(&last)?,
    );
    render_ghost(&state, &ghost)
}

/// Fields posted by the pick form.
#[derive(Debug, Deserialize)]
pub struct PickForm {
    /// Slug of the first event.
    pub event_first: String,
    /// Slug of the middle event.
    pub event_middle: String,
}

/// `GET /pick`: list every event, latest first.
pub async fn pick_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let events: Vec<EventView> = state
        .catalog
        .newest_first()
        .into_iter()
        .map(EventView::from)
        .collect();
    let html = state.pages.render("pick.html", context! { events => events })?;
    Ok(Html(html))
}

/// `POST /pick`: render the picked pair against now, unchecked.
pub async fn pick_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PickForm>,
) -> Result<Html<String>, WebError> {
    let first = state.catalog.resolve(&form.event_first)?;
    let middle = state.catalog.resolve(&form.event_middle)?;
    let ghost = Timeghost::unchecked(first, middle, Event::now());
    info!(permalink = %ghost.permalink(), valid = ghost.is_valid(), "picked timeghost");
    render_ghost(&state, &ghost)
}

/// `GET /raves`.
pub async fn raves(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    Ok(Html(state.pages.render("raves.html", ())?))
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/timeghost`.
#[derive(Debug, Default, Deserialize)]
pub struct TimeghostQuery {
    /// Slug of a pinned middle event. Omitted or `random` draws one.
    pub middle: Option<String>,
    /// `now` (default) or `arbitrary`.
    #[serde(default)]
    pub anchor: Anchor,
    /// `worst`/`chronological` (default) or `random`.
    #[serde(default)]
    pub order: SearchOrder,
}

/// `GET /api/timeghost`: one selection as JSON.
pub async fn api_timeghost(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TimeghostQuery>, QueryRejection>,
) -> Result<Json<TimeghostView>, WebError> {
    let Query(query) = query.map_err(|e| WebError::InvalidQuery(e.body_text()))?;
    let middle = query.middle.as_deref().filter(|slug| *slug != "random");
    let ghost = search(&state, middle, query.anchor, query.order)??;
    Ok(Json(TimeghostView::from(&ghost)))
}
