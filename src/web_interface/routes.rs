use std::sync::{Arc, OnceLock};

use log::error;
use regex::Regex;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use crate::program::favorites::Favorites;
use crate::program::pipeline::build_program;
use crate::program::types::{FilterState, FormatSelector, Language};
use crate::web_interface::types::{
    ApiError, AppState, FavoritesResponse, ProgramQuery, ProgramResponse,
};

/// Selector query values that clear an axis back to unset.
const CLEAR_VALUES: [&str; 2] = ["all", "both"];

/// GET /
pub fn dashboard_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(|| async move {
        let html = r#"<html><head><title>Podium</title></head>
                <body><h1>Podium is running</h1><p>See /program for the session listing.</p></body></html>"#;
        Ok::<_, Rejection>(reply::html(html))
    })
}

/// GET /program
pub fn program_route(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("program")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<ProgramQuery>())
        .and_then(move |query: ProgramQuery| {
            let state = state.clone();
            async move {
                let stored = query
                    .visitor
                    .map(|visitor| state.selectors.get(visitor))
                    .unwrap_or_default();
                let filter = match apply_query(stored, &query) {
                    Ok(filter) => filter,
                    Err(message) => {
                        let res = reply::with_status(
                            reply::json(&ApiError { message }),
                            StatusCode::BAD_REQUEST,
                        )
                        .into_response();
                        return Ok::<_, Rejection>(res);
                    }
                };
                if let Some(visitor) = query.visitor {
                    state.selectors.set(visitor, filter.clone());
                }

                let sessions = match state.sessions.read() {
                    Ok(guard) => guard,
                    Err(_) => {
                        let res = reply::with_status(
                            reply::json(&ApiError {
                                message: "Session cache unavailable".to_string(),
                            }),
                            StatusCode::INTERNAL_SERVER_ERROR,
                        )
                        .into_response();
                        return Ok::<_, Rejection>(res);
                    }
                };
                let fetched_at = state.fetched_at.read().ok().and_then(|guard| *guard);
                let response = match sessions.as_deref() {
                    Some(list) => {
                        let favorites = match state.favorites.lock() {
                            Ok(favorites) => favorites.clone(),
                            Err(_) => Favorites::new(),
                        };
                        let view = build_program(list, &favorites, &filter, &state.first_day);
                        ProgramResponse {
                            loading: false,
                            fetched_at,
                            program: Some(view),
                        }
                    }
                    // Fetch not completed (or failed): loading state, not an error.
                    None => ProgramResponse {
                        loading: true,
                        fetched_at: None,
                        program: None,
                    },
                };
                let res = reply::with_status(reply::json(&response), StatusCode::OK)
                    .into_response();
                Ok::<_, Rejection>(res)
            }
        })
}

/// GET /favorites
pub fn list_favorites_route(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("favorites")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(move || {
            let state = state.clone();
            async move {
                match state.favorites.lock() {
                    Ok(favorites) => Ok::<_, Rejection>(reply::with_status(
                        reply::json(&FavoritesResponse {
                            favorites: favorites.ids().to_vec(),
                        }),
                        StatusCode::OK,
                    )),
                    Err(_) => Ok::<_, Rejection>(reply::with_status(
                        reply::json(&ApiError {
                            message: "Favorites unavailable".to_string(),
                        }),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    )),
                }
            }
        })
}

/// POST /favorites/:id/toggle
pub fn toggle_favorite_route(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("favorites" / String / "toggle")
        .and(warp::post())
        .and_then(move |id: String| {
            let state = state.clone();
            async move {
                let ids = match state.favorites.lock() {
                    Ok(mut favorites) => {
                        favorites.toggle(&id);
                        let ids = favorites.ids().to_vec();
                        // The snapshot is persisted while the lock is still
                        // held, so concurrent toggles save in the order they
                        // apply. Persistence failure degrades to the
                        // in-memory list.
                        if let Err(e) = state.favorites_store.save(&ids) {
                            error!("Failed to persist favorites: {}", e);
                        }
                        ids
                    }
                    Err(_) => {
                        let res = reply::with_status(
                            reply::json(&ApiError {
                                message: "Favorites unavailable".to_string(),
                            }),
                            StatusCode::INTERNAL_SERVER_ERROR,
                        )
                        .into_response();
                        return Ok::<_, Rejection>(res);
                    }
                };
                let res = reply::with_status(
                    reply::json(&FavoritesResponse { favorites: ids }),
                    StatusCode::OK,
                )
                .into_response();
                Ok::<_, Rejection>(res)
            }
        })
}

/// Fold the query parameters into a visitor's stored selectors. A present
/// parameter sets its axis, the values in `CLEAR_VALUES` reset it, an
/// unrecognized value is rejected.
pub fn apply_query(stored: FilterState, query: &ProgramQuery) -> Result<FilterState, String> {
    let mut filter = stored;
    if let Some(day) = &query.day {
        if CLEAR_VALUES.contains(&day.as_str()) {
            filter.day = None;
        } else if is_date_param(day) {
            filter.day = Some(day.clone());
        } else {
            return Err(format!("Invalid day filter: {}", day));
        }
    }
    if let Some(language) = &query.language {
        if CLEAR_VALUES.contains(&language.as_str()) {
            filter.language = None;
        } else {
            match Language::parse_param(language) {
                Some(parsed) => filter.language = Some(parsed),
                None => return Err(format!("Invalid language filter: {}", language)),
            }
        }
    }
    if let Some(format) = &query.format {
        if CLEAR_VALUES.contains(&format.as_str()) {
            filter.format = None;
        } else {
            match FormatSelector::parse_param(format) {
                Some(parsed) => filter.format = Some(parsed),
                None => return Err(format!("Invalid format filter: {}", format)),
            }
        }
    }
    Ok(filter)
}

fn is_date_param(value: &str) -> bool {
    // Compiled once; the pattern cannot change at runtime.
    static DATE_SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    DATE_SHAPE
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}
