use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use cookie::Cookie;
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppResult, StoreError},
    models::{CreateMovieForm, Money, NewMovie},
    templates,
};

/// Holds the id of the movie just created, shown once on the index page.
pub const FLASH_COOKIE: &str = "flash";

pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let counts = state.store.catalog_counts().await?;
    Ok(Html(templates::home_page(counts)))
}

#[derive(Debug, Deserialize)]
pub struct MovieFilter {
    genre: Option<i32>,
}

pub async fn movies_index(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<MovieFilter>, QueryRejection>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let Query(filter) = filter.map_err(|rejection| StoreError::Validation {
        entity: "movie".to_string(),
        column: "genre".to_string(),
        reason: rejection.body_text(),
    })?;

    let created = match jar.get(FLASH_COOKIE).and_then(|c| c.value().parse::<i32>().ok()) {
        Some(id) => match state.store.movie(id).await {
            Ok(movie) => Some(movie),
            Err(StoreError::NotFound(_)) => None,
            Err(err) => return Err(err.into()),
        },
        None => None,
    };
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));

    let (summaries, genres) =
        futures::try_join!(state.store.movie_summaries(filter.genre), state.store.genres())?;

    let body = templates::movies_page(&summaries, &genres, filter.genre, created.as_ref());
    Ok((jar, Html(body)))
}

pub async fn create_form() -> Html<String> {
    Html(templates::create_movie_page(None, "", ""))
}

fn parse_budget(input: &str) -> Result<Option<Money>, StoreError> {
    if input.is_empty() {
        return Ok(None);
    }
    input.parse::<Money>().map(Some).map_err(|err| StoreError::Validation {
        entity: "movie".to_string(),
        column: "budget".to_string(),
        reason: err.to_string(),
    })
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CreateMovieForm>,
) -> AppResult<Response> {
    let title = form.title.trim();
    let budget = form.budget.trim();

    let created = match parse_budget(budget) {
        Ok(budget) => {
            let new = NewMovie { title: title.to_string(), budget, ..Default::default() };
            state.store.create_movie(new).await
        }
        Err(err) => Err(err),
    };

    match created {
        Ok(movie) => {
            let flash = Cookie::build((FLASH_COOKIE, movie.id.to_string()))
                .path("/")
                .http_only(true)
                .max_age(time::Duration::seconds(state.config.flash_ttl_secs));
            Ok((jar.add(flash), Redirect::to("/Movies/Index")).into_response())
        }
        Err(err @ StoreError::Validation { .. }) => {
            tracing::debug!(error = %err, "rejected movie form");
            let body = templates::create_movie_page(Some(&err.to_string()), title, budget);
            Ok((StatusCode::BAD_REQUEST, Html(body)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn movie_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let details = state.store.movie_details(id).await?;
    Ok(Html(templates::movie_details_page(&details)))
}
