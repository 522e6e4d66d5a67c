use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use sea_orm::Order;

use crate::{
    AppState,
    error::{AppError, AppResult},
    flash,
    models::{AddForm, EditForm, EditFormErrors},
    templates,
};

pub fn edit_path(title: &str) -> String {
    format!("/edit-{}", urlencoding::encode(title))
}

pub fn delete_path(id: i32) -> String {
    format!("/{id}")
}

pub fn select_path(name: &str) -> String {
    format!("/select{}", urlencoding::encode(name))
}

pub fn add_title_path(tmdb_id: i32, name: &str) -> String {
    format!("/{tmdb_id}{}", urlencoding::encode(name))
}

pub async fn home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    state.movies.recompute_rankings().await?;
    let movies = state.movies.list_sorted_by_rating(Order::Asc).await?;

    let (jar, notice) = flash::take(jar);
    Ok((jar, Html(templates::list_page(&movies, notice.as_deref()))))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Html<String>> {
    let movie = state.movies.find_by_title(&title).await?;
    let form = EditForm::from_movie(&movie);
    Ok(Html(templates::edit_page(&movie, &form, &EditFormErrors::default())))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(title): Path<String>,
    jar: SignedCookieJar,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state.movies.find_by_title(&title).await?;

    match form.validate() {
        Ok(update) => {
            state.movies.apply_rating_review(&movie.title, update.rating, &update.review).await?;
            let jar = flash::set(jar, &format!("Updated {}.", movie.title));
            Ok((jar, Redirect::to("/")).into_response())
        },
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::edit_page(&movie, &form, &errors)),
        )
            .into_response()),
    }
}

/// What a single-segment path such as `/42` or `/278Shawshank` asks for.
#[derive(Debug, PartialEq)]
enum MovieAction {
    Delete(i32),
    AddTitle { tmdb_id: i32, name: String },
}

impl MovieAction {
    fn parse(segment: &str) -> Option<Self> {
        let name = segment.trim_start_matches(|c: char| c.is_ascii_digit());
        let id = segment[..segment.len() - name.len()].parse().ok()?;
        if name.is_empty() {
            Some(MovieAction::Delete(id))
        } else {
            Some(MovieAction::AddTitle { tmdb_id: id, name: name.to_string() })
        }
    }
}

/// Serves `/<id>` (delete) and `/<tmdb id><name>` (add-title).
pub async fn movie_action(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    match MovieAction::parse(&segment) {
        Some(MovieAction::Delete(id)) => Ok(delete(&state, id, jar).await?.into_response()),
        Some(MovieAction::AddTitle { tmdb_id, name }) => {
            Ok(add_title(&state, tmdb_id, name).await?.into_response())
        },
        None => Err(AppError::NotFound(format!("page /{segment}"))),
    }
}

async fn delete(
    state: &AppState,
    id: i32,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let movie = state.movies.delete(id).await?;
    let jar = flash::set(jar, &format!("Removed {}.", movie.title));
    Ok((jar, Redirect::to("/")))
}

pub async fn select(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let candidates = state.tmdb.search_movie(&name).await?;
    Ok(Html(templates::select_page(&name, &candidates)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(&AddForm::default(), None))
}

pub async fn add(Form(form): Form<AddForm>) -> Response {
    match form.validate() {
        Ok(title) => Redirect::to(&select_path(&title)).into_response(),
        Err(error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::add_page(&form, Some(&error))),
        )
            .into_response(),
    }
}

async fn add_title(state: &AppState, tmdb_id: i32, name: String) -> AppResult<Redirect> {
    let Some(candidate) = state.tmdb.find_candidate(&name, tmdb_id).await? else {
        return Err(AppError::NoMatchingCandidate { id: tmdb_id, query: name });
    };

    let movie =
        state.movies.insert_from_external(&candidate, &state.config.tmdb_image_base_url).await?;
    Ok(Redirect::to(&edit_path(&movie.title)))
}
