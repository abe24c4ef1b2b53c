//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::form_id;
use crate::{
    error::AppResult,
    models::author::AuthorForm,
    services::authors::DeleteOutcome,
    views::{AuthorDeletePage, AuthorDetailPage, AuthorFormPage, AuthorListPage, Page},
    AppState,
};

const AUTHOR_LIST_URL: &str = "/catalog/authors";

/// Body of the delete confirmation form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthorDeleteForm {
    pub authorid: String,
}

/// Display list of all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    state.render(Page::AuthorList(AuthorListPage { authors }))
}

/// Display detail page for a specific author
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let (author, books) = state.services.authors.detail(id).await?;
    state.render(Page::AuthorDetail(AuthorDetailPage { author, books }))
}

/// Display author create form
pub async fn author_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.render(Page::AuthorForm(AuthorFormPage {
        title: "Create Author",
        author: AuthorForm::default(),
        errors: vec![],
    }))
}

/// Handle author create
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match form.into_new_author() {
        Ok(new_author) => {
            let author = state.services.authors.create(new_author).await?;
            Ok(Redirect::to(&author.url()).into_response())
        }
        Err((author, errors)) => Ok(state
            .render(Page::AuthorForm(AuthorFormPage {
                title: "Create Author",
                author,
                errors,
            }))?
            .into_response()),
    }
}

/// Display author delete confirmation
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let (author, books) = state.services.authors.with_books(id).await?;
    let Some(author) = author else {
        return Ok(Redirect::to(AUTHOR_LIST_URL).into_response());
    };

    Ok(state
        .render(Page::AuthorDelete(AuthorDeletePage {
            author_id: id,
            author: Some(author),
            books,
        }))?
        .into_response())
}

/// Handle author delete. Refused while books still reference the author.
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(body): Form<AuthorDeleteForm>,
) -> AppResult<Response> {
    let target_id = form_id(&body.authorid, "authorid")?;

    match state.services.authors.delete(id, target_id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to(AUTHOR_LIST_URL).into_response()),
        DeleteOutcome::HasBooks { author, books } => Ok(state
            .render(Page::AuthorDelete(AuthorDeletePage {
                author_id: id,
                author,
                books,
            }))?
            .into_response()),
    }
}

/// Display author update form
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let author = state.services.authors.get(id).await?;
    state.render(Page::AuthorForm(AuthorFormPage {
        title: "Update Author",
        author: AuthorForm::from(&author),
        errors: vec![],
    }))
}

/// Handle author update
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match form.into_new_author() {
        Ok(new_author) => {
            let author = state.services.authors.update(id, new_author).await?;
            Ok(Redirect::to(&author.url()).into_response())
        }
        Err((author, errors)) => Ok(state
            .render(Page::AuthorForm(AuthorFormPage {
                title: "Update Author",
                author,
                errors,
            }))?
            .into_response()),
    }
}
