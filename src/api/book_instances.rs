//! Book instance (copy) pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::form_id;
use crate::{
    error::AppResult,
    models::{book_instance::BookInstanceForm, FieldError},
    views::{
        BookInstanceDeletePage, BookInstanceDetailPage, BookInstanceFormPage,
        BookInstanceListPage, Page,
    },
    AppState,
};

const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

/// Body of the delete confirmation form
#[derive(Debug, Default, Deserialize)]
pub struct BookInstanceDeleteForm {
    #[serde(rename = "bookInstanceId", default)]
    pub book_instance_id: String,
}

/// Display list of all book copies
pub async fn book_instance_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.book_instances.list().await?;
    state.render(Page::BookInstanceList(BookInstanceListPage { instances }))
}

/// Display detail page for a specific copy
pub async fn book_instance_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let instance = state.services.book_instances.get(id).await?;
    state.render(Page::BookInstanceDetail(BookInstanceDetailPage { instance }))
}

/// Display copy create form
pub async fn book_instance_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.book_choices().await?;
    state.render(Page::BookInstanceForm(BookInstanceFormPage {
        title: "Create BookInstance",
        books,
        selected_book: None,
        instance: BookInstanceForm::default(),
        errors: vec![],
    }))
}

/// Handle copy create
pub async fn book_instance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match form.into_new_book_instance() {
        Ok(new_instance) => {
            let instance = state.services.book_instances.create(new_instance).await?;
            Ok(Redirect::to(&instance.url()).into_response())
        }
        Err((instance, errors)) => {
            render_invalid_form(&state, "Create BookInstance", instance, errors).await
        }
    }
}

/// Display copy delete confirmation
pub async fn book_instance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(instance) = state.services.book_instances.find(id).await? else {
        return Ok(Redirect::to(BOOK_INSTANCE_LIST_URL).into_response());
    };

    Ok(state
        .render(Page::BookInstanceDelete(BookInstanceDeletePage { instance }))?
        .into_response())
}

/// Handle copy delete
pub async fn book_instance_delete_post(
    State(state): State<AppState>,
    Path(_id): Path<i32>,
    Form(body): Form<BookInstanceDeleteForm>,
) -> AppResult<Redirect> {
    let target_id = form_id(&body.book_instance_id, "bookInstanceId")?;
    state.services.book_instances.delete(target_id).await?;
    Ok(Redirect::to(BOOK_INSTANCE_LIST_URL))
}

/// Display copy update form
pub async fn book_instance_update_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let (books, current) = state.services.book_instances.edit(id).await?;
    state.render(Page::BookInstanceForm(BookInstanceFormPage {
        title: "Update BookInstance",
        books,
        selected_book: Some(current.instance.book_id),
        instance: BookInstanceForm::from(&current.instance),
        errors: vec![],
    }))
}

/// Handle copy update
pub async fn book_instance_update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match form.into_new_book_instance() {
        Ok(new_instance) => {
            let instance = state
                .services
                .book_instances
                .update(id, new_instance)
                .await?;
            Ok(Redirect::to(&instance.url()).into_response())
        }
        Err((instance, errors)) => {
            render_invalid_form(&state, "Update BookInstance", instance, errors).await
        }
    }
}

/// Re-render the form with the entered values, a fresh book list and the errors
async fn render_invalid_form(
    state: &AppState,
    title: &'static str,
    instance: BookInstanceForm,
    errors: Vec<FieldError>,
) -> AppResult<Response> {
    let books = state.services.book_instances.book_choices().await?;
    Ok(state
        .render(Page::BookInstanceForm(BookInstanceFormPage {
            title,
            books,
            selected_book: instance.selected_book(),
            instance,
            errors,
        }))?
        .into_response())
}
