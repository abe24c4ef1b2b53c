//! Site root and the demonstration message board

use axum::{extract::State, response::Html, response::Redirect, Form};

use crate::{
    error::AppResult,
    models::message::MessageForm,
    views::{MessageListPage, Page},
    AppState,
};

/// The site root forwards to the catalog
pub async fn home() -> Redirect {
    Redirect::to("/catalog")
}

pub async fn new_message_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.render(Page::MessageForm)
}

/// Append a message to the board
pub async fn new_message_post(
    State(state): State<AppState>,
    Form(form): Form<MessageForm>,
) -> AppResult<Redirect> {
    state.services.messages.post(form).await?;
    Ok(Redirect::to("/"))
}

pub async fn message_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let messages = state.services.messages.list().await?;
    state.render(Page::MessageList(MessageListPage { messages }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::testing::{get, post_form, Mocks};

    #[tokio::test]
    async fn test_root_redirects_to_catalog() {
        let res = get(Mocks::new().into_app(), "/").await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), Some("/catalog"));
    }

    #[tokio::test]
    async fn test_new_message_form() {
        let res = get(Mocks::new().into_app(), "/new").await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.page()["template"], "message_form");
    }

    #[tokio::test]
    async fn test_post_appends_and_redirects_home() {
        let app = Mocks::new().into_app();

        let res = post_form(app.clone(), "/new", "message=Good+morning&name=Ada").await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), Some("/"));

        let page = get(app, "/messages").await.page();
        let messages = page["context"]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2]["text"], "Good morning");
        assert_eq!(messages[2]["user"], "Ada");
    }
}
