//! Integration tests against a running server
//!
//! Start the server with a migrated database, then run:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Client that reports redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("No Location header")
        .to_string()
}

/// Create an author through the form and return its canonical URL
async fn create_author(client: &Client, first_name: &str, family_name: &str) -> String {
    let response = client
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[
            ("first_name", first_name),
            ("family_name", family_name),
            ("date_of_birth", "1950-01-01"),
            ("date_of_death", ""),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    location(&response)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_root_redirects_to_catalog() {
    let response = client()
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog");
}

#[tokio::test]
#[ignore]
async fn test_catalog_home() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Authors:"));
}

#[tokio::test]
#[ignore]
async fn test_author_lifecycle() {
    let client = client();
    let url = create_author(&client, "Integration", "Tester").await;
    assert!(url.starts_with("/catalog/author/"));
    let id = url.trim_start_matches("/catalog/author/").to_string();

    let body = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Tester, Integration"));

    let response = client
        .post(format!("{}{}/update", BASE_URL, url))
        .form(&[("first_name", "Renamed"), ("family_name", "Tester")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), url);

    let response = client
        .post(format!("{}{}/delete", BASE_URL, url))
        .form(&[("authorid", id.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/authors");

    let response = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_author_create_invalid() {
    let response = client()
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", "Ann!"), ("family_name", "")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Family Name must be specified"));
    assert!(body.contains("First name includes non-alpha characters"));
}

#[tokio::test]
#[ignore]
async fn test_book_instance_missing() {
    let client = client();

    let response = client
        .get(format!("{}/catalog/bookinstance/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{}/catalog/bookinstance/999999/delete", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/bookinstances");
}

#[tokio::test]
#[ignore]
async fn test_post_message() {
    let client = client();

    let response = client
        .post(format!("{}/new", BASE_URL))
        .form(&[("message", "Integration hello"), ("name", "Tester")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let body = client
        .get(format!("{}/messages", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Integration hello"));
}
