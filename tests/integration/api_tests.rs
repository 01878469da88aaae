//! API integration tests against a running, populated server

use reqwest::{header::SET_COOKIE, Client};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api/v1";

/// Session cookie pair (`sessionid=...`) from a response
fn session_cookie(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("No session cookie in response")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
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
async fn test_index_counts_visit() {
    let client = Client::new();

    let response = client
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let cookie = session_cookie(&response);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["visits"]["visits"], 1);
    assert!(body["categories"].as_array().unwrap().len() <= 5);
    assert!(body["pages"].as_array().unwrap().len() <= 5);

    let response = client
        .get(format!("{}/about", BASE_URL))
        .header("Cookie", cookie)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["visits"]["visits"], 1);
}

#[tokio::test]
#[ignore]
async fn test_index_lists_most_liked_first() {
    let client = Client::new();

    let body: Value = client
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let likes: Vec<i64> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["likes"].as_i64().unwrap())
        .collect();
    assert!(likes.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
#[ignore]
async fn test_show_python_category() {
    let client = Client::new();

    let response = client
        .get(format!("{}/categories/python", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["category"]["name"], "Python");
    assert_eq!(body["category"]["views"], 128);
    assert_eq!(body["query"], "Python");
    assert!(body["pages"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_unknown_category() {
    let client = Client::new();

    let response = client
        .get(format!("{}/categories/no-such-category", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
#[ignore]
async fn test_add_duplicate_category() {
    let client = Client::new();

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({ "name": "Python" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_add_category_with_blank_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_suggest_categories() {
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/suggest?suggestion=py", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Python"));
    assert!(names.len() <= 8);
}

#[tokio::test]
#[ignore]
async fn test_like_category() {
    let client = Client::new();

    let category: Value = client
        .get(format!("{}/categories/django", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let id = category["category"]["id"].as_i64().unwrap();
    let likes = category["category"]["likes"].as_i64().unwrap();

    let body: Value = client
        .get(format!("{}/like?category_id={}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["likes"].as_i64().unwrap(), likes + 1);
}

/// `category` object and `pages` list of a category by slug
async fn category_detail(client: &Client, slug: &str) -> Value {
    client
        .get(format!("{}/categories/{}", BASE_URL, slug))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
#[ignore]
async fn test_auto_add_page_twice_files_one_page() {
    let client = Client::new();
    let detail = category_detail(&client, "python").await;
    let category_id = detail["category"]["id"].as_i64().unwrap();

    let title = format!("Result {}", uuid::Uuid::new_v4());
    let url = "https://docs.python.org/3/library/asyncio.html";
    let request = json!({ "category_id": category_id, "title": title, "url": url });

    for _ in 0..2 {
        let response = client
            .post(format!("{}/pages", BASE_URL))
            .json(&request)
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());

        let pages: Value = response.json().await.expect("Failed to parse response");
        let matching = pages
            .as_array()
            .unwrap()
            .iter()
            .filter(|p| p["title"] == title.as_str() && p["url"] == url)
            .count();
        assert_eq!(matching, 1);
    }
}

#[tokio::test]
#[ignore]
async fn test_goto_counts_view_and_redirects_to_page() {
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client");

    let detail = category_detail(&client, "django").await;
    let page = &detail["pages"][0];
    let page_id = page["id"].as_i64().unwrap();
    let views = page["views"].as_i64().unwrap();

    let response = client
        .get(format!("{}/goto?page_id={}", BASE_URL, page_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()[reqwest::header::LOCATION],
        page["url"].as_str().unwrap()
    );

    let detail = category_detail(&client, "django").await;
    let page = detail["pages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"].as_i64() == Some(page_id))
        .expect("Page still listed");
    assert!(page["views"].as_i64().unwrap() >= views + 1);
}

#[tokio::test]
#[ignore]
async fn test_add_page_to_unknown_category() {
    let client = Client::new();

    let response = client
        .post(format!("{}/categories/no-such-category/pages", BASE_URL))
        .json(&json!({ "title": "Flask", "url": "http://flask.pocoo.org/" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
#[ignore]
async fn test_blank_category_search_keeps_default_query() {
    let client = Client::new();

    let body: Value = client
        .post(format!("{}/categories/python/search", BASE_URL))
        .json(&json!({ "query": "  " }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["query"], "Python");
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}
