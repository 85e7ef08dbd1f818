use api::{AppState, router};
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use services::{Sampler, TriviaServices};
use storage::fixtures::seed_sample;
use storage::repository::Storage;
use tower::ServiceExt;

async fn sample_app() -> Router {
    let storage = Storage::in_memory();
    seed_sample(&storage).await.unwrap();
    app_for(&storage)
}

fn app_for(storage: &Storage) -> Router {
    let services = TriviaServices::new(storage, Sampler::seeded(42), 10);
    router(AppState::from(&services))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert_eq!(body["message"], message);
}

fn new_question() -> Value {
    json!({
        "question": "what is my name ?",
        "answer": "trivia",
        "category": "5",
        "difficulty": 5
    })
}

#[tokio::test]
async fn get_categories() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::GET, "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["categories"]["6"], "Sports");
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn get_categories_on_empty_store() {
    let app = app_for(&Storage::in_memory());
    let (status, body) = send(&app, Method::GET, "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"], json!({}));
}

#[tokio::test]
async fn get_questions() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_questions"], 19);
    assert_eq!(body["categories"]["3"], "Geography");
    assert_eq!(body["current_category"], Value::Null);
    assert_eq!(body["questions"][0]["id"], 2);

    let (_, second) = send(&app, Method::GET, "/questions?page=2", None).await;
    assert_eq!(second["questions"].as_array().unwrap().len(), 9);

    let (status, fallback) = send(&app, Method::GET, "/questions?page=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback["questions"][0]["id"], 2);
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let app = sample_app().await;
    for uri in ["/questions/?page=5", "/questions?page=3", "/questions?page=0"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
    }

    let empty = app_for(&Storage::in_memory());
    let (status, body) = send(&empty, Method::GET, "/questions", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test]
async fn delete_question() {
    let app = sample_app().await;
    let (_, created) = send(&app, Method::POST, "/questions", Some(new_question())).await;
    let id = created["created_id"].as_u64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/questions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], id);
    assert_eq!(body["total_questions"], 19);
    assert!(!body["questions"].as_array().unwrap().is_empty());
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);

    let (_, search) = send(
        &app,
        Method::POST,
        "/search",
        Some(json!({"searchTerm": "what is my name"})),
    )
    .await;
    assert_eq!(search["total_questions"], 0);
}

#[tokio::test]
async fn delete_missing_question_is_unprocessable() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::DELETE, "/questions/9999", None).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");

    let (status, body) = send(&app, Method::DELETE, "/questions/abc", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test]
async fn mutation_with_bad_listing_page_leaves_store_untouched() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::POST, "/questions?page=-1", Some(new_question())).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    let (status, body) = send(&app, Method::DELETE, "/questions/2?page=-1", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    let (_, listing) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(listing["total_questions"], 19);
    assert_eq!(listing["questions"][0]["id"], 2);

    let (status, body) = send(&app, Method::DELETE, "/questions/2?page=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 2);
    assert_eq!(body["questions"], json!([]));
    assert_eq!(body["total_questions"], 18);
}

#[tokio::test]
async fn add_question() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::POST, "/questions", Some(new_question())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["created_id"], 24);
    assert_eq!(body["total_questions"], 20);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);

    let (_, search) = send(
        &app,
        Method::POST,
        "/search",
        Some(json!({"searchTerm": "what is my name ?"})),
    )
    .await;
    assert_eq!(search["questions"][0]["id"], 24);
    assert_eq!(search["questions"][0]["category"], 5);
}

#[tokio::test]
async fn failing_to_add_question() {
    let app = sample_app().await;
    let incomplete = json!({"question": "what is my name ?", "answer": "trivia", "category": "1"});
    let blank = json!({"question": "  ", "answer": "trivia", "category": 1, "difficulty": 1});
    let too_hard = json!({"question": "q", "answer": "a", "category": 1, "difficulty": 9});
    let wordy = json!({"question": "q", "answer": "a", "category": "one", "difficulty": 1});

    for body in [incomplete, blank, too_hard, wordy] {
        let (status, body) = send(&app, Method::POST, "/questions", Some(body)).await;
        assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
    }

    let (status, body) = send(&app, Method::POST, "/questions", None).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");

    let (_, listing) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(listing["total_questions"], 19);
}

#[tokio::test]
async fn search_question() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::POST, "/search", Some(json!({"searchTerm": "What"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 8);
    assert_eq!(body["current_category"], Value::Null);

    let (status, body) = send(&app, Method::POST, "/search", Some(json!({"searchTerm": "zebra"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"], json!([]));
}

#[tokio::test]
async fn search_failed() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::POST, "/search", None).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");

    let (status, body) = send(&app, Method::POST, "/search", Some(json!({"term": "What"}))).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
}

#[tokio::test]
async fn get_questions_by_category() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::GET, "/categories/1/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["current_category"], 1);
    assert!(
        body["questions"]
            .as_array()
            .unwrap()
            .iter()
            .all(|q| q["category"] == 1)
    );
}

#[tokio::test]
async fn get_questions_by_unknown_category() {
    let app = sample_app().await;
    for uri in ["/categories/11111/questions", "/categories/art/questions"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
    }
}

#[tokio::test]
async fn get_question_for_quiz() {
    let app = sample_app().await;
    let body = json!({"previous_questions": [], "quiz_category": {"type": "Sports", "id": "6"}});
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"]["category"], 6);
    let id = body["question"]["id"].as_u64().unwrap();
    assert!(id == 10 || id == 11);
}

#[tokio::test]
async fn quiz_with_one_unseen_question_is_deterministic() {
    let app = sample_app().await;
    let body = json!({"previous_questions": [10], "quiz_category": {"type": "Sports", "id": 6}});
    let (_, body) = send(&app, Method::POST, "/quizzes", Some(body)).await;
    assert_eq!(body["question"]["id"], 11);
    assert_eq!(body["question"]["answer"], "Uruguay");
}

#[tokio::test]
async fn get_question_for_quiz_after_solving_all_questions() {
    let app = sample_app().await;
    let body = json!({"previous_questions": [10, 11], "quiz_category": {"type": "Sports", "id": "6"}});
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"], Value::Null);
}

#[tokio::test]
async fn quiz_over_all_categories() {
    let app = sample_app().await;
    let body = json!({"quiz_category": {"type": "click", "id": 0}});
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["question"]["id"].is_u64());

    let unknown = json!({"previous_questions": [], "quiz_category": {"id": 99}});
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(unknown)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], Value::Null);
}

#[tokio::test]
async fn quiz_bad_request() {
    let app = sample_app().await;
    let bodies = [
        Some(json!({"previous_questions": []})),
        Some(json!({"previous_questions": [], "quiz_category": {"type": "Sports"}})),
        Some(json!({"previous_questions": [], "quiz_category": {"id": -1}})),
        None,
    ];
    for body in bodies {
        let (status, body) = send(&app, Method::POST, "/quizzes", body).await;
        assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");
    }
}

#[tokio::test]
async fn unknown_route_and_wrong_method() {
    let app = sample_app().await;
    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    let (status, body) = send(&app, Method::PUT, "/questions", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = sample_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/questions")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_owned();
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn serves_from_sqlite() {
    let storage = Storage::sqlite("sqlite:file:memdb_api?mode=memory&cache=shared")
        .await
        .unwrap();
    seed_sample(&storage).await.unwrap();
    let app = app_for(&storage);

    let (status, body) = send(&app, Method::GET, "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 19);
    assert_eq!(body["questions"].as_array().unwrap().len(), 9);

    let (_, body) = send(&app, Method::POST, "/search", Some(json!({"searchTerm": "WHAT"}))).await;
    assert_eq!(body["total_questions"], 8);

    let (status, body) = send(&app, Method::DELETE, "/questions/18446744073709551615", None).await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");

    let (status, body) = send(
        &app,
        Method::GET,
        "/categories/18446744073709551615/questions",
        None,
    )
    .await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}
