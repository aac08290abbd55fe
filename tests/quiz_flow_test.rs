mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{capitals_batch, question, send_json, signup, test_app};

#[tokio::test]
async fn full_quiz_flow_from_signup_to_profile() {
    let (app, store) = test_app(capitals_batch());
    let (token, _user_id) = signup(&app, "Alice", "alice@example.com").await;

    // Start a session over the three fixed questions.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/quiz/start",
        Some(&token),
        Some(json!({ "amount": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["current_index"], 0);
    assert_eq!(body["score"], 0);

    // First question: options contain the correct answer, which is not
    // revealed before an answer is submitted.
    let (status, body) = send_json(&app, "GET", "/api/quiz/current", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "Capital of France?");
    assert_eq!(body["is_last"], false);
    assert!(body.get("correct_answer").is_none());
    let options: Vec<&str> = body["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(options.len(), 4);
    assert!(options.contains(&"Paris"));

    // Wrong answer first, then the correct one. The score reflects the
    // latest answer only.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/quiz/answer",
        Some(&token),
        Some(json!({ "answer": "Lyon" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], false);
    assert_eq!(body["correct_answer"], "Paris");
    assert_eq!(body["score"], 0);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/quiz/answer",
        Some(&token),
        Some(json!({ "answer": "Paris" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["score"], 1);

    // Once answered, fetching the question again reveals the answer key.
    let (_, body) = send_json(&app, "GET", "/api/quiz/current", Some(&token), None).await;
    assert_eq!(body["selected_answer"], "Paris");
    assert_eq!(body["correct_answer"], "Paris");

    let (status, body) = send_json(&app, "POST", "/api/quiz/advance", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_index"], 1);
    assert_eq!(body["complete"], false);

    // Question two answered wrong.
    let (_, body) = send_json(
        &app,
        "POST",
        "/api/quiz/answer",
        Some(&token),
        Some(json!({ "answer": "Milan" })),
    )
    .await;
    assert_eq!(body["correct"], false);

    let (_, body) = send_json(&app, "POST", "/api/quiz/advance", Some(&token), None).await;
    assert_eq!(body["current_index"], 2);

    // Last question answered right. Advancing past the end is a no-op.
    let (_, body) = send_json(
        &app,
        "POST",
        "/api/quiz/answer",
        Some(&token),
        Some(json!({ "answer": "Madrid" })),
    )
    .await;
    assert_eq!(body["score"], 2);

    let (status, body) = send_json(&app, "POST", "/api/quiz/advance", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_index"], 2);
    assert_eq!(body["complete"], true);

    let (_, body) = send_json(&app, "GET", "/api/quiz/status", Some(&token), None).await;
    assert_eq!(body["active"], true);
    assert_eq!(body["answered"], 3);
    assert_eq!(body["complete"], true);
    assert_eq!(body["finalized"], false);

    // Finalize records the outcome exactly once.
    let (status, body) = send_json(&app, "POST", "/api/quiz/finalize", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 2);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["category"], "Geography");
    assert_eq!(body["persisted"], true);
    assert!((body["percentage"].as_f64().unwrap() - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(store.attempt_count(), 1);

    // A second finalize is rejected and writes nothing.
    let (status, _) = send_json(&app, "POST", "/api/quiz/finalize", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(store.attempt_count(), 1);

    // The recorded attempt shows up in the profile.
    let (status, body) = send_json(&app, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["statistics"]["total_attempts"], 1);
    assert_eq!(body["statistics"]["best_score"], 2);
    assert!(
        (body["statistics"]["average_percentage"].as_f64().unwrap() - 200.0 / 3.0).abs() < 1e-9
    );
    assert_eq!(body["recent_attempts"].as_array().unwrap().len(), 1);
    assert_eq!(body["recent_attempts"][0]["score"], 2);
}

#[tokio::test]
async fn advance_requires_an_answer() {
    let (app, _store) = test_app(capitals_batch());
    let (token, _) = signup(&app, "Bob", "bob@example.com").await;

    send_json(
        &app,
        "POST",
        "/api/quiz/start",
        Some(&token),
        Some(json!({ "amount": 3 })),
    )
    .await;

    let (status, body) = send_json(&app, "POST", "/api/quiz/advance", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT, "body: {}", body);
}

#[tokio::test]
async fn empty_batch_leaves_no_session() {
    let (app, _store) = test_app(vec![]);
    let (token, _) = signup(&app, "Carol", "carol@example.com").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/quiz/start",
        Some(&token),
        Some(json!({ "amount": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send_json(&app, "GET", "/api/quiz/status", Some(&token), None).await;
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn reset_discards_the_session() {
    let (app, store) = test_app(vec![question(
        "2 + 2?",
        "4",
        &["3", "5", "22"],
    )]);
    let (token, _) = signup(&app, "Dave", "dave@example.com").await;

    send_json(
        &app,
        "POST",
        "/api/quiz/start",
        Some(&token),
        Some(json!({ "amount": 1 })),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/quiz/answer",
        Some(&token),
        Some(json!({ "answer": "4" })),
    )
    .await;

    let (status, _) = send_json(&app, "POST", "/api/quiz/reset", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "POST", "/api/quiz/finalize", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(store.attempt_count(), 0);
}

#[tokio::test]
async fn sessions_are_isolated_per_user() {
    let (app, _store) = test_app(capitals_batch());
    let (alice, _) = signup(&app, "Alice", "alice2@example.com").await;
    let (bob, _) = signup(&app, "Bob", "bob2@example.com").await;

    send_json(
        &app,
        "POST",
        "/api/quiz/start",
        Some(&alice),
        Some(json!({ "amount": 3 })),
    )
    .await;

    let (_, body) = send_json(&app, "GET", "/api/quiz/status", Some(&bob), None).await;
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn quiz_routes_require_a_token() {
    let (app, _store) = test_app(capitals_batch());

    let (status, body) = send_json(&app, "GET", "/api/quiz/status", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let (status, body) = send_json(
        &app,
        "GET",
        "/api/quiz/status",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn login_round_trip_and_bad_credentials() {
    let (app, _store) = test_app(vec![]);
    signup(&app, "Erin", "erin@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "erin@example.com",
            "password": "correct-horse-battery"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["name"], "Erin");

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "erin@example.com",
            "password": "wrong-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown email gets the same status as a wrong password.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "nobody@example.com",
            "password": "correct-horse-battery"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let (app, _store) = test_app(vec![]);
    signup(&app, "Frank", "frank@example.com").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Frank Again",
            "email": "frank@example.com",
            "password": "another-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
