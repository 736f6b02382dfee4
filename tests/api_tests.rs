// tests/api_tests.rs

use std::sync::Arc;

use quiz_backend::{
    config::Config,
    routes,
    services::refresh,
    state::AppState,
    store::{MemoryStore, QuizStore},
};
use serde_json::{Value, json};

/// Spawns the app on a random port backed by a fresh in-memory store.
/// Returns the base URL (e.g., "http://127.0.0.1:12345") and the store for direct inspection.
async fn spawn_app() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), Config::in_memory());
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, store)
}

/// Like `spawn_app`, with the seed question set installed.
async fn spawn_seeded_app() -> (String, Arc<MemoryStore>) {
    let (address, store) = spawn_app().await;
    refresh::refresh(store.as_ref()).await.expect("seeding failed");
    (address, store)
}

/// Builds a full answer sheet for the given quiz. `pick` maps (question id, position) to an option.
async fn answer_sheet(
    store: &MemoryStore,
    questions: &[Value],
    pick: impl Fn(i16, usize) -> i16,
) -> Vec<Value> {
    let mut answers = Vec::new();
    for (position, q) in questions.iter().enumerate() {
        let id = q["id"].as_i64().unwrap();
        let stored = store.find_question(id).await.unwrap().unwrap();
        answers.push(json!({
            "questionId": id,
            "selectedOption": pick(stored.correct_answer, position),
        }));
    }
    answers
}

async fn fetch_quiz(client: &reqwest::Client, address: &str) -> Vec<Value> {
    let body: Value = client
        .get(format!("{}/api/quiz/questions", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    body["questions"].as_array().unwrap().clone()
}

async fn submit(
    client: &reqwest::Client,
    address: &str,
    user_name: &str,
    answers: Vec<Value>,
    time_taken: i64,
) -> reqwest::Response {
    client
        .post(format!("{}/api/quiz/submit", address))
        .json(&json!({
            "userName": user_name,
            "answers": answers,
            "timeTaken": time_taken,
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "API endpoint not found");
}

#[tokio::test]
async fn health_check_works() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/health", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn questions_fail_when_bank_is_too_small() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/quiz/questions", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("20"));
}

#[tokio::test]
async fn questions_hide_the_answer() {
    let (address, _) = spawn_seeded_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/quiz/questions", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["totalQuestions"], 20);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 20);

    let mut ids: Vec<i64> = questions.iter().map(|q| q["id"].as_i64().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    for (index, q) in questions.iter().enumerate() {
        assert_eq!(q["questionNumber"], index + 1);
        assert_eq!(q["options"].as_array().unwrap().len(), 4);
        assert!(q.get("correctAnswer").is_none());
        assert_eq!(q["category"], "Cybersecurity");
    }
}

#[tokio::test]
async fn perfect_submission_scores_100() {
    let (address, store) = spawn_seeded_app().await;
    let client = reqwest::Client::new();

    let questions = fetch_quiz(&client, &address).await;
    let answers = answer_sheet(&store, &questions, |correct, _| correct).await;

    let response = submit(&client, &address, "  Alice ", answers, 120).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let result = &body["result"];
    assert_eq!(result["totalQuestions"], 20);
    assert_eq!(result["correctAnswers"], 20);
    assert_eq!(result["wrongAnswers"], 0);
    assert_eq!(result["finalScore"], 100);
    assert_eq!(result["timeTaken"], 120);
    assert!(result["resultId"].is_i64());

    let stored = store
        .find_result(result["resultId"].as_i64().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_name, "Alice");
}

#[tokio::test]
async fn unanswered_submission_scores_zero() {
    let (address, store) = spawn_seeded_app().await;
    let client = reqwest::Client::new();

    let questions = fetch_quiz(&client, &address).await;
    let answers = answer_sheet(&store, &questions, |_, _| -1).await;

    let response = submit(&client, &address, "Bob", answers, 300).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["result"]["correctAnswers"], 0);
    assert_eq!(body["result"]["wrongAnswers"], 20);
    assert_eq!(body["result"]["finalScore"], 0);
}

#[tokio::test]
async fn malformed_submissions_are_rejected() {
    let (address, store) = spawn_seeded_app().await;
    let client = reqwest::Client::new();
    let questions = fetch_quiz(&client, &address).await;

    // Too few answers
    let mut short = answer_sheet(&store, &questions, |c, _| c).await;
    short.pop();
    let response = submit(&client, &address, "Carol", short, 10).await;
    assert_eq!(response.status().as_u16(), 400);

    // Blank name
    let answers = answer_sheet(&store, &questions, |c, _| c).await;
    let response = submit(&client, &address, "   ", answers, 10).await;
    assert_eq!(response.status().as_u16(), 400);

    // Unknown question id
    let mut answers = answer_sheet(&store, &questions, |c, _| c).await;
    answers[0]["questionId"] = json!(987_654_321);
    let response = submit(&client, &address, "Carol", answers, 10).await;
    assert_eq!(response.status().as_u16(), 400);

    // Option out of range
    let mut answers = answer_sheet(&store, &questions, |c, _| c).await;
    answers[0]["selectedOption"] = json!(7);
    let response = submit(&client, &address, "Carol", answers, 10).await;
    assert_eq!(response.status().as_u16(), 400);

    // Not JSON at all
    let response = client
        .post(format!("{}/api/quiz/submit", address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);

    assert_eq!(store.count_results().await.unwrap(), 0);
}

#[tokio::test]
async fn leaderboard_orders_by_score_then_time() {
    let (address, store) = spawn_seeded_app().await;
    let client = reqwest::Client::new();
    let questions = fetch_quiz(&client, &address).await;

    // 16 of 20 correct = 80
    let eighty = |correct: i16, position: usize| if position < 16 { correct } else { -1 };

    let answers = answer_sheet(&store, &questions, eighty).await;
    submit(&client, &address, "slow", answers, 120).await;
    let answers = answer_sheet(&store, &questions, eighty).await;
    submit(&client, &address, "fast", answers, 90).await;
    let answers = answer_sheet(&store, &questions, |_, _| -1).await;
    submit(&client, &address, "zero", answers, 5).await;

    let body: Value = client
        .get(format!("{}/api/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);

    let board = body["leaderboard"].as_array().unwrap();
    let names: Vec<&str> = board.iter().map(|e| e["userName"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["fast", "slow", "zero"]);
    assert_eq!(board[0]["finalScore"], 80);
    assert_eq!(board[0]["correctAnswers"], 16);
    assert!(board[0].get("answers").is_none());

    let body: Value = client
        .get(format!("{}/api/quiz/leaderboard?limit=1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["leaderboard"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_leaderboard_and_statistics() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["leaderboard"], json!([]));

    let response = client
        .get(format!("{}/api/quiz/statistics", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let stats = &body["statistics"];
    assert_eq!(stats["totalParticipants"], 0);
    assert_eq!(stats["totalAttempts"], 0);
    assert_eq!(stats["averageScore"], 0);
    assert_eq!(stats["highestScore"], 0);
    assert_eq!(stats["averageTime"], 0);
}

#[tokio::test]
async fn history_and_statistics_follow_submissions() {
    let (address, store) = spawn_seeded_app().await;
    let client = reqwest::Client::new();
    let questions = fetch_quiz(&client, &address).await;

    let answers = answer_sheet(&store, &questions, |c, _| c).await;
    submit(&client, &address, "dana", answers, 100).await;
    let answers = answer_sheet(&store, &questions, |c, p| if p < 10 { c } else { -1 }).await;
    submit(&client, &address, "dana", answers, 50).await;
    let answers = answer_sheet(&store, &questions, |_, _| -1).await;
    submit(&client, &address, "eve", answers, 30).await;

    let body: Value = client
        .get(format!("{}/api/quiz/history/dana", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    // Newest first
    assert_eq!(history[0]["finalScore"], 50);
    assert_eq!(history[1]["finalScore"], 100);

    let body: Value = client
        .get(format!("{}/api/quiz/statistics", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let stats = &body["statistics"];
    assert_eq!(stats["totalParticipants"], 2);
    assert_eq!(stats["totalAttempts"], 3);
    assert_eq!(stats["averageScore"], 50);
    assert_eq!(stats["highestScore"], 100);
    assert_eq!(stats["averageTime"], 60);
}

#[tokio::test]
async fn names_with_markup_characters_round_trip() {
    let (address, store) = spawn_seeded_app().await;
    let client = reqwest::Client::new();
    let questions = fetch_quiz(&client, &address).await;

    let answers = answer_sheet(&store, &questions, |c, _| c).await;
    let response = submit(&client, &address, "  Tom & Jerry ", answers, 40).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let id = body["result"]["resultId"].as_i64().unwrap();
    let stored = store.find_result(id).await.unwrap().unwrap();
    assert_eq!(stored.user_name, "Tom & Jerry");

    let answers = answer_sheet(&store, &questions, |_, _| -1).await;
    submit(&client, &address, "x<y", answers, 10).await;
    let answers = answer_sheet(&store, &questions, |_, _| -1).await;
    submit(&client, &address, "x<z", answers, 10).await;

    let body: Value = client
        .get(format!("{}/api/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = body["leaderboard"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["userName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tom & Jerry", "x<y", "x<z"]);

    let body: Value = client
        .get(format!("{}/api/quiz/history/Tom%20%26%20Jerry", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["history"].as_array().unwrap().len(), 1);

    let body: Value = client
        .get(format!("{}/api/quiz/statistics", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["statistics"]["totalParticipants"], 3);
}

#[tokio::test]
async fn refresh_resets_the_competition() {
    let (address, store) = spawn_seeded_app().await;
    let client = reqwest::Client::new();
    let questions = fetch_quiz(&client, &address).await;

    for name in ["a", "b", "c"] {
        let answers = answer_sheet(&store, &questions, |c, _| c).await;
        submit(&client, &address, name, answers, 10).await;
    }

    let response = client
        .post(format!("{}/api/refresh", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["clearedResults"], 3);
    assert_eq!(body["data"]["clearedQuestions"], 20);
    assert_eq!(body["data"]["addedQuestions"], 20);
    assert!(body["data"]["durationMs"].is_u64());

    assert_eq!(store.count_results().await.unwrap(), 0);
    assert_eq!(store.count_questions().await.unwrap(), 20);

    // Old question ids no longer grade
    let stale: Vec<Value> = questions
        .iter()
        .map(|q| json!({ "questionId": q["id"], "selectedOption": 0 }))
        .collect();
    let response = submit(&client, &address, "late", stale, 10).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/openapi.json", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["paths"]["/api/quiz/submit"].is_object());
}
