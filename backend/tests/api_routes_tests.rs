//! End-to-end tests for the REST API over the in-memory repository.

#![cfg(feature = "http-server")]

mod support;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Utc;
use serde_json::{json, Value};

use support::app::{seeded_app, signer};

fn student_body(name: &str) -> Value {
    json!({
        "name": name,
        "age": 4,
        "interests": ["Puzzles", " ", "Music "],
        "allergies": [],
        "parent_name": "Ana Ruiz",
        "parent_email": "ana@example.com"
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = seeded_app().await;
    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_login_and_me() {
    let app = seeded_app().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "demo", "password": "demo"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let (status, me) = app.get("/api/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "demo");
    assert_eq!(me["name"], "Demo Teacher");
    assert_eq!(me["school"], "Montessori Academy");
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = seeded_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username":"demo","password":"nope"}"#))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_protected_routes_reject_bad_tokens() {
    let app = seeded_app().await;

    let (status, body) = app.send(Method::GET, "/api/students", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let token = app.login("demo", "demo").await;
    let signature_start = token.rfind('.').unwrap() + 1;
    let mut tampered = token.clone();
    let replacement = if token[signature_start..].starts_with('A') { "B" } else { "A" };
    tampered.replace_range(signature_start..signature_start + 1, replacement);
    let (status, _) = app.get("/api/students", &tampered).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let demo = app.user_id("demo").await;
    let expired = signer()
        .issue_at(demo, Utc::now().timestamp() - 2 * 3600)
        .unwrap();
    let (status, _) = app.get("/api/students", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/students", "not-a-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_crud() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (status, created) = app.post("/api/students", &token, student_body("Mia Ruiz")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["interests"], json!(["Puzzles", "Music"]));
    let id = created["id"].as_i64().unwrap();

    let (status, students) = app.get("/api/students", &token).await;
    assert_eq!(status, StatusCode::OK);
    let listed = students
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == id)
        .unwrap();
    assert_eq!(listed, &created);

    let mut update = student_body("Mia Ruiz");
    update["age"] = json!(5);
    let (status, updated) = app
        .put(&format!("/api/students/{}", id), &token, update)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["age"], 5);

    let (status, _) = app.delete(&format!("/api/students/{}", id), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&format!("/api/students/{}", id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_users_rows_are_not_found() {
    let app = seeded_app().await;
    let demo = app.login("demo", "demo").await;
    let other = app.login("other", "other").await;

    let (_, students) = app.get("/api/students", &demo).await;
    let emma = students[0]["id"].as_i64().unwrap();

    let (status, list) = app.get("/api/students", &other).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, body) = app
        .put(&format!("/api/students/{}", emma), &other, student_body("Hijack"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.get(&format!("/api/reports/students/{}", emma), &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_student_removes_their_records() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (_, observations) = app.get("/api/observations", &token).await;
    let before = observations.as_array().unwrap().len();

    let (_, students) = app.get("/api/students", &token).await;
    let emma = students
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Emma Johnson")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, _) = app
        .post(
            "/api/daily-entries",
            &token,
            json!({
                "student": "Emma Johnson",
                "date": "2026-02-09",
                "subject": "Math",
                "activities": ["Golden beads"],
                "skill_level": "Developing"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    app.delete(&format!("/api/students/{}", emma), &token).await;

    let (_, observations) = app.get("/api/observations", &token).await;
    let observations = observations.as_array().unwrap();
    assert_eq!(observations.len(), before - 1);
    assert!(observations.iter().all(|o| o["student"] != "Emma Johnson"));
    let (_, entries) = app.get("/api/daily-entries", &token).await;
    assert_eq!(entries, json!([]));
}

#[tokio::test]
async fn test_observation_errors() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let body = json!({
        "student": "Nobody Here",
        "date": "2026-02-13",
        "area": "Art",
        "skills": ["Focus"],
        "notes": ""
    });
    let (status, error) = app.post("/api/observations", &token, body.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    // A missing id wins over an unknown student name.
    let (status, _) = app.put("/api/observations/9999", &token, body.clone()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut valid = body;
    valid["student"] = json!("Liam Chen");
    let (status, _) = app.put("/api/observations/9999", &token, valid.clone()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, created) = app.post("/api/observations", &token, valid).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["student"], "Liam Chen");

    let (_, list) = app.get("/api/observations", &token).await;
    assert_eq!(list[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/students")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = app.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    // Missing required field.
    let (status, _) = app.post("/api/students", &token, json!({"age": 3})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown weekday.
    let (status, _) = app
        .post(
            "/api/schedule",
            &token,
            json!({"day": "Someday", "time": "9:00 AM", "activity": "Circle", "duration": 15}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_crud() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (status, entry) = app
        .post(
            "/api/schedule",
            &token,
            json!({"day": "monday", "time": "2:00 PM", "activity": "Story Time", "duration": 20}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["day"], "Monday");
    assert_eq!(entry["students"], "All");

    let (_, schedule) = app.get("/api/schedule", &token).await;
    let days: Vec<&str> = schedule
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["day"].as_str().unwrap())
        .collect();
    assert_eq!(days.len(), 16);
    assert_eq!(days[4], "Monday");
    assert_eq!(days[5], "Tuesday");

    let id = entry["id"].as_i64().unwrap();
    let (status, _) = app
        .put(
            &format!("/api/schedule/{}", id),
            &token,
            json!({"day": "Friday", "time": "2:00 PM", "activity": "Story Time", "duration": 0}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete(&format!("/api/schedule/{}", id), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_material_use_increments_by_one() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (status, material) = app
        .post(
            "/api/materials",
            &token,
            json!({"name": "Knobbed Cylinders", "category": "Sensorial"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(material["times_used"], 0);
    assert_eq!(material["in_stock"], true);
    let id = material["id"].as_i64().unwrap();

    for expected in 1..=3 {
        let (status, used) = app
            .send(
                Method::POST,
                &format!("/api/materials/{}/use", id),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(used["times_used"], expected);
    }

    let (status, _) = app
        .send(Method::POST, "/api/materials/9999/use", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settings_round_trip() {
    let app = seeded_app().await;
    let token = app.login("other", "other").await;

    let (status, body) = app.get("/api/settings", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"settings": {}}));

    let settings = json!({"settings": {"appearance": {"theme": "dark"}}});
    let (status, saved) = app.put("/api/settings", &token, settings.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved, settings);
    let (_, fetched) = app.get("/api/settings", &token).await;
    assert_eq!(fetched, settings);

    let (status, _) = app
        .put("/api/settings", &token, json!({"settings": [1, 2]}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (status, body) = app
        .post("/api/chat", &token, json!({"message": "Help me plan a lesson"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().unwrap().contains("lesson"));

    let (status, _) = app.post("/api/chat", &token, json!({"message": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (status, body) = app.get("/api/dashboard", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student_count"], 6);
    assert_eq!(body["observation_count"], 5);
    assert_eq!(body["daily_entry_count"], 0);
    assert_eq!(body["material_uses"], 45 + 38 + 32 + 67 + 52 + 28);
    let recent = body["recent_observations"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["student"], "Ava Thompson");
}

#[tokio::test]
async fn test_student_report() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;
    let (_, students) = app.get("/api/students", &token).await;
    let emma = students[0]["id"].as_i64().unwrap();

    let (status, report) = app
        .get(&format!("/api/reports/students/{}", emma), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["filename"], "report_Emma_Johnson.txt");
    let content = report["content"].as_str().unwrap();
    assert!(content.contains("Student: Emma Johnson"));
    assert!(content.contains("- Peanuts"));
    assert!(content.contains("Area: Practical Life"));
}

#[tokio::test]
async fn test_newsletters() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;
    let (_, students) = app.get("/api/students", &token).await;
    let liam = students
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Liam Chen")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    for (date, subject) in [("2026-02-09", "Math"), ("2026-02-11", "Language")] {
        let (status, _) = app
            .post(
                "/api/daily-entries",
                &token,
                json!({
                    "student": "Liam Chen",
                    "date": date,
                    "subject": subject,
                    "activities": ["Work cycle"],
                    "skill_level": "Proficient",
                    "notes": "Focused"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, letter) = app
        .get(
            &format!("/api/reports/newsletter?student={}&date=2026-02-12", liam),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(letter["week_start"], "2026-02-09");
    assert_eq!(letter["week_end"], "2026-02-15");
    assert_eq!(letter["filename"], "newsletter_liam_chen_20260209.md");
    assert!(letter["content"]
        .as_str()
        .unwrap()
        .contains("- Proficient: 2 sessions"));

    let (status, class) = app
        .get(
            "/api/reports/newsletter/class?date=2026-02-19&week_offset=-1",
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(class["content"]
        .as_str()
        .unwrap()
        .contains("**Total Entries This Week:** 2"));

    let (status, _) = app
        .get("/api/reports/newsletter/class?date=2026-02-12&week_offset=-1", &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get("/api/reports/newsletter/class?week_offset=1", &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .get("/api/reports/newsletter/class?week_offset=-53", &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_material_counter_stays_in_range() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;
    let (_, materials) = app.get("/api/materials", &token).await;
    let first = &materials[0];
    let uri = format!("/api/materials/{}", first["id"]);

    let mut update = json!({
        "name": first["name"],
        "category": first["category"],
        "age_range": first["age_range"],
        "description": first["description"],
        "in_stock": true,
        "times_used": i32::MAX
    });
    let (status, error) = app.put(&uri, &token, update.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    update["times_used"] = json!(1_000_000);
    let (status, _) = app.put(&uri, &token, update).await;
    assert_eq!(status, StatusCode::OK);
    let (status, used) = app
        .send(Method::POST, &format!("{}/use", uri), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(used["times_used"], 1_000_001);
}

#[tokio::test]
async fn test_newsletter_at_calendar_edges_is_bad_request() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    for uri in [
        "/api/reports/newsletter/class?date=%2B262142-12-31",
        "/api/reports/newsletter/class?date=-262143-01-05&week_offset=-52",
        "/api/reports/newsletter?student=1&date=%2B262142-12-31",
    ] {
        let (status, error) = app.get(uri, &token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(error["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_material_stats_and_filters() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (status, stats) = app.get("/api/materials/stats", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_materials"], 6);
    assert_eq!(stats["total_uses"], 45 + 38 + 32 + 67 + 52 + 28);
    assert_eq!(stats["in_stock"], 6);
    assert_eq!(
        stats["by_category"],
        json!([
            {"category": "Language", "materials": 2, "uses": 67 + 28},
            {"category": "Mathematics", "materials": 1, "uses": 52},
            {"category": "Sensorial", "materials": 3, "uses": 45 + 38 + 32}
        ])
    );
    let most_used: Vec<&str> = stats["most_used"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        most_used,
        ["Movable Alphabet", "Number Rods", "Pink Tower", "Brown Stairs", "Red Rods"]
    );

    let (_, sensorial) = app.get("/api/materials?category=Sensorial", &token).await;
    assert_eq!(sensorial.as_array().unwrap().len(), 3);
    let (_, letters) = app.get("/api/materials?q=LETTERS", &token).await;
    let names: Vec<&str> = letters
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Movable Alphabet", "Sandpaper Letters"]);
    let (_, all) = app.get("/api/materials?category=All&q=", &token).await;
    assert_eq!(all.as_array().unwrap().len(), 6);

    // The other account sees an empty library.
    let other = app.login("other", "other").await;
    let (_, empty) = app.get("/api/materials/stats", &other).await;
    assert_eq!(empty["total_materials"], 0);
    assert_eq!(empty["most_used"], json!([]));
}

#[tokio::test]
async fn test_observation_filters() {
    let app = seeded_app().await;
    let token = app.login("demo", "demo").await;

    let (status, art) = app.get("/api/observations?area=Art", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(art.as_array().unwrap().len(), 1);
    assert_eq!(art[0]["student"], "Ava Thompson");

    let (_, pink) = app.get("/api/observations?q=pink%20tower", &token).await;
    assert_eq!(pink.as_array().unwrap().len(), 1);
    assert_eq!(pink[0]["student"], "Liam Chen");

    let (_, emma) = app
        .get("/api/observations?student=Emma%20Johnson", &token)
        .await;
    assert_eq!(emma.as_array().unwrap().len(), 1);

    let (_, none) = app
        .get("/api/observations?student=Liam%20Chen&area=Art", &token)
        .await;
    assert_eq!(none, json!([]));

    let (_, everything) = app.get("/api/observations", &token).await;
    assert_eq!(everything.as_array().unwrap().len(), 5);
}
