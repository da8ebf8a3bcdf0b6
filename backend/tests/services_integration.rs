//! Service-layer flows over the seeded demo data.

use chrono::NaiveDate;

use monty::api::*;
use monty::db::repositories::LocalRepository;
use monty::db::repository::{RepositoryError, UserRepository};
use monty::db::{seed_demo_data, services};
use monty::services::{dashboard, newsletter, reports};

async fn seeded() -> (LocalRepository, UserId) {
    let repo = LocalRepository::new();
    seed_demo_data(&repo).await.unwrap();
    let user = repo.find_user_by_username("demo").await.unwrap().unwrap().id;
    (repo, user)
}

fn entry(student: &str, date: &str, subject: &str, level: &str) -> DailyEntryInput {
    DailyEntryInput {
        student: student.into(),
        date: date.parse().unwrap(),
        subject: subject.into(),
        activities: vec!["Practice".into(), " ".into()],
        skill_level: level.into(),
        notes: String::new(),
    }
}

#[tokio::test]
async fn test_authenticate_demo_user() {
    let (repo, user) = seeded().await;
    let found = services::authenticate(&repo, "demo", "demo").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user));
    assert!(services::authenticate(&repo, "demo", "Demo")
        .await
        .unwrap()
        .is_none());
    assert!(services::authenticate(&repo, "ghost", "demo")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_daily_entry_flow() {
    let (repo, user) = seeded().await;
    let created = services::create_daily_entry(
        &repo,
        user,
        &entry("Olivia Martinez", "2026-02-09", "Language", "Advanced"),
    )
    .await
    .unwrap();
    assert_eq!(created.student, "Olivia Martinez");
    assert_eq!(created.activities, vec!["Practice".to_string()]);

    let err = services::create_daily_entry(&repo, user, &entry("Olivia Martinez", "2026-02-09", "Language", " "))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let moved = services::update_daily_entry(
        &repo,
        user,
        created.id,
        &entry("Noah Williams", "2026-02-10", "Math", "Emerging"),
    )
    .await
    .unwrap();
    assert_eq!(moved.student, "Noah Williams");
    assert_eq!(moved.id, created.id);

    services::delete_daily_entry(&repo, user, created.id)
        .await
        .unwrap();
    let err = services::delete_daily_entry(&repo, user, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_material_update_rejects_negative_usage() {
    let (repo, user) = seeded().await;
    let materials = services::list_materials(&repo, user).await.unwrap();
    let tower = &materials[0];
    let err = services::update_material(
        &repo,
        user,
        tower.id,
        &MaterialUpdate {
            name: tower.name.clone(),
            category: tower.category.clone(),
            age_range: tower.age_range.clone(),
            description: tower.description.clone(),
            in_stock: false,
            times_used: -1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let used = services::use_material(&repo, user, tower.id).await.unwrap();
    assert_eq!(used.times_used, tower.times_used + 1);
}

#[tokio::test]
async fn test_material_update_caps_usage_counter() {
    let (repo, user) = seeded().await;
    let tower = services::list_materials(&repo, user).await.unwrap()[0].clone();
    let update = |times_used| MaterialUpdate {
        name: tower.name.clone(),
        category: tower.category.clone(),
        age_range: tower.age_range.clone(),
        description: tower.description.clone(),
        in_stock: true,
        times_used,
    };

    let err = services::update_material(&repo, user, tower.id, &update(i32::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let at_cap = services::update_material(
        &repo,
        user,
        tower.id,
        &update(services::MAX_TIMES_USED),
    )
    .await
    .unwrap();
    let used = services::use_material(&repo, user, at_cap.id).await.unwrap();
    assert_eq!(used.times_used, services::MAX_TIMES_USED + 1);
}

#[tokio::test]
async fn test_update_missing_entry_with_unknown_student_is_not_found() {
    let (repo, user) = seeded().await;
    let err = services::update_daily_entry(
        &repo,
        user,
        DailyEntryId(9_999),
        &entry("Nobody", "2026-02-10", "Math", "Emerging"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let obs = ObservationInput {
        student: "Nobody".into(),
        date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        area: "Language".into(),
        skills: vec![],
        notes: String::new(),
    };
    let err = services::update_observation(&repo, user, ObservationId(9_999), &obs)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    // An existing entry with an unknown student is still a body error.
    let created = services::create_daily_entry(
        &repo,
        user,
        &entry("Emma Johnson", "2026-02-10", "Math", "Emerging"),
    )
    .await
    .unwrap();
    let err = services::update_daily_entry(
        &repo,
        user,
        created.id,
        &entry("Nobody", "2026-02-10", "Math", "Emerging"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_dashboard_todays_schedule() {
    let (repo, user) = seeded().await;
    // 2026-02-11 is a Wednesday.
    let wednesday = NaiveDate::from_ymd_opt(2026, 2, 11).unwrap();
    let summary = dashboard::summary(&repo, user, wednesday).await.unwrap();
    assert_eq!(summary.today, Weekday::Wednesday);
    let activities: Vec<&str> = summary
        .todays_schedule
        .iter()
        .map(|e| e.activity.as_str())
        .collect();
    assert_eq!(activities, vec!["Morning Circle", "Art & Creativity"]);

    let sunday = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
    let summary = dashboard::summary(&repo, user, sunday).await.unwrap();
    assert!(summary.todays_schedule.is_empty());
}

#[tokio::test]
async fn test_reports_and_newsletters() {
    let (repo, user) = seeded().await;
    let students = services::list_students(&repo, user).await.unwrap();
    let noah = students.iter().find(|s| s.name == "Noah Williams").unwrap();

    let report = reports::student_report(&repo, user, noah.id).await.unwrap();
    assert_eq!(report.student_name, "Noah Williams");
    assert!(report.content.contains("ALLERGIES\n---------\nNone reported\n"));
    assert!(report.content.contains("Skills: Counting, Quantity/Symbol"));

    let anchor = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
    let err = newsletter::student_newsletter(&repo, user, noah.id, anchor, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    services::create_daily_entry(&repo, user, &entry("Noah Williams", "2026-02-13", "Math", "Proficient"))
        .await
        .unwrap();
    services::create_daily_entry(&repo, user, &entry("Emma Johnson", "2026-02-13", "Art", "Developing"))
        .await
        .unwrap();

    let letter = newsletter::student_newsletter(&repo, user, noah.id, anchor, 0)
        .await
        .unwrap();
    assert!(letter.content.contains("**Parent:** James Williams"));
    assert!(letter.content.contains("- **Friday, Feb 13**: Practice (Proficient)"));

    let class = newsletter::whole_class_newsletter(&repo, user, anchor, 0)
        .await
        .unwrap();
    let emma = class.content.find("### Emma Johnson").unwrap();
    let noah_pos = class.content.find("### Noah Williams").unwrap();
    assert!(emma < noah_pos);
    assert!(class.content.contains("- Art: 1 sessions\n- Math: 1 sessions\n"));
}
