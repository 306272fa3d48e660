use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    dto::{
        attempt::CreateAttemptRequest,
        scenario::{CreateScenarioRequest, ScenarioFilter, UpdateScenarioRequest},
    },
    error::{Result, StorageError},
    models::{Checklist, Difficulty, Position, Scenario},
    repository::{attempt::AttemptRepository, scenario::ScenarioRepository},
    services::progress,
};
use uuid::Uuid;

fn scenario_request(title: &str, difficulty: Difficulty, category: &str) -> CreateScenarioRequest {
    CreateScenarioRequest {
        title: title.to_string(),
        description: format!("{} training lift", title),
        difficulty,
        category: category.to_string(),
        estimated_duration_minutes: 20,
        learning_objectives: vec![
            "Confirm crane capacity at radius".to_string(),
            "Set up outriggers on mats".to_string(),
        ],
        site_width: Decimal::new(400, 1),
        site_length: Decimal::new(605, 1),
        load_weight: Decimal::new(125, 1),
        load_height: Decimal::new(3, 0),
        load_fragile: false,
        passing_score: 70,
    }
}

fn attempt_request(
    user_id: Uuid,
    scenario_id: Uuid,
    score: Option<i32>,
    passed: bool,
) -> CreateAttemptRequest {
    CreateAttemptRequest {
        user_id,
        scenario_id,
        equipment_id: "ltm-1100".to_string(),
        selected_position: Position { x: 18.0, y: 7.5 },
        checklist: Checklist {
            capacity_checked: true,
            radius_checked: true,
            ..Default::default()
        },
        score,
        passed,
        time_taken_seconds: 240,
    }
}

async fn create_user(pool: &PgPool, email: &str) -> Result<Uuid> {
    let user_id =
        sqlx::query_scalar::<_, Uuid>("INSERT INTO users (email) VALUES ($1) RETURNING user_id")
            .bind(email)
            .fetch_one(pool)
            .await?;

    Ok(user_id)
}

fn titles(scenarios: Vec<Scenario>) -> Vec<String> {
    scenarios.into_iter().map(|s| s.title).collect()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at Postgres"]
async fn test_list_orders_by_difficulty_then_title(pool: PgPool) -> Result<()> {
    let repo = ScenarioRepository::new(&pool);
    for (title, difficulty, category) in [
        ("Tower crane erection", Difficulty::Advanced, "assembly"),
        ("Bridge beam", Difficulty::Advanced, "tandem"),
        ("Pallet of blocks", Difficulty::Beginner, "general"),
        ("Glass curtain panel", Difficulty::Intermediate, "fragile"),
        ("Air handling unit", Difficulty::Beginner, "rooftop"),
    ] {
        repo.create(&scenario_request(title, difficulty, category))
            .await?;
    }

    let listed = titles(repo.list(&ScenarioFilter::default()).await?);

    assert_eq!(
        listed,
        vec![
            "Air handling unit",
            "Pallet of blocks",
            "Glass curtain panel",
            "Bridge beam",
            "Tower crane erection",
        ]
    );
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at Postgres"]
async fn test_list_applies_filters_exactly(pool: PgPool) -> Result<()> {
    let repo = ScenarioRepository::new(&pool);
    repo.create(&scenario_request("Bridge beam", Difficulty::Advanced, "tandem"))
        .await?;
    repo.create(&scenario_request("Precast stair", Difficulty::Advanced, "rigging"))
        .await?;
    repo.create(&scenario_request("Skip bin", Difficulty::Beginner, "tandem"))
        .await?;

    let both = ScenarioFilter {
        difficulty: Some(Difficulty::Advanced),
        category: Some("tandem".to_string()),
    };
    assert_eq!(titles(repo.list(&both).await?), vec!["Bridge beam"]);

    let difficulty_only = ScenarioFilter {
        difficulty: Some(Difficulty::Advanced),
        category: None,
    };
    assert_eq!(
        titles(repo.list(&difficulty_only).await?),
        vec!["Bridge beam", "Precast stair"]
    );

    let category_only = ScenarioFilter {
        difficulty: None,
        category: Some("tandem".to_string()),
    };
    assert_eq!(
        titles(repo.list(&category_only).await?),
        vec!["Skip bin", "Bridge beam"]
    );

    let case_mismatch = ScenarioFilter {
        difficulty: None,
        category: Some("Tandem".to_string()),
    };
    assert!(repo.list(&case_mismatch).await?.is_empty());
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at Postgres"]
async fn test_create_then_find_round_trip(pool: PgPool) -> Result<()> {
    let repo = ScenarioRepository::new(&pool);
    let request = scenario_request("Generator set", Difficulty::Intermediate, "plant");

    let created = repo.create(&request).await?;
    let found = repo.find_by_id(created.scenario_id).await?;

    assert_eq!(found.title, "Generator set");
    assert_eq!(found.difficulty, Difficulty::Intermediate);
    assert_eq!(found.learning_objectives.0, request.learning_objectives);
    assert_eq!(found.site_length, Decimal::new(605, 1));
    assert_eq!(found.load_weight, Decimal::new(125, 1));
    assert_eq!(found.passing_score, 70);

    let missing = repo.find_by_id(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(StorageError::NotFound)));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at Postgres"]
async fn test_partial_update_keeps_other_fields(pool: PgPool) -> Result<()> {
    let repo = ScenarioRepository::new(&pool);
    let created = repo
        .create(&scenario_request("Steel truss", Difficulty::Beginner, "structural"))
        .await?;

    let update = UpdateScenarioRequest {
        passing_score: Some(85),
        difficulty: Some(Difficulty::Advanced),
        ..Default::default()
    };
    let updated = repo.update(&created, &update).await?;

    assert_eq!(updated.scenario_id, created.scenario_id);
    assert_eq!(updated.passing_score, 85);
    assert_eq!(updated.difficulty, Difficulty::Advanced);
    assert_eq!(updated.title, "Steel truss");
    assert_eq!(updated.category, "structural");
    assert_eq!(updated.site_width, created.site_width);
    assert!(updated.updated_at >= created.updated_at);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at Postgres"]
async fn test_attempt_for_unknown_scenario_is_constraint_violation(pool: PgPool) -> Result<()> {
    let user_id = create_user(&pool, "trainee@example.com").await?;
    let repo = AttemptRepository::new(&pool);

    let result = repo
        .create(&attempt_request(user_id, Uuid::new_v4(), Some(80), true))
        .await;

    match result {
        Err(StorageError::ConstraintViolation(message)) => {
            assert_eq!(message, "Referenced user or scenario does not exist");
        }
        other => panic!("expected constraint violation, got {:?}", other),
    }
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at Postgres"]
async fn test_attempt_for_unknown_user_is_constraint_violation(pool: PgPool) -> Result<()> {
    let scenario = ScenarioRepository::new(&pool)
        .create(&scenario_request("Boat lift", Difficulty::Intermediate, "marine"))
        .await?;

    let result = AttemptRepository::new(&pool)
        .create(&attempt_request(Uuid::new_v4(), scenario.scenario_id, None, false))
        .await;

    assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at Postgres"]
async fn test_recorded_attempts_feed_progress(pool: PgPool) -> Result<()> {
    let user_id = create_user(&pool, "operator@example.com").await?;
    let other_user = create_user(&pool, "someone-else@example.com").await?;
    let scenarios = ScenarioRepository::new(&pool);
    let first = scenarios
        .create(&scenario_request("Pallet of blocks", Difficulty::Beginner, "general"))
        .await?;
    let second = scenarios
        .create(&scenario_request("Bridge beam", Difficulty::Advanced, "tandem"))
        .await?;

    let attempts = AttemptRepository::new(&pool);
    let stored = attempts
        .create(&attempt_request(user_id, first.scenario_id, Some(80), true))
        .await?;
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.selected_position.0, Position { x: 18.0, y: 7.5 });
    assert!(stored.checklist.capacity_checked);

    attempts
        .create(&attempt_request(user_id, first.scenario_id, Some(95), true))
        .await?;
    attempts
        .create(&attempt_request(user_id, second.scenario_id, Some(60), false))
        .await?;
    attempts
        .create(&attempt_request(other_user, second.scenario_id, Some(100), true))
        .await?;

    let listed = attempts.list_for_user(user_id, None).await?;
    assert_eq!(listed.len(), 3);
    for row in &listed {
        let expected = if row.attempt.scenario_id == first.scenario_id { 2 } else { 1 };
        assert_eq!(row.scenario_attempt_count, expected);
    }
    assert!(
        listed
            .windows(2)
            .all(|w| w[0].attempt.completed_at >= w[1].attempt.completed_at)
    );

    let for_first = attempts
        .list_for_user(user_id, Some(first.scenario_id))
        .await?;
    assert_eq!(for_first.len(), 2);
    assert!(for_first.iter().all(|a| a.scenario_title == "Pallet of blocks"));

    let summary = progress::summarize(listed);
    assert_eq!(summary.total_attempts, 3);
    assert_eq!(summary.passed_attempts, 2);
    assert_eq!(summary.average_score, 78);
    assert_eq!(summary.best_score, 95);
    assert_eq!(summary.by_difficulty.beginner.len(), 2);
    assert_eq!(summary.by_difficulty.advanced.len(), 1);

    let nobody = attempts.list_for_user(Uuid::new_v4(), None).await?;
    assert_eq!(progress::summarize(nobody).total_attempts, 0);
    Ok(())
}
