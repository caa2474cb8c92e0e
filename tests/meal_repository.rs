use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use school_meal::{
    config::DatabaseConfig,
    db::{
        connection,
        dao::{DaoBase, DaoContext, DaoLayerError},
        entities::{
            meal::{self, MealComments},
            prelude::Meal as MealEntity,
        },
    },
    domain::{CreateMealStatus, Meal, MealName, MealRepository},
    logging::try_init_test_tracing,
};

const EDU_OFFICE: &str = "B10";
const SCHOOL: &str = "7010536";

async fn test_db() -> DatabaseConnection {
    try_init_test_tracing();
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_idle: 1,
        ..Default::default()
    };
    connection::connect(&cfg)
        .await
        .expect("in-memory database should connect")
}

async fn seeded() -> (DatabaseConnection, DaoContext) {
    let db = test_db().await;
    let daos = DaoContext::new(&db);
    daos.school_info()
        .create_school_info(EDU_OFFICE, SCHOOL)
        .await
        .expect("school info should insert");
    (db, daos)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).expect("date should be valid")
}

async fn meal_rows(db: &DatabaseConnection) -> u64 {
    MealEntity::find()
        .count(db)
        .await
        .expect("count should succeed")
}

#[tokio::test]
async fn get_by_code_is_empty_without_meals() {
    let (_db, daos) = seeded().await;

    let meals = daos
        .meal()
        .get_by_code(EDU_OFFICE, SCHOOL, day(2))
        .await
        .expect("query should succeed");
    assert!(meals.is_empty());

    let unknown = daos
        .meal()
        .get_by_code(EDU_OFFICE, "0000000", day(2))
        .await
        .expect("query should succeed");
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn create_by_code_rejects_unknown_school() {
    let (db, daos) = seeded().await;
    let meal = Meal::new(MealName::Lunch, "비빔밥", 712.4, day(2));

    let outcome = daos
        .meal()
        .create_by_code(EDU_OFFICE, "0000000", &meal)
        .await
        .expect("query should succeed");

    assert_eq!(outcome, Err(CreateMealStatus::SchoolInfoNotFound));
    assert_eq!(meal_rows(&db).await, 0);
}

#[tokio::test]
async fn created_meal_round_trips_through_get_by_id() {
    let (db, daos) = seeded().await;
    let meal = Meal::new(MealName::Dinner, "카레라이스<br/>깍두기", 803.1, day(3));

    let id = daos
        .meal()
        .create_by_code(EDU_OFFICE, SCHOOL, &meal)
        .await
        .expect("insert should succeed")
        .expect("school should exist");

    assert_eq!(meal_rows(&db).await, 1);
    let stored = daos
        .meal()
        .get_by_id(id)
        .await
        .expect("query should succeed")
        .expect("meal should exist");
    assert_eq!(stored, meal);
    assert!(stored.comments.is_empty());
}

#[tokio::test]
async fn get_by_code_only_returns_requested_date() {
    let (_db, daos) = seeded().await;
    let dao = daos.meal();
    for meal in [
        Meal::new(MealName::Breakfast, "누룽지", 420.0, day(2)),
        Meal::new(MealName::Lunch, "비빔밥", 712.4, day(2)),
        Meal::new(MealName::Lunch, "짜장면", 801.0, day(3)),
    ] {
        dao.create_by_code(EDU_OFFICE, SCHOOL, &meal)
            .await
            .expect("insert should succeed")
            .expect("school should exist");
    }

    let meals = dao
        .get_by_code(EDU_OFFICE, SCHOOL, day(2))
        .await
        .expect("query should succeed");
    let names: Vec<MealName> = meals.iter().map(|meal| meal.name).collect();
    assert_eq!(names, vec![MealName::Breakfast, MealName::Lunch]);
    assert!(meals.iter().all(|meal| meal.date == day(2)));
}

#[tokio::test]
async fn get_id_by_code_agrees_with_get_with_id_by_code() {
    let (_db, daos) = seeded().await;
    let dao = daos.meal();
    for meal in [
        Meal::new(MealName::Breakfast, "누룽지", 420.0, day(4)),
        Meal::new(MealName::Lunch, "비빔밥", 712.4, day(4)),
        Meal::new(MealName::Dinner, "카레", 803.1, day(4)),
    ] {
        dao.create_by_code(EDU_OFFICE, SCHOOL, &meal)
            .await
            .expect("insert should succeed")
            .expect("school should exist");
    }

    let listed = dao
        .get_with_id_by_code(EDU_OFFICE, SCHOOL, day(4))
        .await
        .expect("query should succeed");
    assert_eq!(listed.len(), 3);

    for (id, meal) in &listed {
        let resolved = dao
            .get_id_by_code(EDU_OFFICE, SCHOOL, day(4), meal.name)
            .await
            .expect("query should succeed");
        assert_eq!(resolved, Some(*id), "{}", meal.name);
    }

    let other_day = dao
        .get_id_by_code(EDU_OFFICE, SCHOOL, day(5), MealName::Lunch)
        .await
        .expect("query should succeed");
    assert!(other_day.is_none());
}

#[tokio::test]
async fn get_by_id_returns_none_for_unknown_id() {
    let (_db, daos) = seeded().await;

    let meal = daos
        .meal()
        .get_by_id(9_999)
        .await
        .expect("query should succeed");
    assert!(meal.is_none());
}

#[tokio::test]
async fn dao_find_by_id_reports_missing_rows() {
    let (_db, daos) = seeded().await;

    let err = daos
        .meal()
        .find_by_id(77)
        .await
        .expect_err("missing row should error");
    assert!(matches!(err, DaoLayerError::NotFound { id: 77, .. }));
}

#[tokio::test]
async fn failed_insert_rolls_back_and_releases_the_connection() {
    let (db, daos) = seeded().await;
    let dao = daos.meal();
    db.execute_unprepared(
        "CREATE TRIGGER reject_meal_insert BEFORE INSERT ON meals \
         BEGIN SELECT RAISE(ABORT, 'meals are closed'); END;",
    )
    .await
    .expect("trigger should be created");
    let meal = Meal::new(MealName::Lunch, "비빔밥", 712.4, day(6));

    let err = dao
        .create_by_code(EDU_OFFICE, SCHOOL, &meal)
        .await
        .expect_err("insert should be rejected");
    assert!(matches!(err, DaoLayerError::Db(_)), "{err:?}");
    assert_eq!(meal_rows(&db).await, 0);

    // The pool holds a single connection, so this only succeeds once the
    // failed transaction has handed it back.
    db.execute_unprepared("DROP TRIGGER reject_meal_insert;")
        .await
        .expect("trigger should be dropped");
    dao.create_by_code(EDU_OFFICE, SCHOOL, &meal)
        .await
        .expect("insert should succeed")
        .expect("school should exist");
    assert_eq!(meal_rows(&db).await, 1);
}

#[tokio::test]
async fn duplicate_school_codes_resolve_to_the_lowest_ids() {
    let (db, daos) = seeded().await;
    let first_school = daos
        .school_info()
        .find_id_by_code(&db, EDU_OFFICE, SCHOOL)
        .await
        .expect("query should succeed")
        .expect("school should exist");
    let second_school = daos
        .school_info()
        .create_school_info(EDU_OFFICE, SCHOOL)
        .await
        .expect("school info should insert")
        .id;
    assert!(first_school < second_school);

    let dao = daos.meal();
    let other = dao
        .create(meal::ActiveModel {
            school_info_id: Set(second_school),
            name: Set(MealName::Lunch),
            dish_name: Set("짜장면".to_string()),
            calorie: Set(801.0),
            date: Set(day(9)),
            comments: Set(MealComments::default()),
            ..Default::default()
        })
        .await
        .expect("meal should insert");

    let lunch = Meal::new(MealName::Lunch, "비빔밥", 712.4, day(9));
    let created = dao
        .create_by_code(EDU_OFFICE, SCHOOL, &lunch)
        .await
        .expect("insert should succeed")
        .expect("school should exist");
    let stored = MealEntity::find_by_id(created)
        .one(&db)
        .await
        .expect("query should succeed")
        .expect("meal should exist");
    assert_eq!(stored.school_info_id, first_school);

    let listed = dao
        .get_with_id_by_code(EDU_OFFICE, SCHOOL, day(9))
        .await
        .expect("query should succeed");
    let ids: Vec<i32> = listed.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![created, other.id]);

    let resolved = dao
        .get_id_by_code(EDU_OFFICE, SCHOOL, day(9), MealName::Lunch)
        .await
        .expect("query should succeed");
    assert_eq!(resolved, Some(other.id.min(created)));
}
