use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use std::sync::{Arc, Barrier};
use std::thread;
use training_planner::core::auth::DbAuthorizer;
use training_planner::core::{AssignLogic, AvailabilityLogic, GenerateLogic, TrainerLogic};
use training_planner::db::pool::DbPool;
use training_planner::db::{availability, log, plans, sessions, trainers};
use training_planner::errors::AppError;
use training_planner::export::ExportLogic;
use training_planner::models::{AvailabilityStatus, GenerationResult, NewSession};
use training_planner::utils::date::month_bounds;

mod common;
use common::{open_pool, setup_test_db};

const HALL: &str = "Sporthalle Gymnasium, Tettnang";

fn month_sessions(pool: &DbPool, year: i32, month: u32) -> Vec<training_planner::models::Session> {
    let (first, last) = month_bounds(year, month).unwrap();
    sessions::load_in_range(&pool.conn, first, last).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn generates_april_from_summer_template() {
    let mut pool = open_pool(&setup_test_db("core_generate_april"));

    let res = GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();
    assert_eq!(res, GenerationResult::Generated { sessions: 20 });

    let list = month_sessions(&pool, 2024, 4);
    assert_eq!(list.len(), 20);

    let first_day: Vec<_> = list.iter().filter(|s| s.date.day() == 3).collect();
    assert_eq!(first_day.len(), 2);
    assert_eq!(first_day[0].start_time, hm(17, 30));
    assert_eq!(first_day[0].topic, "Jugend-Training");
    assert_eq!(first_day[1].start_time, hm(19, 30));
    assert_eq!(first_day[1].end_time, Some(hm(22, 0)));
    assert_eq!(first_day[1].topic, "Freies Spiel");

    assert!(list.iter().all(|s| s.location == HALL));
    assert!(list.iter().all(|s| s.assigned_trainer_id.is_none() && !s.assignment_confirmed));
    assert!(
        list.iter()
            .all(|s| matches!(s.date.weekday(), Weekday::Wed | Weekday::Fri | Weekday::Sat))
    );

    let plan = plans::find_plan(&pool.conn, 2024, 4).unwrap().expect("plan created");
    assert!(!plan.is_published);
}

#[test]
fn generates_winter_month() {
    let mut pool = open_pool(&setup_test_db("core_generate_november"));

    let res = GenerateLogic::apply(&mut pool, 2024, 11, HALL).unwrap();
    assert_eq!(res, GenerationResult::Generated { sessions: 19 });

    let list = month_sessions(&pool, 2024, 11);
    let friday: Vec<_> = list.iter().filter(|s| s.date.day() == 1).collect();
    assert_eq!(friday.len(), 2);
    assert_eq!((friday[0].start_time, friday[0].end_time), (hm(17, 0), Some(hm(19, 0))));
    assert_eq!((friday[1].start_time, friday[1].end_time), (hm(20, 30), Some(hm(22, 15))));

    let wednesday: Vec<_> = list.iter().filter(|s| s.date.day() == 6).collect();
    assert_eq!(wednesday.len(), 1);
    assert_eq!(wednesday[0].start_time, hm(20, 0));
    assert_eq!(wednesday[0].topic, "Freies Spiel");
}

#[test]
fn second_generation_is_a_noop() {
    let mut pool = open_pool(&setup_test_db("core_generate_twice"));

    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();
    let again = GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    assert_eq!(again, GenerationResult::AlreadyExists);
    assert_eq!(month_sessions(&pool, 2024, 4).len(), 20);
    assert_eq!(plans::list_plans(&pool.conn).unwrap().len(), 1);
}

#[test]
fn any_existing_session_blocks_generation() {
    let mut pool = open_pool(&setup_test_db("core_generate_blocked"));

    sessions::insert_session(
        &pool.conn,
        &NewSession {
            date: NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
            start_time: hm(18, 0),
            end_time: None,
            location: HALL.into(),
            topic: "Sondertraining".into(),
        },
    )
    .unwrap();

    let res = GenerateLogic::apply(&mut pool, 2024, 5, HALL).unwrap();
    assert_eq!(res, GenerationResult::AlreadyExists);
    assert_eq!(month_sessions(&pool, 2024, 5).len(), 1);
}

#[test]
fn concurrent_generation_creates_one_set() {
    let db_path = setup_test_db("core_generate_concurrent");
    drop(open_pool(&db_path));

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let db_path = db_path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut pool = DbPool::new(&db_path).unwrap();
                barrier.wait();
                GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let generated = results
        .iter()
        .filter(|r| matches!(r, GenerationResult::Generated { .. }))
        .count();
    assert_eq!(generated, 1);

    let pool = open_pool(&db_path);
    assert_eq!(month_sessions(&pool, 2024, 4).len(), 20);
    assert_eq!(plans::list_plans(&pool.conn).unwrap().len(), 1);
}

#[test]
fn generation_stays_inside_february() {
    let mut pool = open_pool(&setup_test_db("core_generate_feb"));

    GenerateLogic::apply(&mut pool, 2024, 2, HALL).unwrap();
    GenerateLogic::apply(&mut pool, 2023, 2, HALL).unwrap();

    let feb24 = month_sessions(&pool, 2024, 2);
    let feb23 = month_sessions(&pool, 2023, 2);
    assert_eq!(feb24.len(), 16);
    assert_eq!(feb23.len(), 16);
    assert!(feb24.iter().all(|s| s.date.year() == 2024 && s.date.month() == 2));
    assert!(feb23.iter().all(|s| s.date.year() == 2023 && s.date.month() == 2));
}

#[test]
fn leap_day_gets_its_sessions() {
    let mut pool = open_pool(&setup_test_db("core_generate_leap"));

    GenerateLogic::apply(&mut pool, 2020, 2, HALL).unwrap();

    let leap: Vec<_> = month_sessions(&pool, 2020, 2)
        .into_iter()
        .filter(|s| s.date.day() == 29)
        .collect();
    assert_eq!(leap.len(), 1);
    assert_eq!(leap[0].start_time, hm(10, 0));
    assert_eq!(leap[0].topic, "Jugend-Training");
}

#[test]
fn invalid_month_writes_nothing() {
    let mut pool = open_pool(&setup_test_db("core_generate_invalid"));

    assert!(matches!(
        GenerateLogic::apply(&mut pool, 2024, 13, HALL),
        Err(AppError::InvalidMonth(13))
    ));
    assert!(matches!(
        GenerateLogic::apply(&mut pool, 2024, 0, HALL),
        Err(AppError::InvalidMonth(0))
    ));
    assert!(plans::list_plans(&pool.conn).unwrap().is_empty());
}

#[test]
fn assignment_and_confirmation() {
    let mut pool = open_pool(&setup_test_db("core_assign"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    assert!(AssignLogic::assign_trainer(&mut pool, 1, Some(7)).unwrap());

    // somebody else cannot confirm
    assert!(!AssignLogic::confirm_assignment(&mut pool, 8, 1).unwrap());
    let s = sessions::find_session(&pool.conn, 1).unwrap().unwrap();
    assert!(!s.assignment_confirmed);

    assert!(AssignLogic::confirm_assignment(&mut pool, 7, 1).unwrap());
    let s = sessions::find_session(&pool.conn, 1).unwrap().unwrap();
    assert!(s.is_confirmed());

    // clearing keeps the stored flag but the session no longer counts as confirmed
    assert!(AssignLogic::assign_trainer(&mut pool, 1, None).unwrap());
    let s = sessions::find_session(&pool.conn, 1).unwrap().unwrap();
    assert_eq!(s.assigned_trainer_id, None);
    assert!(s.assignment_confirmed);
    assert!(!s.is_confirmed());

    // missing sessions are no-ops
    assert!(!AssignLogic::assign_trainer(&mut pool, 999, Some(7)).unwrap());
    assert!(!AssignLogic::confirm_assignment(&mut pool, 7, 999).unwrap());
}

#[test]
fn batch_assignment_publishes_in_one_go() {
    let mut pool = open_pool(&setup_test_db("core_assign_batch"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    let (updated, published) =
        AssignLogic::save_assignments(&mut pool, &[(1, Some(2)), (2, Some(3)), (999, Some(2))], Some((2024, 4)))
            .unwrap();
    assert_eq!(updated, 2);
    assert!(published);
    assert!(plans::find_plan(&pool.conn, 2024, 4).unwrap().unwrap().is_published);
}

#[test]
fn batch_assignment_reports_missing_plan() {
    let mut pool = open_pool(&setup_test_db("core_assign_batch_no_plan"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    let (updated, published) =
        AssignLogic::save_assignments(&mut pool, &[(1, Some(2))], Some((2030, 1))).unwrap();
    assert_eq!(updated, 1);
    assert!(!published);
    assert!(plans::find_plan(&pool.conn, 2030, 1).unwrap().is_none());
    assert!(!plans::find_plan(&pool.conn, 2024, 4).unwrap().unwrap().is_published);
}

#[test]
fn publishing_is_idempotent() {
    let mut pool = open_pool(&setup_test_db("core_publish"));

    assert!(!AssignLogic::publish_plan(&mut pool, 2024, 4).unwrap());

    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();
    assert!(AssignLogic::publish_plan(&mut pool, 2024, 4).unwrap());
    assert!(AssignLogic::publish_plan(&mut pool, 2024, 4).unwrap());
    assert!(plans::find_plan(&pool.conn, 2024, 4).unwrap().unwrap().is_published);
}

#[test]
fn availability_is_one_row_per_user_and_session() {
    let mut pool = open_pool(&setup_test_db("core_availability_upsert"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    AvailabilityLogic::submit(&mut pool, 2, [(1, "Yes")], Some("gern")).unwrap();
    AvailabilityLogic::submit(&mut pool, 2, [(1, "No")], None).unwrap();

    assert_eq!(availability::count_for(&pool.conn, 2, 1).unwrap(), 1);
    let entry = availability::find_entry(&pool.conn, 2, 1).unwrap().unwrap();
    assert_eq!(entry.status, AvailabilityStatus::No);
    assert_eq!(entry.comment, "gern");
}

#[test]
fn unknown_statuses_are_skipped() {
    let mut pool = open_pool(&setup_test_db("core_availability_invalid"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    let report = AvailabilityLogic::submit(
        &mut pool,
        2,
        vec![(1, "Maybe".to_string()), (2, "Bogus".to_string()), (3, "yes".to_string())],
        None,
    )
    .unwrap();

    assert_eq!(report.saved, 1);
    assert_eq!(report.skipped, vec![2, 3]);
    assert!(availability::find_entry(&pool.conn, 2, 2).unwrap().is_none());
    assert!(availability::find_entry(&pool.conn, 2, 3).unwrap().is_none());

    let mine = AvailabilityLogic::entries_for_month(&pool, 2, 2024, 4).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, AvailabilityStatus::Maybe);
}

#[test]
fn submitting_marks_the_survey_month() {
    let mut pool = open_pool(&setup_test_db("core_availability_survey"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    assert!(!AvailabilityLogic::has_submitted(&pool, 2, 2024, 4).unwrap());
    AvailabilityLogic::submit(&mut pool, 2, [(5, "Yes")], None).unwrap();
    assert!(AvailabilityLogic::has_submitted(&pool, 2, 2024, 4).unwrap());
    assert!(!AvailabilityLogic::has_submitted(&pool, 3, 2024, 4).unwrap());
    assert_eq!(availability::submitted_users(&pool.conn, 2024, 4).unwrap(), vec![2]);
}

#[test]
fn session_overview_resolves_names() {
    let mut pool = open_pool(&setup_test_db("core_availability_overview"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();

    AvailabilityLogic::submit(&mut pool, 2, [(1, "Yes")], None).unwrap();
    AvailabilityLogic::submit(&mut pool, 5, [(1, "Maybe")], None).unwrap();

    let votes = AvailabilityLogic::overview_for_session(&pool, 1, |id| {
        (id == 2).then(|| "Anna Muster".to_string())
    })
    .unwrap();

    assert_eq!(votes.len(), 2);
    assert_eq!(votes[0].name, "Anna Muster");
    assert_eq!(votes[0].status, AvailabilityStatus::Yes);
    assert_eq!(votes[1].name, "#5");
}

#[test]
fn deleting_a_session_keeps_its_votes() {
    let mut pool = open_pool(&setup_test_db("core_delete_session"));
    GenerateLogic::apply(&mut pool, 2024, 4, HALL).unwrap();
    AvailabilityLogic::submit(&mut pool, 2, [(1, "Yes")], None).unwrap();

    assert!(AssignLogic::delete_session(&mut pool, 1).unwrap());
    assert!(!AssignLogic::delete_session(&mut pool, 1).unwrap());
    assert!(sessions::find_session(&pool.conn, 1).unwrap().is_none());
    assert_eq!(month_sessions(&pool, 2024, 4).len(), 19);

    assert_eq!(availability::count_orphans(&pool.conn).unwrap(), 1);
    assert_eq!(availability::delete_orphans(&pool.conn).unwrap(), 1);
    assert_eq!(availability::count_orphans(&pool.conn).unwrap(), 0);
}

#[test]
fn ics_export_contains_only_assigned_sessions() {
    let mut pool = open_pool(&setup_test_db("core_export"));
    let anna = trainers::insert_trainer(&pool.conn, "Anna Muster", false).unwrap();

    let id = sessions::insert_session(
        &pool.conn,
        &NewSession {
            date: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
            start_time: hm(19, 0),
            end_time: None,
            location: HALL.into(),
            topic: "Test".into(),
        },
    )
    .unwrap();
    sessions::insert_session(
        &pool.conn,
        &NewSession {
            date: NaiveDate::from_ymd_opt(2024, 4, 6).unwrap(),
            start_time: hm(10, 0),
            end_time: Some(hm(12, 0)),
            location: HALL.into(),
            topic: "Offen".into(),
        },
    )
    .unwrap();
    AssignLogic::assign_trainer(&mut pool, id, Some(anna)).unwrap();

    let names = DbAuthorizer::load(&pool, None).unwrap();
    let doc = ExportLogic::export_ics(&pool, &names, 2024, 4, None).unwrap();

    assert_eq!(doc.file_name, "training_plan_2024_4.ics");
    assert_eq!(doc.content_type, "text/calendar");
    assert_eq!(doc.events, 1);

    let text = String::from_utf8(doc.bytes).unwrap();
    assert_eq!(text.matches("BEGIN:VEVENT").count(), 1);
    assert!(text.contains("DTSTART;TZID=Europe/Berlin:20240405T190000\r\n"));
    assert!(text.contains("DTEND;TZID=Europe/Berlin:20240405T210000\r\n"));
    assert!(text.contains("SUMMARY:Training: Anna Muster\r\n"));
    assert!(!text.contains("Thema: Offen"));
}

#[test]
fn ics_export_of_empty_month_is_a_valid_calendar() {
    let pool = open_pool(&setup_test_db("core_export_empty"));
    let names = DbAuthorizer::load(&pool, None).unwrap();

    let doc = ExportLogic::export_ics(&pool, &names, 2024, 12, Some("Training")).unwrap();
    let text = String::from_utf8(doc.bytes).unwrap();

    assert_eq!(doc.file_name, "training_plan_2024_12.ics");
    assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(text.ends_with("END:VCALENDAR\r\n"));
    assert!(!text.contains("BEGIN:VEVENT"));

    assert!(matches!(
        ExportLogic::export_ics(&pool, &names, 2024, 13, None),
        Err(AppError::InvalidMonth(13))
    ));
}

#[test]
fn adding_a_trainer_writes_an_audit_row() {
    let mut pool = open_pool(&setup_test_db("core_trainer_add"));

    let id = TrainerLogic::add(&mut pool, "Anna Muster", true).unwrap();

    let all = trainers::list_trainers(&pool.conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert!(all[0].is_admin);

    let rows = log::load_log(&pool.conn).unwrap();
    assert!(rows.iter().any(|r| r.operation == "trainer_add" && r.target == format!("trainer {id}")));
}

#[test]
fn failed_audit_rolls_back_trainer_insert() {
    let mut pool = open_pool(&setup_test_db("core_trainer_add_rollback"));
    pool.conn.execute_batch("DROP TABLE log").unwrap();

    assert!(TrainerLogic::add(&mut pool, "Anna Muster", false).is_err());
    assert!(trainers::list_trainers(&pool.conn).unwrap().is_empty());
}
