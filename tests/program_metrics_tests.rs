use chrono::{NaiveDate, NaiveDateTime};
use study_tracker::{ExamResult, GoalKey, Goals, Module, Program, Semester};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn graded(title: &str, credits: u32, grade: f64) -> Module {
    Module::new(title, credits, ExamResult::new("Klausur").with_grade(grade))
}

fn program_with(semesters: Vec<Semester>) -> Program {
    Program::new("Informatik B.Sc.", dt(2024, 10, 1), semesters, Goals::default())
}

#[test]
fn analysis_and_recognized_law_module() {
    let recognized = Module::new(
        "Recht",
        3,
        ExamResult::new("Hausarbeit").with_recognized(true),
    );
    let program = program_with(vec![Semester::new(
        1,
        vec![graded("Analysis", 5, 2.3), recognized],
    )]);

    assert_eq!(program.completed_module_count(), 2);
    assert_eq!(program.earned_credits(), 8);
    assert_eq!(program.grade_average(), 2.3);
}

#[test]
fn program_without_grades_has_zero_average_and_no_completed_modules() {
    let program = program_with(vec![
        Semester::new(1, vec![Module::new("Analysis", 5, ExamResult::new("Klausur"))]),
        Semester::new(2, vec![Module::new("Statistik", 5, ExamResult::new("Klausur"))]),
    ]);

    assert_eq!(program.grade_average(), 0.0);
    assert_eq!(program.completed_module_count(), 0);
    assert_eq!(program.earned_credits(), 0);
    assert_eq!(program.total_credits(), 10);
    assert_eq!(program.total_modules(), 2);
}

#[test]
fn passing_threshold_is_four_point_zero() {
    let program = program_with(vec![Semester::new(
        1,
        vec![graded("Grenzfall", 5, 4.0), graded("Knapp daneben", 6, 4.1)],
    )]);

    assert_eq!(program.completed_module_count(), 1);
    assert_eq!(program.earned_credits(), 5);
}

#[test]
fn failed_grades_still_count_towards_the_average() {
    let program = program_with(vec![Semester::new(
        1,
        vec![graded("Analysis", 5, 1.0), graded("Statistik", 5, 5.0)],
    )]);

    assert_eq!(program.completed_module_count(), 1);
    assert_eq!(program.grade_average(), 3.0);
}

#[test]
fn recognized_module_counts_regardless_of_grade() {
    let failed_but_recognized = Module::new(
        "Englisch",
        4,
        ExamResult::new("Klausur").with_grade(5.0).with_recognized(true),
    );
    let program = program_with(vec![Semester::new(1, vec![failed_but_recognized])]);

    assert_eq!(program.completed_module_count(), 1);
    assert_eq!(program.earned_credits(), 4);
}

#[test]
fn passed_and_recognized_module_is_counted_twice_but_credited_once() {
    let both = Module::new(
        "Mathematik",
        5,
        ExamResult::new("Klausur").with_grade(1.7).with_recognized(true),
    );
    let program = program_with(vec![Semester::new(1, vec![both])]);

    assert_eq!(program.completed_module_count(), 2);
    assert_eq!(program.earned_credits(), 5);
}

#[test]
fn credits_are_summed_per_semester_across_the_program() {
    let program = program_with(vec![
        Semester::new(
            1,
            vec![
                graded("Analysis", 5, 1.0),
                Module::new("Offen", 7, ExamResult::new("Klausur")),
            ],
        ),
        Semester::new(
            2,
            vec![
                graded("Algorithmen", 6, 3.7),
                Module::new("Praktikum", 10, ExamResult::new("Bericht").with_recognized(true)),
                Module::new("Nicht anerkannt", 3, ExamResult::new("Bericht").with_recognized(false)),
            ],
        ),
    ]);

    assert_eq!(program.semesters[0].earned_credits(), 5);
    assert_eq!(program.semesters[1].earned_credits(), 16);
    assert_eq!(program.earned_credits(), 21);
    assert_eq!(program.total_credits(), 31);
}

#[test]
fn average_uses_every_grade_in_program_order() {
    let program = program_with(vec![
        Semester::new(1, vec![graded("A", 5, 1.0), graded("B", 5, 2.0)]),
        Semester::new(2, vec![graded("C", 5, 3.3)]),
    ]);

    assert_eq!(program.semesters[0].grades(), vec![1.0, 2.0]);
    // (1.0 + 2.0 + 3.3) / 3 = 2.1
    assert_eq!(program.grade_average(), 2.1);
}

fn average_of(grades: &[f64]) -> f64 {
    let modules = grades
        .iter()
        .enumerate()
        .map(|(idx, grade)| graded(&format!("Modul {idx}"), 5, *grade))
        .collect();
    program_with(vec![Semester::new(1, modules)]).grade_average()
}

#[test]
fn average_rounds_the_stored_mean_with_ties_to_even() {
    // 1.15 and 2.15 are stored just below the tie.
    assert_eq!(average_of(&[1.0, 1.3]), 1.1);
    assert_eq!(average_of(&[2.3, 2.0]), 2.1);
    // 2.25 is an exact tie.
    assert_eq!(average_of(&[2.0, 2.5]), 2.2);
    assert_eq!(average_of(&[1.0, 1.5]), 1.2);
}

#[test]
fn grade_goal_uses_the_rounded_average() {
    let mut program = program_with(vec![Semester::new(
        1,
        vec![graded("Analysis", 5, 1.0), graded("Algebra", 5, 1.3)],
    )]);
    program.goals = Goals::new(2190, 1.1);

    assert_eq!(program.grade_average(), 1.1);
    assert!(program.is_goal_achieved(GoalKey::Grade, dt(2024, 10, 2)));
}

#[test]
fn elapsed_days_may_be_negative_for_future_start() {
    let program = program_with(Vec::new());
    assert_eq!(program.elapsed_days(dt(2024, 10, 11)), 10);
    assert_eq!(program.elapsed_days(dt(2024, 9, 30)), -1);
}
