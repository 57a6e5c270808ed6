//! EduScope Headless Simulation Harness
//!
//! Validates bundled lesson data and widget behaviour without any UI.
//! Runs entirely in-process — no storage directory, no network, no rendering.
//!
//! Usage:
//!   cargo run -p eduscope-simtest
//!   cargo run -p eduscope-simtest -- --verbose
//!   cargo run -p eduscope-simtest -- --seed 7

use std::time::Duration;

use eduscope_core::prelude::*;
use eduscope_logic::carbon::{CarbonCycle, TransferOutcome};
use eduscope_logic::foodweb::{ClickOutcome, FoodWebBuilder};
use eduscope_logic::population::{step, PopulationParams, PopulationSample, PopulationSimulator};
use eduscope_logic::quiz::{parse_bank, select_questions, topics, Difficulty, QuizFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Bundled content (same JSON the lesson screens load) ─────────────────
const LESSONS: &[(&str, &str)] = &[
    ("ecology", include_str!("../../../data/lessons/ecology.json")),
    ("cell_biology", include_str!("../../../data/lessons/cell_biology.json")),
];
const QUIZ_BANK_JSON: &str = include_str!("../../../data/quiz_bank.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let seed = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    println!("=== EduScope Simulation Harness ===\n");
    log::info!("quiz seed {}", seed);

    let mut results = Vec::new();

    // 1. Lesson data validation
    results.extend(validate_lessons(verbose));

    // 2. Navigation and persistence
    results.extend(validate_progress(verbose));

    // 3. Population dynamics
    results.extend(validate_population(verbose));

    // 4. Food web rules
    results.extend(validate_food_web(verbose));

    // 5. Carbon conservation and settle window
    results.extend(validate_carbon(verbose));

    // 6. Quiz bank and selection
    results.extend(validate_quiz(seed, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_lessons() -> Result<Vec<Lesson>, String> {
    LESSONS
        .iter()
        .map(|(name, json)| Lesson::from_json(json).map_err(|e| format!("{name}: {e}")))
        .collect()
}

// ── 1. Lessons ──────────────────────────────────────────────────────────

fn validate_lessons(verbose: bool) -> Vec<TestResult> {
    println!("--- Lessons ---");
    let mut results = Vec::new();

    let lessons = match load_lessons() {
        Ok(l) => l,
        Err(e) => {
            results.push(TestResult::new("lessons_parse", false, e));
            return results;
        }
    };
    results.push(TestResult::new(
        "lessons_parse",
        true,
        format!("{} lessons loaded", lessons.len()),
    ));

    for lesson in &lessons {
        let untagged_interactive = lesson
            .slides
            .iter()
            .filter(|s| s.simulation.is_some() && !s.interactive)
            .count();
        results.push(TestResult::new(
            &format!("{}_simulation_slides_interactive", lesson.key),
            untagged_interactive == 0,
            format!(
                "{} slides, simulations {:?}",
                lesson.slide_count(),
                lesson.simulations()
            ),
        ));
        if verbose {
            for slide in &lesson.slides {
                println!("    [{}] {} {:?}", slide.index, slide.title, slide.simulation);
            }
        }
    }

    results
}

// ── 2. Progress ─────────────────────────────────────────────────────────

fn validate_progress(_verbose: bool) -> Vec<TestResult> {
    println!("--- Progress ---");
    let mut results = Vec::new();
    let lessons = match load_lessons() {
        Ok(l) => l,
        Err(_) => return results,
    };

    for lesson in lessons {
        let n = lesson.slide_count();
        let key = lesson.key.clone();

        // Index bounds across a scripted navigation sequence
        let mut tracker = LessonTracker::init(lesson.clone(), MemoryStore::new());
        let mut in_bounds = true;
        for i in 0..(n * 4) {
            match i % 5 {
                0 | 1 => {
                    tracker.next();
                }
                2 => {
                    tracker.prev();
                }
                3 => {
                    tracker.go_to(i * 3);
                }
                _ => {
                    tracker.go_to(0);
                }
            }
            in_bounds &= tracker.current_index() < n;
        }
        results.push(TestResult::new(
            &format!("{key}_index_in_bounds"),
            in_bounds,
            format!("final index {}", tracker.current_index()),
        ));

        // Reload after N next() calls
        let mut tracker = LessonTracker::init(lesson.clone(), MemoryStore::new());
        let steps = n + 2;
        for _ in 0..steps {
            tracker.next();
        }
        let completed = tracker.progress().completed().clone();
        let store = tracker.into_store();
        let stored = store.load(&key).ok().flatten();
        let reopened = LessonTracker::init(lesson, store);
        let expected = steps.min(n - 1);
        results.push(TestResult::new(
            &format!("{key}_resume_position"),
            reopened.current_index() == expected
                && reopened.progress().completed() == &completed
                && stored.is_some(),
            format!(
                "resumed at {} (expected {}), {} completed",
                reopened.current_index(),
                expected,
                completed.len()
            ),
        ));
    }

    results
}

// ── 3. Population ───────────────────────────────────────────────────────

fn validate_population(verbose: bool) -> Vec<TestResult> {
    println!("--- Population Dynamics ---");
    let mut results = Vec::new();

    let first = step(&PopulationSample::seed(), &PopulationParams::default());
    results.push(TestResult::new(
        "population_first_tick",
        (first.prey - 42.0).abs() < 1e-9 && (first.predator - 10.0).abs() < 1e-9,
        format!("prey={:.3} predator={:.3}", first.prey, first.predator),
    ));

    let mut sim = PopulationSimulator::default();
    sim.start();
    let mut max_len = 0;
    let mut negative = false;
    for _ in 0..5_000 {
        if let Some(s) = sim.tick() {
            negative |= s.prey < 0.0 || s.predator < 0.0;
        }
        max_len = max_len.max(sim.history().len());
    }
    results.push(TestResult::new(
        "population_window_bounded",
        max_len <= 51,
        format!("max history length {max_len}"),
    ));
    results.push(TestResult::new(
        "population_non_negative",
        !negative,
        "counts floored at zero",
    ));
    if verbose {
        let (peak_prey, peak_pred) = sim.history().peak();
        println!(
            "    after 5000 ticks: {:?}, window peak prey={:.1} predator={:.1}",
            sim.latest(),
            peak_prey,
            peak_pred
        );
    }

    // Driver: timer released on pause
    let config = CoreConfig::default();
    let mut driver = PopulationDriver::from_config(&config);
    driver.start();
    let ran = driver.update(Duration::from_millis(500));
    driver.pause();
    let after_pause = driver.update(Duration::from_secs(10));
    results.push(TestResult::new(
        "population_pause_stops_ticks",
        ran == 5 && after_pause == 0 && !driver.has_timer(),
        format!("{ran} ticks while running, {after_pause} after pause"),
    ));

    results
}

// ── 4. Food web ─────────────────────────────────────────────────────────

fn validate_food_web(_verbose: bool) -> Vec<TestResult> {
    println!("--- Food Web ---");
    let mut results = Vec::new();
    let mut web = FoodWebBuilder::default();

    web.click("grass");
    let linked = web.click("rabbit");
    results.push(TestResult::new(
        "foodweb_grass_rabbit",
        matches!(linked, ClickOutcome::Linked { .. }),
        format!("{linked:?}"),
    ));

    web.click("grass");
    let rejected = web.click("fox");
    results.push(TestResult::new(
        "foodweb_grass_fox_rejected",
        matches!(rejected, ClickOutcome::Rejected { .. }),
        format!("{rejected:?}"),
    ));

    web.click("grass");
    let duplicate = web.click("rabbit");
    results.push(TestResult::new(
        "foodweb_duplicate_rejected",
        matches!(duplicate, ClickOutcome::Duplicate { .. }) && web.edges().len() == 1,
        format!("{duplicate:?}"),
    ));

    web.click("fox");
    let deselected = web.click("fox");
    results.push(TestResult::new(
        "foodweb_self_click_deselects",
        deselected == ClickOutcome::Deselected && web.selected().is_none(),
        format!("{deselected:?}"),
    ));

    results
}

// ── 5. Carbon ───────────────────────────────────────────────────────────

fn validate_carbon(_verbose: bool) -> Vec<TestResult> {
    println!("--- Carbon Cycle ---");
    let mut results = Vec::new();
    let mut cycle = CarbonCycle::default();
    let total = cycle.total();

    cycle.transfer_by_label("Photosynthesis");
    let atmosphere = cycle.quantity("atmosphere").unwrap_or(f64::NAN);
    let plants = cycle.quantity("plants").unwrap_or(f64::NAN);
    results.push(TestResult::new(
        "carbon_photosynthesis",
        atmosphere == 90.0 && plants == 60.0,
        format!("atmosphere={atmosphere} plants={plants}"),
    ));

    let second = cycle.transfer_by_label("Combustion");
    results.push(TestResult::new(
        "carbon_settle_window",
        second == TransferOutcome::Settling,
        format!("{second:?}"),
    ));

    for _ in 0..100 {
        cycle.update(1.0);
        cycle.transfer_by_label("Combustion");
    }
    results.push(TestResult::new(
        "carbon_conserved",
        (cycle.total() - total).abs() < 1e-6,
        format!(
            "total {:.1} → {:.1}, fossils now {:.1}",
            total,
            cycle.total(),
            cycle.quantity("fossils").unwrap_or(f64::NAN)
        ),
    ));

    results
}

// ── 6. Quiz ─────────────────────────────────────────────────────────────

fn validate_quiz(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Quiz Bank ---");
    let mut results = Vec::new();

    let bank = match parse_bank(QUIZ_BANK_JSON) {
        Ok(b) => b,
        Err(e) => {
            results.push(TestResult::new("quiz_parse", false, format!("JSON parse error: {e}")));
            return results;
        }
    };

    let lesson_keys: Vec<String> = load_lessons()
        .map(|ls| ls.into_iter().map(|l| l.key).collect())
        .unwrap_or_default();
    let bank_topics = topics(&bank);
    let missing: Vec<_> = lesson_keys
        .iter()
        .filter(|k| !bank_topics.contains(&k.as_str()))
        .collect();
    results.push(TestResult::new(
        "quiz_topics_cover_lessons",
        missing.is_empty(),
        if missing.is_empty() {
            format!("topics {:?}", bank_topics)
        } else {
            format!("no questions for {:?}", missing)
        },
    ));

    let mut rng = StdRng::seed_from_u64(seed);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let filter = QuizFilter {
            topic: None,
            difficulty: Some(difficulty),
            count: 3,
        };
        let picked = select_questions(&bank, &filter, &mut rng);
        let all_match = picked.iter().all(|q| q.difficulty == difficulty);
        results.push(TestResult::new(
            &format!("quiz_select_{difficulty:?}").to_lowercase(),
            !picked.is_empty() && picked.len() <= 3 && all_match,
            format!("{} questions", picked.len()),
        ));
        if verbose {
            for q in &picked {
                println!("    {:?} {}: {}", difficulty, q.id, q.prompt);
            }
        }
    }

    results
}
