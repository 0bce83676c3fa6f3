//! End-to-end multi-start searches with a real (if simple) local minimizer.
//!
//! `CompassSearch` is a derivative-free pattern search: probe ±step along
//! every axis, move to any improving probe, otherwise halve the step. It is
//! enough to fall into whichever basin a start lies in, which is all the
//! multi-start layer needs to find the global minimum of Rastrigin.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use multistart::objectives::{helical_valley, rastrigin, vec_rosenbrock, CountedObjective};
use multistart::{
    find_global_minimum, find_global_minimum_with_rng, print_report, LocalMinimizer,
    LocalMinimum, MinimizationResults, MultistartBuilder, MultistartError, MultistartOptions,
    ObjectiveFn, Region, SharedRng, StopReason,
};
use rand_chacha::ChaCha8Rng;

// ─────────────────────────────────────────────────────────────────────────────
// A local minimizer for the tests
// ─────────────────────────────────────────────────────────────────────────────

struct CompassSearch {
    initial_step: f64,
    min_step: f64,
    max_steps: i64,
}

impl Default for CompassSearch {
    fn default() -> Self {
        Self {
            initial_step: 0.25,
            min_step: 1e-10,
            max_steps: 100_000,
        }
    }
}

impl LocalMinimizer for CompassSearch {
    fn minimize(&self, objective: &ObjectiveFn<'_>, x: &mut [f64]) -> LocalMinimum {
        let mut fx = objective(x);
        let mut step = self.initial_step;
        let mut steps = 0;

        while step > self.min_step && steps < self.max_steps {
            steps += 1;
            let mut improved = false;
            for i in 0..x.len() {
                for dir in [1.0, -1.0] {
                    let old = x[i];
                    x[i] = old + dir * step;
                    let f = objective(x);
                    if f < fx {
                        fx = f;
                        improved = true;
                        break;
                    }
                    x[i] = old;
                }
            }
            if improved {
                step *= 2.0;
            } else {
                step *= 0.5;
            }
        }
        LocalMinimum::new(fx, steps)
    }
}

fn assert_sorted(results: &MinimizationResults) {
    for pair in results.best_solutions.windows(2) {
        assert!(
            pair[0].value <= pair[1].value,
            "not sorted: {} > {}",
            pair[0].value,
            pair[1].value
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Goal reached
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rastrigin_2d_goal_reached() {
    let region = Region::cube(2, -5.12, 5.12).unwrap();
    let opts = MultistartOptions {
        desired_min: 1e-6,
        num_workers: 4,
        max_attempts: 50_000,
        seed: Some(42),
        ..Default::default()
    };
    let results = find_global_minimum(rastrigin, &CompassSearch::default(), &region, &opts).unwrap();
    println!("{}", results);

    assert_eq!(results.stop_reason, StopReason::GoalReached);
    assert!(results.success());
    let best = results.best().unwrap();
    assert!(best.value < 1e-6);
    for xi in &best.location {
        assert!(xi.abs() < 1e-3, "best location {:?}", best.location);
    }
    assert!(results.best_solutions.len() <= 4);
    assert_sorted(&results);
}

#[test]
fn test_every_solution_improves_on_its_start() {
    let region = Region::cube(3, -2.0, 2.0).unwrap();
    let results = MultistartBuilder::new(helical_valley, CompassSearch::default(), region.clone())
        .desired_min(f64::NEG_INFINITY)
        .workers(3)
        .max_attempts(30)
        .capacity(30)
        .seed(7)
        .minimize()
        .unwrap();

    assert_eq!(results.stop_reason, StopReason::MaxAttemptsExceeded);
    for s in &results.best_solutions {
        assert!(region.contains(&s.start).unwrap());
        assert!(s.value <= s.start_value);
        assert!(s.steps >= 1);
        assert!(s.index >= 1 && s.index <= results.num_attempts);
    }
    assert_sorted(&results);
}

#[test]
fn test_rosenbrock_4d_converges_near_valley() {
    let region = Region::cube(4, 0.0, 2.0).unwrap();
    let results = MultistartBuilder::new(vec_rosenbrock, CompassSearch::default(), region)
        .desired_min(1e-3)
        .workers(4)
        .max_attempts(200)
        .seed(11)
        .minimize()
        .unwrap();

    let best = results.best().unwrap();
    println!(
        "rosenbrock: {} attempts, best {:.3e} at {:?}",
        results.num_attempts, best.value, best.location
    );
    assert!(best.value < best.start_value);
    assert!(best.value < 1.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Attempt ceiling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unreachable_goal_stops_at_ceiling() {
    let region = Region::cube(2, -5.12, 5.12).unwrap();
    let workers = 4;
    let max_attempts = 50;
    let opts = MultistartOptions {
        desired_min: -1.0,
        num_workers: workers,
        max_attempts,
        capacity: 8,
        seed: Some(3),
    };
    let results = find_global_minimum(rastrigin, &CompassSearch::default(), &region, &opts).unwrap();

    assert_eq!(results.stop_reason, StopReason::MaxAttemptsExceeded);
    assert!(!results.success());
    assert!(results.num_attempts > max_attempts);
    assert!(results.num_attempts <= max_attempts + workers as i64);
    assert_eq!(results.best_solutions.len(), 8);
    assert_sorted(&results);
}

#[test]
fn test_negative_ceiling_reports_empty_set() {
    let region = Region::cube(2, -1.0, 1.0).unwrap();
    let err = MultistartBuilder::new(rastrigin, CompassSearch::default(), region)
        .workers(2)
        .max_attempts(-5)
        .minimize()
        .unwrap_err();
    assert!(matches!(err, MultistartError::EmptyResultSet { attempts: 0 }));
    println!("{}", err);
}

// ─────────────────────────────────────────────────────────────────────────────
// Determinism and plumbing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_worker_is_reproducible() {
    // With one worker the draw order is fixed, so a seed pins the result.
    let region = Region::cube(2, -5.12, 5.12).unwrap();
    let run = || {
        MultistartBuilder::new(rastrigin, CompassSearch::default(), region.clone())
            .desired_min(f64::NEG_INFINITY)
            .workers(1)
            .max_attempts(20)
            .capacity(5)
            .seed(1234)
            .minimize()
            .unwrap()
    };
    let a = run();
    let b = run();
    let starts_a: Vec<_> = a.best_solutions.iter().map(|s| s.start.clone()).collect();
    let starts_b: Vec<_> = b.best_solutions.iter().map(|s| s.start.clone()).collect();
    assert_eq!(starts_a, starts_b);
    assert_eq!(a.num_attempts, 21);
}

#[test]
fn test_caller_supplied_engine() {
    let region = Region::cube(1, -5.12, 5.12).unwrap();
    let rng: SharedRng<ChaCha8Rng> = SharedRng::seed_from_u64(8);
    let opts = MultistartOptions {
        desired_min: f64::NEG_INFINITY,
        num_workers: 2,
        max_attempts: 10,
        ..Default::default()
    };
    let results =
        find_global_minimum_with_rng(&rastrigin, &CompassSearch::default(), &region, &opts, &rng)
            .unwrap();
    assert!(results.num_attempts >= 11);
    // The engine is still usable after the search.
    let _ = rng.next();
}

#[test]
fn test_counted_objective_through_builder() {
    let counted = CountedObjective::new(rastrigin);
    let region = Region::cube(2, -5.12, 5.12).unwrap();
    let results = MultistartBuilder::new(counted.as_fn(), CompassSearch::default(), region)
        .desired_min(f64::NEG_INFINITY)
        .workers(2)
        .max_attempts(10)
        .seed(6)
        .minimize()
        .unwrap();
    // Each attempt evaluates at least the start point and the minimizer's
    // own first evaluation.
    assert!(counted.ncalls() >= 2 * results.num_attempts as u64);
}

#[test]
fn test_workers_run_on_named_pool_threads() {
    let names = Mutex::new(HashSet::new());
    let slow = |f: &ObjectiveFn<'_>, x: &mut [f64]| {
        let name = std::thread::current().name().map(str::to_owned);
        names.lock().unwrap().insert(name);
        std::thread::sleep(Duration::from_millis(2));
        LocalMinimum::without_steps(f(x))
    };

    let region = Region::cube(2, 1.0, 2.0).unwrap();
    let opts = MultistartOptions {
        desired_min: 0.0,
        num_workers: 4,
        max_attempts: 40,
        seed: Some(2),
        ..Default::default()
    };
    find_global_minimum(rastrigin, &slow, &region, &opts).unwrap();

    let names = names.into_inner().unwrap();
    println!("worker threads: {:?}", names);
    assert!(names.len() > 1, "expected several worker threads");
    for name in names {
        let name = name.expect("pool threads are named");
        assert!(name.starts_with("multistart-worker-"), "{}", name);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_report_of_search_results() {
    let region = Region::cube(3, -5.12, 5.12).unwrap();
    let results = MultistartBuilder::new(rastrigin, CompassSearch::default(), region)
        .desired_min(f64::NEG_INFINITY)
        .workers(2)
        .max_attempts(12)
        .capacity(6)
        .seed(99)
        .minimize()
        .unwrap();

    let mut out = Vec::new();
    print_report(&results.best_solutions, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1 + 6);
    let columns = lines[0].split('\t').count();
    assert_eq!(columns, 2 * 3 + 7);
    for row in &lines[1..] {
        assert_eq!(row.split('\t').count(), columns);
    }
}

#[test]
fn test_results_serialize_to_json() {
    let region = Region::cube(2, -1.0, 1.0).unwrap();
    let results = MultistartBuilder::new(rastrigin, CompassSearch::default(), region)
        .desired_min(f64::NEG_INFINITY)
        .workers(2)
        .max_attempts(4)
        .seed(5)
        .minimize()
        .unwrap();

    let json = serde_json::to_string(&results).unwrap();
    assert!(json.contains("\"stop_reason\":\"MaxAttemptsExceeded\""));
    let back: MinimizationResults = serde_json::from_str(&json).unwrap();
    assert_eq!(back.num_attempts, results.num_attempts);
    assert_eq!(back.best_solutions.len(), results.best_solutions.len());
}
