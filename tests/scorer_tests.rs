mod common;

use common::{round_robin, uniform_families};
use rstest::rstest;
use santa_ais::antibody::Antibody;
use santa_ais::consts::N_DAYS;
use santa_ais::error::AisError;
use santa_ais::optimizer::evaluate_fitness;
use santa_ais::scorer::costs::{choice_histogram, gift_cost, preference_cost};
use santa_ais::scorer::{accounting_penalty, score, score_details};

// --- GIFT TABLE ---
#[rstest]
#[case(Some(0), 4, 0.0)]
#[case(Some(1), 4, 50.0)]
#[case(Some(2), 4, 50.0 + 9.0 * 4.0)]
#[case(Some(3), 4, 100.0 + 9.0 * 4.0)]
#[case(Some(4), 4, 200.0 + 9.0 * 4.0)]
#[case(Some(5), 4, 200.0 + 18.0 * 4.0)]
#[case(Some(6), 4, 300.0 + 18.0 * 4.0)]
#[case(Some(7), 4, 300.0 + 36.0 * 4.0)]
#[case(Some(8), 4, 400.0 + 36.0 * 4.0)]
#[case(Some(9), 4, 500.0 + 235.0 * 4.0)]
#[case(None, 4, 500.0 + 434.0 * 4.0)]
#[case(Some(2), 125, 50.0 + 9.0 * 125.0)]
fn test_gift_cost(#[case] rank: Option<usize>, #[case] size: u32, #[case] expected: f64) {
    assert_eq!(gift_cost(rank, size), expected);
}

// --- PREFERENCE COST ---
#[rstest]
#[case(vec![1, 2, 3], 50.0 * 2.0 + 9.0 * 125.0)]
#[case(vec![3, 3, 3], (50.0 + 9.0 * 125.0) * 3.0)]
#[case(vec![1, 1, 2], 50.0)]
fn test_preference_cost(#[case] days: Vec<u16>, #[case] expected: f64) {
    let families = uniform_families(3, 125);
    let antibody = Antibody::from_days(days, &families).unwrap();
    assert_eq!(preference_cost(&antibody, &families), expected);
}

#[test]
fn test_unlisted_day_costs_most() {
    let families = uniform_families(1, 5);
    let antibody = Antibody::from_days(vec![50], &families).unwrap();
    assert_eq!(preference_cost(&antibody, &families), 500.0 + 434.0 * 5.0);
    assert_eq!(choice_histogram(&antibody, &families)[10], 1);
}

// --- ACCOUNTING PENALTY ---
#[test]
fn test_accounting_flat_schedule() {
    let occupancy = [210u32; N_DAYS];
    let expected = N_DAYS as f64 * (85.0 / 400.0) * 210f64.powf(0.5);
    let got = accounting_penalty(&occupancy);
    assert!(
        (got - expected).abs() < 1e-9,
        "Accounting penalty was {}, expected {}",
        got,
        expected
    );
}

#[test]
fn test_accounting_at_floor_is_zero() {
    assert_eq!(accounting_penalty(&[125u32; N_DAYS]), 0.0);
}

#[test]
fn test_accounting_compares_with_following_day() {
    // Day 99 sits at 200 while day 100 holds 150.
    let mut occupancy = [125u32; N_DAYS];
    occupancy[N_DAYS - 2] = 200;
    occupancy[N_DAYS - 1] = 150;

    let last = (150.0 - 125.0) / 400.0 * 150f64.powf(0.5);
    let before_last = (200.0 - 125.0) / 400.0 * 200f64.powf(0.5 + 50.0 / 50.0);
    let expected = last + before_last;

    let got = accounting_penalty(&occupancy);
    assert!((got - expected).abs() < 1e-9, "got {}, expected {}", got, expected);
}

#[test]
fn test_accounting_skips_unused_days() {
    let mut occupancy = [0u32; N_DAYS];
    occupancy[0] = 300;
    let got = accounting_penalty(&occupancy);
    assert!(got.is_finite());
    let expected = (300.0 - 125.0) / 400.0 * 300f64.powf(0.5 + 300.0 / 50.0);
    assert!((got - expected).abs() / expected < 1e-12);
}

#[test]
fn test_accounting_counts_empty_day_with_zero_exponent() {
    // Day 99 is empty right after 25 people on day 100: 0.5 + (0 - 25) / 50 = 0.
    let mut occupancy = [0u32; N_DAYS];
    occupancy[N_DAYS - 1] = 25;

    let last = (25.0 - 125.0) / 400.0 * 25f64.powf(0.5);
    let empty = (0.0 - 125.0) / 400.0 * 0f64.powf(0.0);
    assert_eq!(empty, -0.3125);

    let got = accounting_penalty(&occupancy);
    assert!((got - (last + empty)).abs() < 1e-12, "got {}", got);
    assert!((got + 1.5625).abs() < 1e-12);
}

#[test]
fn test_accounting_skips_empty_day_with_negative_exponent() {
    // 0.5 + (0 - 100) / 50 < 0 on day 99, so only day 100 counts.
    let mut occupancy = [0u32; N_DAYS];
    occupancy[N_DAYS - 1] = 100;

    let got = accounting_penalty(&occupancy);
    assert!(got.is_finite());
    assert!((got - (100.0 - 125.0) / 400.0 * 10.0).abs() < 1e-12, "got {}", got);
}

// --- TOTAL FITNESS ---
#[test]
fn test_score_sums_both_terms() {
    let families = uniform_families(3, 125);
    let antibody = Antibody::from_days(vec![1, 2, 3], &families).unwrap();
    assert_eq!(score(&antibody, &families).unwrap(), 1225.0);
}

#[test]
fn test_population_min_and_avg() {
    let families = uniform_families(3, 125);
    let mut population: Vec<Antibody> = [vec![1, 2, 3], vec![2, 3, 4], vec![1, 2, 4]]
        .into_iter()
        .map(|d| Antibody::from_days(d, &families).unwrap())
        .collect();

    let stats = evaluate_fitness(&mut population, &families).unwrap();
    assert_eq!(stats.min, 1225.0);
    assert!((stats.avg - (1225.0 + 2450.0 + 1275.0) / 3.0).abs() < 1e-9);
    assert_eq!(population[1].fitness, 2450.0);
}

#[test]
fn test_evaluate_empty_population() {
    let families = uniform_families(3, 125);
    let res = evaluate_fitness(&mut [], &families);
    assert!(matches!(res, Err(AisError::EmptyPopulation)));
}

#[test]
fn test_overflowing_penalty_is_rejected() {
    // 5000 people on one day after an empty one: the power term overflows.
    let families = uniform_families(20, 250);
    let antibody = Antibody::from_days(vec![1; 20], &families).unwrap();
    let res = score(&antibody, &families);
    assert!(
        matches!(res, Err(AisError::InvalidFitness { .. })),
        "expected InvalidFitness, got {:?}",
        res
    );
}

#[test]
fn test_score_details_breakdown() {
    let families = uniform_families(1000, 20);
    let antibody = round_robin(&families);
    let d = score_details(&antibody, &families).unwrap();

    assert_eq!(d.total, score(&antibody, &families).unwrap());
    assert!((d.preference_cost + d.accounting_penalty - d.total).abs() < 1e-9);
    assert_eq!(d.min_occupancy, 200);
    assert_eq!(d.max_occupancy, 200);
    assert_eq!(d.empty_days, 0);
    assert_eq!(d.days_out_of_window, 0);
    assert_eq!(d.choice_counts.iter().sum::<usize>(), 1000);
    // Days 1..=10 each hold 10 families, one rank per day.
    for rank in 0..10 {
        assert_eq!(d.choice_counts[rank], 10);
    }
    assert_eq!(d.choice_counts[10], 900);
}
