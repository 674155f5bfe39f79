use fastrand::Rng;
use proptest::prelude::*;
use santa_ais::antibody::Antibody;
use santa_ais::consts::{MAX_OCCUPANCY, MIN_OCCUPANCY, N_CHOICES, N_DAYS};
use santa_ais::families::{Day, Families, Family};
use santa_ais::optimizer::selection::percentile;
use santa_ais::optimizer::{
    compute_affinity, generate_antibody, BestPreferenceMutator, Mutator, PreferenceMutator,
    UniformMutator,
};
use santa_ais::scorer::{score, score_details};

// --- STRATEGIES ---

prop_compose! {
    fn arb_family()(
        size in 2u32..6,
        choices in prop::array::uniform10(1..=N_DAYS as Day)
    ) -> (u32, [Day; N_CHOICES]) {
        (size, choices)
    }
}

// Roughly 14 000 to 16 000 people: every day clears the floor, none nears the cap.
prop_compose! {
    fn arb_families()(
        rows in prop::collection::vec(arb_family(), 4000..4500)
    ) -> Families {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(id, (size, choices))| Family { id, size, choices })
            .collect();
        Families::new(rows).unwrap()
    }
}

fn in_window(a: &Antibody) -> bool {
    a.occupancy()
        .iter()
        .all(|&o| o > MIN_OCCUPANCY && o <= MAX_OCCUPANCY)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_constructed_schedules_are_consistent(
        families in arb_families(),
        seed in any::<u64>()
    ) {
        let a = generate_antibody(&families, &mut Rng::with_seed(seed)).unwrap();
        prop_assert_eq!(a.total_occupancy(), families.total_people());
        prop_assert!(a.occupancy().iter().all(|&o| o <= MAX_OCCUPANCY));
        prop_assert!(
            a.occupancy().iter().all(|&o| o == 0 || o >= MIN_OCCUPANCY),
            "A used day fell below the floor: {:?}",
            a.occupancy()
        );

        let fitness = score(&a, &families).unwrap();
        prop_assert!(fitness.is_finite(), "Fitness was not finite: {}", fitness);
        let details = score_details(&a, &families).unwrap();
        prop_assert_eq!(details.total, fitness);
    }

    #[test]
    fn test_mutation_keeps_the_window(
        families in arb_families(),
        seed in any::<u64>(),
        fitness in 0.0..50_000.0f64,
        which in 0usize..3
    ) {
        let mut rng = Rng::with_seed(seed);
        let mut a = generate_antibody(&families, &mut rng).unwrap();
        prop_assume!(in_window(&a));
        a.fitness = fitness;

        let mutator: Box<dyn Mutator> = match which {
            0 => Box::new(UniformMutator { max_attempts: 200 }),
            1 => Box::new(PreferenceMutator { max_attempts: 200 }),
            _ => Box::new(BestPreferenceMutator { max_attempts: 200 }),
        };
        let before = a.total_occupancy();
        mutator.mutate_antibody(&mut a, &families, &mut rng);

        prop_assert_eq!(a.total_occupancy(), before);
        prop_assert!(in_window(&a));

        // Occupancy still agrees with the day vector.
        let rebuilt = Antibody::from_days(a.days().to_vec(), &families).unwrap();
        prop_assert_eq!(rebuilt.occupancy(), a.occupancy());
    }

    #[test]
    fn test_affinity_is_symmetric(
        days in prop::collection::vec(
            prop::collection::vec(1..=N_DAYS as Day, 12),
            1..8
        )
    ) {
        let families = Families::uniform(12, 1, [1; N_CHOICES]).unwrap();
        let mut population: Vec<Antibody> = days
            .into_iter()
            .map(|d| Antibody::from_days(d, &families).unwrap())
            .collect();

        for x in &population {
            prop_assert_eq!(x.affinity(x), 12);
            for y in &population {
                prop_assert_eq!(x.affinity(y), y.affinity(x));
            }
        }

        let n = population.len();
        let expected: Vec<u64> = (0..n)
            .map(|i| {
                (0..n)
                    .filter(|&j| j != i)
                    .map(|j| population[i].affinity(&population[j]))
                    .sum()
            })
            .collect();
        compute_affinity(&mut population).unwrap();
        let got: Vec<u64> = population.iter().map(|a| a.affinity).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn test_fitness_ignores_family_order(
        families in arb_families(),
        seed in any::<u64>()
    ) {
        let mut rng = Rng::with_seed(seed);
        let a = generate_antibody(&families, &mut rng).unwrap();
        let before = score(&a, &families).unwrap();

        let mut order: Vec<usize> = (0..families.count()).collect();
        rng.shuffle(&mut order);
        let rows: Vec<Family> = families.iter().cloned().collect();
        let shuffled_rows = order
            .iter()
            .enumerate()
            .map(|(id, &old)| Family { id, ..rows[old].clone() })
            .collect();
        let shuffled = Families::new(shuffled_rows).unwrap();
        let days = order.iter().map(|&old| a.day_of(old)).collect();
        let b = Antibody::from_days(days, &shuffled).unwrap();

        prop_assert_eq!(b.occupancy(), a.occupancy());
        let after = score(&b, &shuffled).unwrap();
        prop_assert!(
            (after - before).abs() <= 1e-9 * before.abs().max(1.0),
            "{} != {}",
            after,
            before
        );
    }

    #[test]
    fn test_percentile_is_bounded(
        mut values in prop::collection::vec(0.0..1e6f64, 1..200),
        p in 0.0..=100.0f64
    ) {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let q = percentile(&mut values, p).unwrap();
        prop_assert!(q >= lo && q <= hi, "{} outside [{}, {}]", q, lo, hi);
    }
}
