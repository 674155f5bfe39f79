#![allow(dead_code)]

use santa_ais::antibody::Antibody;
use santa_ais::consts::N_DAYS;
use santa_ais::families::{Day, Families};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const FIRST_TEN: [Day; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// `count` families of `size` people, all preferring days 1..=10 in order.
pub fn uniform_families(count: usize, size: u32) -> Families {
    Families::uniform(count, size, FIRST_TEN).unwrap()
}

/// Deals families round-robin over all days: family `i` goes to day
/// `i % 100 + 1`.
pub fn round_robin(families: &Families) -> Antibody {
    let days = (0..families.count())
        .map(|i| (i % N_DAYS) as Day + 1)
        .collect();
    Antibody::from_days(days, families).unwrap()
}

/// Antibody with only scores set, for strategies that never look at days.
pub fn scored(fitness: f64, affinity: u64) -> Antibody {
    let mut a = Antibody::default();
    a.fitness = fitness;
    a.affinity = affinity;
    a
}

pub fn write_family_csv(path: &Path, count: usize, size: u32) {
    let mut f = File::create(path).unwrap();
    writeln!(
        f,
        "family_id,choice_0,choice_1,choice_2,choice_3,choice_4,choice_5,choice_6,choice_7,choice_8,choice_9,n_people"
    )
    .unwrap();
    for i in 0..count {
        // Spread preferences so every day is somebody's favourite.
        let first = (i % N_DAYS) as Day + 1;
        let choices: Vec<String> = (0..10)
            .map(|k| (((first as usize - 1 + k * 7) % N_DAYS) + 1).to_string())
            .collect();
        writeln!(f, "{},{},{}", i, choices.join(","), size).unwrap();
    }
}
