/// Number of days in the tour. Days are identified by `1..=N_DAYS`.
pub const N_DAYS: usize = 100;

/// Occupancy floor. A day above this is no longer preferred by the
/// random constructor, and a mutation may not drain a day down to it.
pub const MIN_OCCUPANCY: u32 = 125;

/// Hard occupancy cap for any single day.
pub const MAX_OCCUPANCY: u32 = 300;

/// Length of every family's ranked preference list.
pub const N_CHOICES: usize = 10;

/// Fixed part of the consolation gift, indexed by choice rank.
/// Index `N_CHOICES` is the "no listed choice" bucket.
pub const GIFT_BASE: [f64; N_CHOICES + 1] =
    [0.0, 50.0, 50.0, 100.0, 200.0, 200.0, 300.0, 300.0, 400.0, 500.0, 500.0];

/// Per-person part of the consolation gift, indexed like `GIFT_BASE`.
pub const GIFT_PER_PERSON: [f64; N_CHOICES + 1] =
    [0.0, 0.0, 9.0, 9.0, 9.0, 18.0, 18.0, 36.0, 36.0, 235.0, 434.0];

/// Default retry budget for a single mutation move.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;
