pub const DECIMAL_PRECISION: u128 = 1_000_000_000_000_000_000;

// P is multiplied by this whenever it would drop below it
pub const SCALE_FACTOR: u128 = 1_000_000_000;

// no point to add further complexity with leap years and seconds for this particular case
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const MINUTES_PER_YEAR: u64 = 525_600;

// Capped at 1000 years, the curve is flat long before that
pub const MAX_ISSUANCE_MINUTES: u64 = 1000 * MINUTES_PER_YEAR;

/*
 * 32,000,000 * (1 - 0.5^year)
 *
 * F ** 525600 = 0.5
 * F = 0.5 ** (1/525600)
 * F = 0.999998681227695000
 */
pub const TOTAL_REWARD_TO_STABILITY_POOL: u64 = 32_000_000;
pub const REWARD_ISSUANCE_FACTOR: u64 = 999_998_681_227_695_000;
