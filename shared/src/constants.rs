pub const DEFAULT_CREDIT_AMOUNT: i64 = 10_000;

pub const CREDIT_COOKIE_KEY: &str = "slotcredit";
pub const CREDIT_COOKIE_TTL_DAYS: u32 = 365;

pub const STAKE_OPTIONS: [i64; 5] = [100, 1_000, 5_000, 10_000, 100_000];

// Constants for frontend animation
pub const FIRST_REEL_STOP_MS: u32 = 2_000;
pub const REEL_STOP_INTERVAL_MS: u32 = 500;
pub const ALERT_DURATION_MS: u32 = 1_400;

pub const NOT_ENOUGH_CREDITS_MESSAGE: &str = "Not enough credits!";
