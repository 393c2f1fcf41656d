pub const TICK_RATE_MS: u64 = 2000;
pub const BUFFER_CAPACITY: usize = 50;
// Largest window accepted on the command line
pub const MAX_CAPACITY: usize = 10_000;
// Spacing between seeded historical samples
pub const SEED_SPACING_MS: i64 = 60_000;
// Input poll timeout while the simulation is paused
pub const IDLE_POLL_MS: u64 = 250;
pub const HIGH_CPU_THRESHOLD: f64 = 70.0;
