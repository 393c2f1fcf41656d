use chrono::{DateTime, Duration, Local};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::constants::SEED_SPACING_MS;
use crate::model::{display_time, Sample};

#[derive(Clone, Copy)]
enum Wave {
    Sin,
    Cos,
}

// base + random * amplitude + swing * wave(phase)
struct Profile {
    base: f64,
    amplitude: f64,
    swing: f64,
    wave: Wave,
    // Phase step per seeded sample
    index_freq: f64,
    // Phase step per wall-clock millisecond
    time_freq: f64,
}

const CPU: Profile = Profile {
    base: 30.0,
    amplitude: 40.0,
    swing: 10.0,
    wave: Wave::Sin,
    index_freq: 0.1,
    time_freq: 0.001,
};

const MEMORY: Profile = Profile {
    base: 50.0,
    amplitude: 30.0,
    swing: 5.0,
    wave: Wave::Cos,
    index_freq: 0.05,
    time_freq: 0.0005,
};

const NETWORK: Profile = Profile {
    base: 20.0,
    amplitude: 50.0,
    swing: 15.0,
    wave: Wave::Sin,
    index_freq: 0.2,
    time_freq: 0.002,
};

const DISK: Profile = Profile {
    base: 60.0,
    amplitude: 20.0,
    swing: 8.0,
    wave: Wave::Cos,
    index_freq: 0.08,
    time_freq: 0.0008,
};

impl Profile {
    fn sample<R: Rng>(&self, rng: &mut R, phase: f64) -> f64 {
        let periodic = match self.wave {
            Wave::Sin => phase.sin(),
            Wave::Cos => phase.cos(),
        };
        (self.base + rng.gen::<f64>() * self.amplitude + self.swing * periodic).max(0.0)
    }
}

/// Synthetic telemetry source. Seeded series follow the sample index,
/// live ticks follow wall-clock time so they stay smooth however often they fire.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new(rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// `n` samples one minute apart, the last one stamped `now`.
    pub fn seed(&mut self, n: usize, now: DateTime<Local>) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let minutes_back = (n - 1 - i) as i64;
                let at = now - Duration::milliseconds(minutes_back * SEED_SPACING_MS);
                self.build(at, |p| i as f64 * p.index_freq)
            })
            .collect()
    }

    pub fn tick(&mut self, now: DateTime<Local>) -> Sample {
        let elapsed = now.timestamp_millis() as f64;
        self.build(now, |p| elapsed * p.time_freq)
    }

    fn build(&mut self, at: DateTime<Local>, phase: impl Fn(&Profile) -> f64) -> Sample {
        let rng = &mut self.rng;
        Sample {
            time: display_time(&at),
            timestamp: at.timestamp_millis(),
            cpu: CPU.sample(rng, phase(&CPU)),
            memory: MEMORY.sample(rng, phase(&MEMORY)),
            network: NETWORK.sample(rng, phase(&NETWORK)),
            disk: DISK.sample(rng, phase(&DISK)),
            requests: rng.gen_range(500..1500),
            errors: rng.gen_range(10..60),
        }
    }
}
