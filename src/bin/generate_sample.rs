use anyhow::{Context, Result};

const TIME_POINTS: usize = 8;
const GENES_PER_PROFILE: usize = 25;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Expression shapes mixed into the sample table.
#[derive(Clone, Copy)]
enum Profile {
    /// Exponential decay, strictly decreasing.
    Decay,
    /// Linear decline with noise large enough to break strict monotonicity.
    NoisyDecline,
    Flat,
    Rising,
    /// Decays, but starts below the default minimum of 10.
    LowDecay,
    /// Fewer columns than the table's time points.
    Truncated,
}

const PROFILES: [(&str, Profile); 6] = [
    ("decay", Profile::Decay),
    ("noisy", Profile::NoisyDecline),
    ("flat", Profile::Flat),
    ("rising", Profile::Rising),
    ("low", Profile::LowDecay),
    ("short", Profile::Truncated),
];

fn series(f: impl FnMut(usize) -> f64) -> Vec<f64> {
    (0..TIME_POINTS).map(f).collect()
}

fn expression(profile: Profile, rng: &mut SimpleRng) -> Vec<f64> {
    let start = rng.uniform(20.0, 200.0);
    let values = match profile {
        Profile::Decay => {
            let rate = rng.uniform(0.1, 0.5);
            series(|t| start * (-rate * t as f64).exp())
        }
        Profile::NoisyDecline => {
            let step = start / (2.0 * TIME_POINTS as f64);
            let noise = step * 1.5;
            series(|t| start - step * t as f64 + rng.gauss(0.0, noise))
        }
        Profile::Flat => series(|_| start + rng.gauss(0.0, start * 0.02)),
        Profile::Rising => {
            let step = rng.uniform(1.0, 10.0);
            series(|t| start + step * t as f64)
        }
        Profile::LowDecay => {
            let low = rng.uniform(2.0, 9.5);
            series(|t| low * 0.8f64.powi(t as i32))
        }
        Profile::Truncated => {
            let mut full = series(|t| start - t as f64);
            full.truncate(TIME_POINTS / 2);
            full
        }
    };

    values.into_iter().map(|v| v.max(0.0)).collect()
}

/// One table row: `<label>_<index>` followed by values at three decimals.
fn record(label: &str, index: usize, values: &[f64]) -> Vec<String> {
    let mut record = Vec::with_capacity(values.len() + 1);
    record.push(format!("{label}_{index:03}"));
    record.extend(values.iter().map(|v| format!("{v:.3}")));
    record
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_expression.tsv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .has_headers(false)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut rows = 0usize;
    for i in 0..GENES_PER_PROFILE {
        for &(label, profile) in &PROFILES {
            let values = expression(profile, &mut rng);
            writer
                .write_record(record(label, i, &values))
                .with_context(|| format!("writing row {rows}"))?;
            rows += 1;
        }
    }
    writer.flush().context("flushing sample table")?;

    println!(
        "Wrote {rows} genes ({TIME_POINTS} time points each) to {output_path}\n\
         Try: seed-genes -i {output_path} -s 0 -e {} [-t]",
        TIME_POINTS - 1
    );
    Ok(())
}
