//! Writes `sample_growth.csv`: a deterministic 96-well growth-curve table
//! with four plate rows populated (six replicate wells each) plus one
//! non-well column, for exercising the app by hand.

fn logistic(t: f64, carrying: f64, rate: f64, midpoint: f64) -> f64 {
    carrying / (1.0 + (-rate * (t - midpoint)).exp())
}

fn generate_curve(
    timepoints: &[f64],
    carrying: f64,
    rate: f64,
    midpoint: f64,
    noise_level: f64,
    rng: &mut SampleRng,
) -> Vec<f64> {
    timepoints
        .iter()
        .map(|&t| 0.05 + logistic(t, carrying, rate, midpoint) + rng.gauss(0.0, noise_level))
        .collect()
}

/// Minimal deterministic PRNG (splitmix64).
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SampleRng::new(7);

    // 48 hours, hourly readings.
    let timepoints: Vec<f64> = (0..=48).map(|h| f64::from(h) * 3600.0).collect();

    // One growth condition per plate row: (row, carrying capacity, rate, midpoint [s]).
    let conditions = [
        ('A', 1.2, 0.00008, 60_000.0),
        ('B', 0.9, 0.00012, 50_000.0),
        ('C', 1.5, 0.00006, 80_000.0),
        ('D', 0.4, 0.00010, 70_000.0),
    ];
    let replicates_per_condition = 6;

    let mut headers = vec!["Time [s]".to_string()];
    let mut curves: Vec<Vec<f64>> = Vec::new();

    for &(row, carrying, rate, midpoint) in &conditions {
        for col in 1..=replicates_per_condition {
            headers.push(format!("{row}{col}"));
            // Small per-well jitter so replicates differ.
            let k = carrying * (1.0 + rng.gauss(0.0, 0.03));
            let m = midpoint + rng.gauss(0.0, 1800.0);
            curves.push(generate_curve(&timepoints, k, rate, m, 0.01, &mut rng));
        }
    }
    headers.push("Temp [C]".to_string());

    let output_path = "sample_growth.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(&headers).expect("Failed to write header");

    for (i, &t) in timepoints.iter().enumerate() {
        let mut record = vec![format!("{t}")];
        for curve in &curves {
            record.push(format!("{:.5}", curve[i]));
        }
        record.push(format!("{:.2}", 37.0 + rng.gauss(0.0, 0.05)));
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!(
        "Wrote {} wells ({} timepoints each) to {output_path}",
        curves.len(),
        timepoints.len()
    );
}
