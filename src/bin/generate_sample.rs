//! Write a synthetic Fenwick tree benchmark CSV for trying out the plotter.
//!
//! Usage: `generate_sample [OUTPUT]` (default `sample_fenwick.csv`).

use anyhow::{Context, Result};

const ENCODINGS: [&str; 3] = ["fixed", "byte", "bit"];
/// Top/bottom encoding pairs of the two-level trees.
const NESTED: [(&str, &str); 6] = [
    ("fixed", "fixed"),
    ("byte", "byte"),
    ("bit", "bit"),
    ("fixed", "byte"),
    ("fixed", "bit"),
    ("byte", "bit"),
];
const BLOCK_BITS: [u32; 5] = [12, 14, 16, 18, 20];
/// Roughly one cell in ten is left unmeasured.
const MISSING_RATE: f64 = 0.1;

/// splitmix64; deterministic so the sample file is reproducible.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Column name and a per-operation cost factor in nanoseconds per tree level.
fn columns() -> Vec<(String, f64)> {
    let mut cols = Vec::new();
    for (i, enc) in ENCODINGS.iter().enumerate() {
        let base = 4.0 + 2.0 * i as f64;
        cols.push((format!("{enc}[F]"), base));
        cols.push((format!("{enc}[$\\ell$]"), base * 1.6));
    }
    for bits in BLOCK_BITS {
        for (j, (top, bottom)) in NESTED.iter().enumerate() {
            let cost = 3.0 + 0.8 * j as f64 + f64::from(bits - 12) * 0.15;
            cols.push((format!("{top}[${bits}$]{bottom}"), cost));
        }
    }
    cols
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_fenwick.csv".to_string());
    let mut rng = SplitMix(42);
    let cols = columns();

    let mut writer = csv::Writer::from_path(&output).with_context(|| format!("creating {output}"))?;
    let mut header = vec!["Elements".to_string()];
    header.extend(cols.iter().map(|(name, _)| name.clone()));
    writer.write_record(&header)?;

    // 10^1 .. 10^8 in quarter-decade steps.
    let mut rows = 0;
    for step in 4..=32 {
        let elements = 10f64.powf(f64::from(step) / 4.0).round();
        let levels = elements.log2();
        let mut record = vec![format!("{elements}")];
        for (_, cost) in &cols {
            if rng.next_f64() < MISSING_RATE {
                record.push("0".to_string());
            } else {
                let jitter = 0.9 + 0.2 * rng.next_f64();
                record.push(format!("{:.2}", cost * levels * jitter));
            }
        }
        writer.write_record(&record)?;
        rows += 1;
    }
    writer.flush()?;

    println!("Wrote {rows} rows x {} series to {output}", cols.len());
    Ok(())
}
