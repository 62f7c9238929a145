use anyhow::{Context, Result};
use serde::Serialize;
use startup_dashboard::config::DEFAULT_DATA_FILE;

/// One generated row, serialised with the ranking file's column names.
#[derive(Serialize)]
struct StartupRow {
    #[serde(rename = "Rank")]
    rank: u32,
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Sector")]
    sector: String,
    #[serde(rename = "Location")]
    location: &'static str,
    #[serde(rename = "Launch Year")]
    launch_year: u32,
    #[serde(rename = "Employees")]
    employees: u32,
    #[serde(rename = "Total Funding (€M)")]
    total_funding: f64,
    #[serde(rename = "2-yr Revenue CAGR (%)")]
    revenue_cagr: f64,
}

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const CITIES: [&str; 6] = ["Berlin", "Munich", "Hamburg", "Cologne", "Frankfurt", "Leipzig"];

// (industry, segments); an empty segment list yields a bare sector label.
const SECTORS: [(&str, &[&str]); 6] = [
    ("FinTech", &["Payments", "Banking", "Insurance"]),
    ("HealthTech", &["Diagnostics", "Digital Health"]),
    ("Climate", &["Energy", "Mobility"]),
    ("SaaS", &["HR", "Sales", "Developer Tools"]),
    ("Mobility", &["Logistics"]),
    ("AI", &[]),
];

const NAME_PARTS: [&str; 8] = ["Nova", "Flux", "Kite", "Orbit", "Pixel", "Quant", "Ember", "Lumen"];
const NAME_SUFFIXES: [&str; 5] = ["ly", "io", "base", "works", "hub"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut rows: Vec<StartupRow> = (0..50)
        .map(|i| {
            let (industry, segments) = rng.pick(&SECTORS);
            let sector = if segments.is_empty() {
                industry.to_string()
            } else {
                format!("{industry} - {}", rng.pick(segments))
            };
            StartupRow {
                rank: 0,
                company: format!("{}{}{i}", rng.pick(&NAME_PARTS), rng.pick(&NAME_SUFFIXES)),
                sector,
                location: *rng.pick(&CITIES),
                launch_year: 2010 + (rng.next_u64() % 13) as u32,
                employees: rng.range(10.0, 600.0) as u32,
                total_funding: (rng.range(1.0, 400.0) * 10.0).round() / 10.0,
                revenue_cagr: rng.range(40.0, 900.0).round(),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.revenue_cagr.total_cmp(&a.revenue_cagr));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for row in &rows {
        writer.serialize(row).context("writing row")?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {} startups to {output_path}", rows.len());
    Ok(())
}
