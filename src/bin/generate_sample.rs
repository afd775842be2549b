//! Writes synthetic `chicago.csv`, `new_york_city.csv` and `washington.csv`
//! trip logs into the directory given as the first argument (default `.`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

const TRIPS_PER_CITY: u64 = 5_000;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Row layout of the Washington log.
#[derive(Serialize)]
struct TripRow<'a> {
    #[serde(rename = "")]
    id: u64,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: &'a str,
    #[serde(rename = "End Station")]
    end_station: &'a str,
    #[serde(rename = "User Type")]
    user_type: &'a str,
}

/// Row layout of the Chicago and New York logs.
#[derive(Serialize)]
struct DemographicTripRow<'a> {
    #[serde(rename = "")]
    id: u64,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: u64,
    #[serde(rename = "Start Station")]
    start_station: &'a str,
    #[serde(rename = "End Station")]
    end_station: &'a str,
    #[serde(rename = "User Type")]
    user_type: &'a str,
    #[serde(rename = "Gender")]
    gender: Option<&'a str>,
    #[serde(rename = "Birth Year")]
    birth_year: Option<f64>,
}

/// Seeded splitmix64 stream, so every run writes the same files.
struct TripRng(u64);

impl TripRng {
    fn step(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.step() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    fn below(&mut self, n: u64) -> u64 {
        self.step() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

/// Start time between 2017-01-01 and 2017-06-30 with commute-hour peaks.
fn random_start(rng: &mut TripRng) -> NaiveDateTime {
    let day = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid base date")
        + Duration::days(rng.below(181) as i64);
    let hour = if rng.chance(0.35) {
        7 + rng.below(3)
    } else if rng.chance(0.45) {
        16 + rng.below(3)
    } else {
        rng.below(24)
    };
    day + Duration::seconds((hour * 3600 + rng.below(3600)) as i64)
}

fn write_rows<T: Serialize>(path: &Path, rows: impl Iterator<Item = T>) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing trip row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn demographic_city(
    path: &Path,
    stations: &[&str],
    user_types: &[&str],
    rng: &mut TripRng,
) -> Result<()> {
    let mut rows = Vec::with_capacity(TRIPS_PER_CITY as usize);
    for id in 0..TRIPS_PER_CITY {
        let start = random_start(rng);
        let duration = 60 + rng.below(2_400);
        let user_type = rng.pick(user_types);
        let has_profile = user_type != "Customer" && rng.chance(0.95);
        rows.push(DemographicTripRow {
            id: 1_000_000 + id * 7,
            start_time: start.format(TIMESTAMP_FORMAT).to_string(),
            end_time: (start + Duration::seconds(duration as i64))
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            trip_duration: duration,
            start_station: rng.pick(stations),
            end_station: rng.pick(stations),
            user_type,
            gender: has_profile.then(|| rng.pick(&["Male", "Male", "Female"])),
            birth_year: has_profile.then(|| (1950 + rng.below(50)) as f64),
        });
    }
    write_rows(path, rows.into_iter())
}

fn washington(path: &Path, stations: &[&str], rng: &mut TripRng) -> Result<()> {
    let mut rows = Vec::with_capacity(TRIPS_PER_CITY as usize);
    for id in 0..TRIPS_PER_CITY {
        let start = random_start(rng);
        let duration = 60.0 + (rng.unit() * 2_400_000.0).round() / 1000.0;
        rows.push(TripRow {
            id: 1_500_000 + id * 3,
            start_time: start.format(TIMESTAMP_FORMAT).to_string(),
            end_time: (start + Duration::milliseconds((duration * 1000.0) as i64))
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            trip_duration: duration,
            start_station: rng.pick(stations),
            end_station: rng.pick(stations),
            user_type: rng.pick(&["Subscriber", "Subscriber", "Subscriber", "Customer"]),
        });
    }
    write_rows(path, rows.into_iter())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut rng = TripRng(42);

    demographic_city(
        &out_dir.join("chicago.csv"),
        &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Wood St & Hubbard St",
            "Theater on the Lake",
        ],
        &["Subscriber", "Subscriber", "Subscriber", "Customer", "Dependent"],
        &mut rng,
    )?;
    demographic_city(
        &out_dir.join("new_york_city.csv"),
        &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "Broadway & E 22 St",
            "West St & Chambers St",
            "12 Ave & W 40 St",
        ],
        &["Subscriber", "Subscriber", "Subscriber", "Customer"],
        &mut rng,
    )?;
    washington(
        &out_dir.join("washington.csv"),
        &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
            "14th & Belmont St NW",
        ],
        &mut rng,
    )?;

    println!(
        "Wrote {TRIPS_PER_CITY} trips per city to {}",
        out_dir.display()
    );
    Ok(())
}
