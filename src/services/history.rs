// src/services/history.rs
// Each bucket is simulated on its own from the reference price, so today's
// value differs between daily, monthly and yearly.

use chrono::{Datelike, Duration, Months, NaiveDate};
use rand::Rng;
use std::f64::consts::PI;

use crate::models::{floor_price, round2, PeriodKind, PriceHistoryBundle, PricePoint};

pub const DAILY_DAYS: i64 = 90;
pub const WEEKLY_WEEKS: i64 = 104;
pub const MONTHLY_MONTHS: u32 = 120;

const SHOCK_PROBABILITY: f64 = 0.05;
const SHOCK_WIDTH: f64 = 0.15;

/// Uniform value in `[-width / 2, width / 2)`.
pub fn noise<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * width
}

fn cycle(offset: f64, period: f64) -> f64 {
    (offset / period * 2.0 * PI).sin()
}

fn point(date: NaiveDate, raw: f64, period: PeriodKind) -> PricePoint {
    PricePoint {
        date,
        price: floor_price(round2(raw)),
        period,
    }
}

pub fn daily_series<R: Rng + ?Sized>(
    rng: &mut R,
    reference: f64,
    volatility: f64,
    today: NaiveDate,
) -> Vec<PricePoint> {
    (0..=DAILY_DAYS)
        .rev()
        .map(|i| {
            let offset = i as f64;
            let weekly = 0.01 * cycle(offset, 7.0);
            let seasonal = 0.02 * cycle(offset, 365.0);
            let raw = reference * (1.0 + weekly + seasonal) + noise(rng, volatility * reference);
            point(today - Duration::days(i), raw, PeriodKind::Daily)
        })
        .collect()
}

pub fn weekly_series<R: Rng + ?Sized>(
    rng: &mut R,
    reference: f64,
    volatility: f64,
    today: NaiveDate,
) -> Vec<PricePoint> {
    (0..=WEEKLY_WEEKS)
        .rev()
        .map(|w| {
            let offset = w as f64;
            let annual = 0.05 * cycle(offset, 52.0);
            let semi_annual = 0.03 * cycle(offset, 26.0);
            let drift = 0.0002 * offset;
            let factor = 0.95 + annual + semi_annual + drift + noise(rng, volatility * 2.0);
            point(today - Duration::weeks(w), reference * factor, PeriodKind::Monthly)
        })
        .collect()
}

pub fn monthly_series<R: Rng + ?Sized>(
    rng: &mut R,
    reference: f64,
    volatility: f64,
    today: NaiveDate,
) -> Vec<PricePoint> {
    let month_start = first_of_month(today);

    (0..=MONTHLY_MONTHS)
        .rev()
        .filter_map(|m| {
            let offset = m as f64;
            let economic = 0.08 * cycle(offset, 60.0);
            let inflation = 0.001 * offset;
            let seasonal = 0.03 * cycle(offset, 12.0);
            let variation = noise(rng, volatility * 3.0);
            let shock = if rng.gen::<f64>() < SHOCK_PROBABILITY {
                noise(rng, SHOCK_WIDTH)
            } else {
                0.0
            };
            let factor = 0.75 + economic + inflation + seasonal + variation + shock;
            let date = month_start.checked_sub_months(Months::new(m))?;
            Some(point(date, reference * factor, PeriodKind::Yearly))
        })
        .collect()
}

/// Builds all three buckets for one item.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    reference: f64,
    volatility: f64,
    today: NaiveDate,
) -> PriceHistoryBundle {
    PriceHistoryBundle {
        daily: daily_series(rng, reference, volatility, today),
        monthly: weekly_series(rng, reference, volatility, today),
        yearly: monthly_series(rng, reference, volatility, today),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
