/// Derived-view engine: aggregation and filtering over the entry collection
///
/// Every function here is pure and total - deterministic given the same
/// entries and reference date, no side effects, and well-defined over the
/// empty collection. The clock is always a parameter so the views stay
/// testable; callers pass `Local::now().date_naive()` for live data.

pub mod export;

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};

use crate::domain::{EnergyEntry, EnergyLevel, EntryId, TobaccoUrge, DAILY_WATER_TARGET_ML};

/// Start of the timeline window (06:00 local)
pub const TIMELINE_START_HOUR: u32 = 6;
/// End of the timeline window (23:00 local)
pub const TIMELINE_END_HOUR: u32 = 23;

/// Entries whose local calendar date equals `date`
///
/// Equality is by calendar date only, not a 24-hour window, so an entry
/// logged at 00:05 belongs to the new day.
pub fn entries_on(entries: &[EnergyEntry], date: NaiveDate) -> Vec<&EnergyEntry> {
    entries.iter().filter(|e| e.local_date() == date).collect()
}

/// One day of the rolling 7-day series
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Short weekday label for the chart axis ("Mon", "Tue", ...)
    pub weekday_label: String,
    /// Mean level across the day's entries; 0.0 when the day has none.
    /// 0.0 doubles as the plot floor, so check `entry_count` to tell
    /// "no data" apart from it.
    pub average_level: f64,
    pub entry_count: usize,
    /// Whether any entry that day recorded a strong tobacco urge
    pub strong_urge: bool,
}

/// Mean level per day for the 7 calendar days ending at `today`
///
/// Always exactly 7 elements, oldest first, today last.
pub fn weekly_series(entries: &[EnergyEntry], today: NaiveDate) -> Vec<DaySummary> {
    (0..7i64)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let day_entries = entries_on(entries, date);
            let average_level = if day_entries.is_empty() {
                0.0
            } else {
                let sum: u32 = day_entries.iter().map(|e| e.level.get() as u32).sum();
                sum as f64 / day_entries.len() as f64
            };
            DaySummary {
                date,
                weekday_label: date.format("%a").to_string(),
                average_level,
                entry_count: day_entries.len(),
                strong_urge: day_entries.iter().any(|e| e.tobacco_urge == TobaccoUrge::Strong),
            }
        })
        .collect()
}

/// Fractional position of a timestamp within the 06:00-23:00 window
///
/// Out-of-window times clamp to 0.0 or 1.0.
pub fn timeline_position(timestamp: &DateTime<Local>) -> f64 {
    let total_minutes = ((TIMELINE_END_HOUR - TIMELINE_START_HOUR) * 60) as f64;
    let minutes =
        (timestamp.hour() * 60 + timestamp.minute()) as f64 - (TIMELINE_START_HOUR * 60) as f64;
    (minutes / total_minutes).clamp(0.0, 1.0)
}

/// An entry positioned on the today timeline
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub id: EntryId,
    /// Normalized position in [0, 1] across the timeline window
    pub position: f64,
    pub level: EnergyLevel,
}

/// Timeline points for the entries belonging to `today`
pub fn today_timeline(entries: &[EnergyEntry], today: NaiveDate) -> Vec<TimelinePoint> {
    entries_on(entries, today)
        .into_iter()
        .map(|e| TimelinePoint {
            id: e.id.clone(),
            position: timeline_position(&e.timestamp),
            level: e.level,
        })
        .collect()
}

/// Percentage of low-energy entries (level 1-2) with a strong tobacco urge
///
/// Rounded to the nearest integer; 0 when there are no low-energy entries.
pub fn urge_correlation(entries: &[EnergyEntry]) -> u32 {
    let low: Vec<_> = entries.iter().filter(|e| e.level.get() <= 2).collect();
    if low.is_empty() {
        return 0;
    }
    let strong = low
        .iter()
        .filter(|e| e.tobacco_urge == TobaccoUrge::Strong)
        .count();
    ((strong as f64 / low.len() as f64) * 100.0).round() as u32
}

/// Entries sharing one local calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    /// Day/month/year label the history list renders as the bucket heading
    pub date_label: String,
    pub entries: Vec<&'a EnergyEntry>,
}

/// Whether an entry matches a search term across notes, factors and type
fn matches_search(entry: &EnergyEntry, needle: &str) -> bool {
    entry.notes.to_lowercase().contains(needle)
        || entry.factors.iter().any(|f| f.to_lowercase().contains(needle))
        || entry.energy_type.label().to_lowercase().contains(needle)
}

/// Group entries by local calendar date, optionally filtered by a search term
///
/// The term matches case-insensitively as a substring of the notes, any
/// factor tag, or the energy type. Buckets appear in order of first
/// occurrence and keep their entries in collection order, so a
/// most-recent-first collection yields reverse-chronological buckets.
pub fn group_by_date<'a>(entries: &'a [EnergyEntry], search: &str) -> Vec<DateGroup<'a>> {
    let needle = search.trim().to_lowercase();
    let mut groups: Vec<DateGroup<'a>> = Vec::new();

    for entry in entries {
        if !needle.is_empty() && !matches_search(entry, &needle) {
            continue;
        }
        let label = entry.local_date().format("%d/%m/%Y").to_string();
        match groups.iter_mut().find(|g| g.date_label == label) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DateGroup {
                date_label: label,
                entries: vec![entry],
            }),
        }
    }

    groups
}

/// Aggregate figures for the today snapshot card
#[derive(Debug, Clone, PartialEq)]
pub struct TodayStats {
    pub entry_count: usize,
    /// Mean level rounded to one decimal; None when there are no entries
    pub average_level: Option<f64>,
    /// Total fluid intake across today's entries, in millilitres
    pub water_ml_total: u32,
    pub water_target_ml: u32,
    /// Highest meal count seen today - meals is a running day counter the
    /// user updates across entries, not a per-entry delta, so max not sum
    pub max_meals: u32,
}

/// Compute the today snapshot aggregates
pub fn today_stats(entries: &[EnergyEntry], today: NaiveDate) -> TodayStats {
    let todays = entries_on(entries, today);
    let entry_count = todays.len();

    let average_level = if entry_count == 0 {
        None
    } else {
        let sum: u32 = todays.iter().map(|e| e.level.get() as u32).sum();
        Some((sum as f64 / entry_count as f64 * 10.0).round() / 10.0)
    };

    TodayStats {
        entry_count,
        average_level,
        water_ml_total: todays.iter().map(|e| e.water_ml).sum(),
        water_target_ml: DAILY_WATER_TARGET_ML,
        max_meals: todays.iter().map(|e| e.meals).max().unwrap_or(0),
    }
}
