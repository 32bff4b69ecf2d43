//! Event timing resolution
//!
//! Resolves each event's `(start_year, duration)` once per trial. The two
//! referential methods (`SameYearAs`, `YearAfterEndOf`) recurse through the
//! event graph; results are memoized in a cache owned by this resolver, so
//! concurrent trials never share timing state. A cycle among referential
//! dependencies is a fatal error for the trial.

use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::TimingError;
use crate::model::{Distribution, DurationSpec, Event, StartSpec};

/// Resolved activity window: active years are `[start_year, start_year + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start_year: i32,
    pub duration: i32,
}

impl EventWindow {
    /// Exclusive end year.
    #[must_use]
    pub fn end_year(&self) -> i32 {
        self.start_year + self.duration
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start_year && year < self.end_year()
    }

    /// Whole years since the window opened. Negative before the start year.
    #[must_use]
    pub fn years_elapsed(&self, year: i32) -> i32 {
        year - self.start_year
    }
}

/// Per-trial timing resolver with memoization and cycle detection.
pub struct TimingResolver<'a> {
    events: FxHashMap<&'a str, &'a Event>,
    cache: FxHashMap<String, EventWindow>,
    resolving: FxHashSet<String>,
    current_year: i32,
}

impl<'a> TimingResolver<'a> {
    #[must_use]
    pub fn new(events: &'a [Event], current_year: i32) -> Self {
        TimingResolver {
            events: events.iter().map(|e| (e.name.as_str(), e)).collect(),
            cache: FxHashMap::default(),
            resolving: FxHashSet::default(),
            current_year,
        }
    }

    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        name: &str,
    ) -> Result<EventWindow, TimingError> {
        if let Some(window) = self.cache.get(name) {
            return Ok(*window);
        }
        if !self.resolving.insert(name.to_string()) {
            return Err(TimingError::CircularDependency(name.to_string()));
        }

        let event = *self
            .events
            .get(name)
            .ok_or_else(|| TimingError::UnknownEvent(name.to_string()))?;

        let start_year = match &event.start {
            None => self.current_year,
            Some(StartSpec::Fixed { year }) => *year,
            Some(StartSpec::Normal { mean, std_dev }) => Distribution::Normal {
                mean: *mean,
                std_dev: *std_dev,
            }
            .sample_year(rng, self.current_year)?,
            Some(StartSpec::Uniform { lower, upper }) => Distribution::Uniform {
                lower: *lower,
                upper: *upper,
            }
            .sample_year(rng, self.current_year)?,
            Some(StartSpec::SameYearAs { event }) => self.resolve(rng, event)?.start_year,
            Some(StartSpec::YearAfterEndOf { event }) => self.resolve(rng, event)?.end_year(),
        };

        let duration = match &event.duration {
            DurationSpec::Fixed { years } => (*years).max(1),
            DurationSpec::Normal { mean, std_dev } => Distribution::Normal {
                mean: *mean,
                std_dev: *std_dev,
            }
            .sample_year(rng, 1)?,
            DurationSpec::Uniform { lower, upper } => Distribution::Uniform {
                lower: *lower,
                upper: *upper,
            }
            .sample_year(rng, 1)?,
        };

        self.resolving.remove(name);
        let window = EventWindow {
            start_year,
            duration,
        };
        self.cache.insert(name.to_string(), window);
        Ok(window)
    }
}
