//! In-process stand-ins for the upstream services.

use crate::persistence::error::PersistenceError;
use crate::persistence::SnapshotStore;
use crate::sources::error::SourceError;
use crate::sources::{ReverseGeocoder, WeatherSource};
use crate::types::coordinate::{CacheKey, Coordinate};
use crate::types::ranked_snapshot::RankedSnapshot;
use crate::types::weather_sample::WeatherSample;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub(crate) struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
enum Behaviour<T> {
    Answer(T),
    Fail,
    Stall(Duration),
}

pub(crate) struct StubWeather {
    behaviour: Behaviour<WeatherSample>,
    per_point: HashMap<CacheKey, WeatherSample>,
    calls: CallCounter,
    seen: Arc<Mutex<Vec<Coordinate>>>,
}

impl StubWeather {
    fn with(behaviour: Behaviour<WeatherSample>) -> Self {
        Self {
            behaviour,
            per_point: HashMap::new(),
            calls: CallCounter::default(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn answering(sample: WeatherSample) -> Self {
        Self::with(Behaviour::Answer(sample))
    }

    pub(crate) fn failing() -> Self {
        Self::with(Behaviour::Fail)
    }

    pub(crate) fn stalling(delay: Duration) -> Self {
        Self::with(Behaviour::Stall(delay))
    }

    /// Answers `sample` for points rounding to `at`, whatever the default behaviour.
    pub(crate) fn with_sample_at(mut self, at: Coordinate, sample: WeatherSample) -> Self {
        self.per_point.insert(at.cache_key(), sample);
        self
    }

    pub(crate) fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }

    pub(crate) fn seen_coordinates(&self) -> Arc<Mutex<Vec<Coordinate>>> {
        Arc::clone(&self.seen)
    }
}

impl WeatherSource for StubWeather {
    fn current_weather(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<WeatherSample, SourceError>> + Send {
        self.calls.bump();
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(at);
        }
        let per_point = self.per_point.get(&at.cache_key()).copied();
        let behaviour = self.behaviour.clone();
        async move {
            if let Some(sample) = per_point {
                return Ok(sample);
            }
            match behaviour {
                Behaviour::Answer(sample) => Ok(sample),
                Behaviour::Fail => Err(SourceError::Unavailable("connection refused".to_string())),
                Behaviour::Stall(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(WeatherSample {
                        temperature_celsius: -1.0,
                        cloud_cover_percent: 100.0,
                    })
                }
            }
        }
    }
}

pub(crate) struct StubGeocoder {
    behaviour: Behaviour<Option<String>>,
    calls: CallCounter,
}

impl StubGeocoder {
    pub(crate) fn answering(name: Option<&str>) -> Self {
        Self {
            behaviour: Behaviour::Answer(name.map(str::to_string)),
            calls: CallCounter::default(),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            behaviour: Behaviour::Fail,
            calls: CallCounter::default(),
        }
    }

    pub(crate) fn stalling(delay: Duration) -> Self {
        Self {
            behaviour: Behaviour::Stall(delay),
            calls: CallCounter::default(),
        }
    }

    pub(crate) fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }
}

impl ReverseGeocoder for StubGeocoder {
    fn place_name(
        &self,
        _at: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, SourceError>> + Send {
        self.calls.bump();
        let behaviour = self.behaviour.clone();
        async move {
            match behaviour {
                Behaviour::Answer(name) => Ok(name),
                Behaviour::Fail => Err(SourceError::Unavailable("service down".to_string())),
                Behaviour::Stall(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(Some("Too Late".to_string()))
                }
            }
        }
    }
}

/// Keeps the latest snapshot in memory and counts replacements.
#[derive(Default)]
pub(crate) struct MemorySnapshotStore {
    current: Mutex<RankedSnapshot>,
    replacements: CallCounter,
}

impl MemorySnapshotStore {
    pub(crate) fn replacements(&self) -> usize {
        self.replacements.get()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn replace(
        &self,
        snapshot: &RankedSnapshot,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send {
        self.replacements.bump();
        if let Ok(mut current) = self.current.lock() {
            *current = snapshot.clone();
        }
        async { Ok(()) }
    }

    fn load(&self) -> impl Future<Output = Result<RankedSnapshot, PersistenceError>> + Send {
        let current = self
            .current
            .lock()
            .map(|current| current.clone())
            .unwrap_or_default();
        async move { Ok(current) }
    }
}
