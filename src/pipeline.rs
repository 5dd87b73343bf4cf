//! This module provides the main entry point of the crate: [`RankingPipeline`], which turns
//! coordinates and region catalogs into energy estimates and ranked snapshots.

use crate::astronomy::{daylight_hours, declination_for};
use crate::cache::BoundedCache;
use crate::catalog::RegionCatalog;
use crate::clock::{Clock, SystemClock};
use crate::config::SolarConfig;
use crate::energy::EnergyModel;
use crate::error::SolarError;
use crate::gateways::{GeoNameGateway, WeatherGateway};
use crate::persistence::error::PersistenceError;
use crate::persistence::SnapshotStore;
use crate::sources::{NominatimClient, OpenMeteoClient, ReverseGeocoder, WeatherSource};
use crate::types::coordinate::Coordinate;
use crate::types::energy_result::EnergyResult;
use crate::types::ranked_snapshot::RankedSnapshot;
use crate::utils::round_to;
use bon::bon;
use chrono::{NaiveDate, NaiveTime, Timelike};
use log::info;
use reqwest::Client;

/// Computes solar energy estimates for single points and for whole region catalogs.
///
/// The pipeline itself keeps no mutable state; all memoization lives in the two gateways
/// it is built from. Construct one with [`RankingPipeline::from_config`] for the real
/// upstream services, or with [`RankingPipeline::new`] to supply your own gateways.
///
/// # Examples
///
/// ```no_run
/// # use solar_rank::{Coordinate, RankingPipeline, SolarConfig, SolarError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), SolarError> {
/// let pipeline = RankingPipeline::from_config(&SolarConfig::default())?;
/// let delhi = Coordinate::new(28.6139, 77.2090)?;
///
/// let result = pipeline
///     .compute_single()
///     .coordinate(delhi)
///     .date(pipeline.today())
///     .call()
///     .await;
/// println!("{} could collect {} MJ/m² today", result.region_name, result.energy_mj);
/// # Ok(())
/// # }
/// ```
pub struct RankingPipeline<W = OpenMeteoClient, G = NominatimClient> {
    weather: WeatherGateway<W>,
    geo_names: GeoNameGateway<G>,
    energy: EnergyModel,
    top_n: usize,
    clock: Box<dyn Clock>,
}

impl RankingPipeline {
    /// Builds a pipeline against Open-Meteo and Nominatim.
    ///
    /// Both sources share one pooled HTTP client carrying the configured user agent and
    /// timeout. Each gateway gets its own cache of `cache_capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`SolarError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_config(config: &SolarConfig) -> Result<Self, SolarError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(SolarError::HttpClient)?;

        let weather = WeatherGateway::new(
            OpenMeteoClient::new(client.clone(), config.weather_endpoint.as_str()),
            BoundedCache::new(config.cache_capacity),
            config.request_timeout(),
        );
        let geo_names = GeoNameGateway::new(
            NominatimClient::new(client, config.geocode_endpoint.as_str(), config.geocode_zoom),
            BoundedCache::new(config.cache_capacity),
            config.request_timeout(),
        );

        Ok(Self::new(weather, geo_names, config))
    }
}

#[bon]
impl<W: WeatherSource, G: ReverseGeocoder> RankingPipeline<W, G> {
    /// Assembles a pipeline from ready-made gateways. Only `solar_constant` and `top_n`
    /// are read from `config`; the gateways carry their own timeouts and caches.
    pub fn new(weather: WeatherGateway<W>, geo_names: GeoNameGateway<G>, config: &SolarConfig) -> Self {
        Self {
            weather,
            geo_names,
            energy: EnergyModel::new(config.solar_constant),
            top_n: config.top_n,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the wall clock used to stamp results.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn weather(&self) -> &WeatherGateway<W> {
        &self.weather
    }

    pub fn geo_names(&self) -> &GeoNameGateway<G> {
        &self.geo_names
    }

    pub fn energy_model(&self) -> &EnergyModel {
        &self.energy
    }

    /// Today's date according to the pipeline's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Estimates the energy available at one point on `date`.
    ///
    /// The region name comes from `.region_name(..)` when given and not blank; otherwise
    /// it is resolved through the geocoding gateway. Nothing is cached at this level.
    ///
    /// # Arguments
    ///
    /// * `.coordinate(Coordinate)`: **Required.** The point to estimate.
    /// * `.date(NaiveDate)`: **Required.** Day whose declination to use.
    /// * `.region_name(&str)`: Optional. Name to report instead of resolving one.
    #[builder]
    pub async fn compute_single(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        region_name: Option<&str>,
    ) -> EnergyResult {
        let region_name = match region_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => name.to_string(),
            None => self.geo_names.resolve(coordinate).await,
        };
        let declination = declination_for(date);
        self.estimate(region_name, coordinate, date, declination, self.stamp())
            .await
    }

    /// Estimates every region in `catalog` for `date` and keeps the best `top_n`.
    ///
    /// Regions are visited in catalog order with one declination and one time stamp for
    /// the whole pass. Names come from the catalog and are never resolved. An empty
    /// catalog yields an empty snapshot.
    pub async fn compute_ranked_snapshot(
        &self,
        catalog: &RegionCatalog,
        date: NaiveDate,
    ) -> RankedSnapshot {
        let declination = declination_for(date);
        let time = self.stamp();

        let mut results = Vec::with_capacity(catalog.len());
        for region in catalog.iter() {
            let result = self
                .estimate(region.name.clone(), region.coordinate, date, declination, time)
                .await;
            results.push(result);
        }

        RankedSnapshot::rank(results, self.top_n)
    }

    /// Computes a ranked snapshot and hands it to `store`, replacing whatever was there.
    pub async fn refresh_snapshot<S: SnapshotStore>(
        &self,
        catalog: &RegionCatalog,
        date: NaiveDate,
        store: &S,
    ) -> Result<RankedSnapshot, PersistenceError> {
        let snapshot = self.compute_ranked_snapshot(catalog, date).await;
        store.replace(&snapshot).await?;
        info!(
            "Ranked {} regions for {}, kept top {}",
            catalog.len(),
            date,
            snapshot.len()
        );
        Ok(snapshot)
    }

    async fn estimate(
        &self,
        region_name: String,
        coordinate: Coordinate,
        date: NaiveDate,
        declination: f64,
        time: NaiveTime,
    ) -> EnergyResult {
        let daylight = daylight_hours(coordinate.latitude(), declination);
        let weather = self.weather.fetch(coordinate).await;
        let intensity = self.energy.solar_intensity(weather.cloud_cover_percent);
        let energy_mj = self.energy.energy(intensity, daylight);

        EnergyResult {
            region_name,
            date,
            time,
            temperature_celsius: weather.temperature_celsius,
            cloud_cover_percent: round_to(weather.cloud_cover_percent, 2),
            solar_intensity: intensity,
            daylight_hours: round_to(daylight, 2),
            energy_mj,
        }
    }

    fn stamp(&self) -> NaiveTime {
        let time = self.clock.now().time();
        time.with_nanosecond(0).unwrap_or(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomy::declination_angle;
    use crate::clock::FixedClock;
    use crate::energy::calculate_energy;
    use crate::test_support::{CallCounter, MemorySnapshotStore, StubGeocoder, StubWeather};
    use crate::types::region::RegionEntry;
    use crate::types::weather_sample::WeatherSample;
    use chrono::NaiveDateTime;
    use std::time::Duration;

    const CLEAR: WeatherSample = WeatherSample {
        temperature_celsius: 25.0,
        cloud_cover_percent: 0.0,
    };

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_nano_opt(12, 34, 56, 789_000_000)
            .unwrap()
    }

    fn pipeline_with(
        weather: StubWeather,
        geocoder: StubGeocoder,
        config: &SolarConfig,
    ) -> RankingPipeline<StubWeather, StubGeocoder> {
        let timeout = Duration::from_millis(50);
        RankingPipeline::new(
            WeatherGateway::new(weather, BoundedCache::new(config.cache_capacity), timeout),
            GeoNameGateway::new(geocoder, BoundedCache::new(config.cache_capacity), timeout),
            config,
        )
        .with_clock(FixedClock(noon()))
    }

    fn clear_sky_pipeline() -> (RankingPipeline<StubWeather, StubGeocoder>, CallCounter) {
        let geocoder = StubGeocoder::answering(Some("Resolved Town"));
        let geocoder_calls = geocoder.call_counter();
        let pipeline = pipeline_with(StubWeather::answering(CLEAR), geocoder, &SolarConfig::default());
        (pipeline, geocoder_calls)
    }

    fn point(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn day(ordinal: u32) -> NaiveDate {
        NaiveDate::from_yo_opt(2024, ordinal).unwrap()
    }

    #[tokio::test]
    async fn single_result_combines_the_models() {
        let (pipeline, _) = clear_sky_pipeline();
        let date = day(80);

        let result = pipeline
            .compute_single()
            .coordinate(point(10.0, 20.0))
            .date(date)
            .region_name("Here")
            .call()
            .await;

        let daylight = daylight_hours(10.0, declination_angle(80));
        assert_eq!(result.region_name, "Here");
        assert_eq!(result.date, date);
        assert_eq!(result.time, NaiveTime::from_hms_opt(12, 34, 56).unwrap());
        assert_eq!(result.temperature_celsius, 25.0);
        assert_eq!(result.cloud_cover_percent, 0.0);
        assert_eq!(result.solar_intensity, 1367.0);
        assert_eq!(result.daylight_hours, round_to(daylight, 2));
        assert_eq!(result.energy_mj, calculate_energy(1367.0, daylight));
    }

    #[tokio::test]
    async fn override_skips_resolution_and_blank_override_does_not() {
        let (pipeline, geocoder_calls) = clear_sky_pipeline();

        let named = pipeline
            .compute_single()
            .coordinate(point(18.52, 73.85))
            .date(day(100))
            .region_name("My Roof")
            .call()
            .await;
        assert_eq!(named.region_name, "My Roof");
        assert_eq!(geocoder_calls.get(), 0);

        let blank = pipeline
            .compute_single()
            .coordinate(point(18.52, 73.85))
            .date(day(100))
            .region_name("   ")
            .call()
            .await;
        assert_eq!(blank.region_name, "Resolved Town");
        assert_eq!(geocoder_calls.get(), 1);

        let absent = pipeline
            .compute_single()
            .coordinate(point(22.57, 88.36))
            .date(day(100))
            .maybe_region_name(None)
            .call()
            .await;
        assert_eq!(absent.region_name, "Resolved Town");
        assert_eq!(geocoder_calls.get(), 2);
    }

    #[tokio::test]
    async fn cloud_cover_is_rounded_and_drives_intensity() {
        let weather = StubWeather::answering(WeatherSample {
            temperature_celsius: 30.0,
            cloud_cover_percent: 100.0 / 3.0,
        });
        let pipeline = pipeline_with(weather, StubGeocoder::failing(), &SolarConfig::default());

        let result = pipeline
            .compute_single()
            .coordinate(point(0.0, 0.0))
            .date(day(80))
            .call()
            .await;

        assert_eq!(result.region_name, "Unknown");
        assert_eq!(result.cloud_cover_percent, 33.33);
        assert_eq!(result.solar_intensity, 911.33);
    }

    #[tokio::test]
    async fn mean_cloud_cover_ties_round_to_even() {
        let sample = WeatherSample::from_readings(20.0, &[10.0, 10.0, 10.0, 10.0, 15.0, 15.0, 15.0, 12.0]);
        assert_eq!(sample.cloud_cover_percent, 12.125);
        let pipeline = pipeline_with(StubWeather::answering(sample), StubGeocoder::failing(), &SolarConfig::default());

        let result = pipeline
            .compute_single()
            .coordinate(point(0.0, 0.0))
            .date(day(80))
            .region_name("Tie")
            .call()
            .await;
        assert_eq!(result.cloud_cover_percent, 12.12);
    }

    #[tokio::test]
    async fn configured_solar_constant_is_used() {
        let config = SolarConfig::builder().solar_constant(1000.0).build();
        let pipeline = pipeline_with(StubWeather::answering(CLEAR), StubGeocoder::failing(), &config);

        let result = pipeline
            .compute_single()
            .coordinate(point(0.0, 0.0))
            .date(day(80))
            .region_name("Eq")
            .call()
            .await;
        assert_eq!(result.solar_intensity, 1000.0);
    }

    #[tokio::test]
    async fn weather_outage_still_produces_a_result() {
        let pipeline = pipeline_with(StubWeather::failing(), StubGeocoder::failing(), &SolarConfig::default());

        let result = pipeline
            .compute_single()
            .coordinate(point(12.0, 77.0))
            .date(day(200))
            .call()
            .await;
        assert_eq!(result.temperature_celsius, 25.0);
        assert_eq!(result.cloud_cover_percent, 0.0);
        assert_eq!(result.solar_intensity, 1367.0);
    }

    fn fifteen_regions() -> RegionCatalog {
        let latitudes = [
            0.0, 20.0, -20.0, 20.0, 40.0, -40.0, 0.0, 60.0, -60.0, 20.0, 10.0, -10.0, 30.0,
            -30.0, 50.0,
        ];
        latitudes
            .iter()
            .enumerate()
            .map(|(i, lat)| RegionEntry::new(format!("R{i:02}"), point(*lat, i as f64)))
            .collect()
    }

    #[tokio::test]
    async fn snapshot_keeps_top_ten_sorted_and_stable() {
        let (pipeline, geocoder_calls) = clear_sky_pipeline();
        // June: the further north, the longer the day.
        let snapshot = pipeline.compute_ranked_snapshot(&fifteen_regions(), day(172)).await;

        assert_eq!(snapshot.len(), 10);
        let names: Vec<_> = snapshot.iter().map(|r| r.region_name.as_str()).collect();
        assert_eq!(
            names,
            ["R07", "R14", "R04", "R12", "R01", "R03", "R09", "R10", "R00", "R06"]
        );
        for pair in snapshot.entries().windows(2) {
            assert!(pair[0].energy_mj >= pair[1].energy_mj);
        }
        // Catalog names are never looked up.
        assert_eq!(geocoder_calls.get(), 0);
    }

    #[tokio::test]
    async fn snapshot_rows_share_date_and_time() {
        let (pipeline, _) = clear_sky_pipeline();
        let snapshot = pipeline.compute_ranked_snapshot(&fifteen_regions(), day(172)).await;

        for row in &snapshot {
            assert_eq!(row.date, day(172));
            assert_eq!(row.time, NaiveTime::from_hms_opt(12, 34, 56).unwrap());
        }
    }

    #[tokio::test]
    async fn top_n_comes_from_config() {
        let config = SolarConfig::builder().top_n(3).build();
        let pipeline = pipeline_with(StubWeather::answering(CLEAR), StubGeocoder::failing(), &config);

        let snapshot = pipeline.compute_ranked_snapshot(&fifteen_regions(), day(172)).await;
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.entries()[0].region_name, "R07");
    }

    #[tokio::test]
    async fn cloudy_regions_drop_in_the_ranking() {
        let overcast = WeatherSample {
            temperature_celsius: 15.0,
            cloud_cover_percent: 90.0,
        };
        let catalog: RegionCatalog = vec![
            RegionEntry::new("Cloudy", point(30.0, 70.0)),
            RegionEntry::new("Sunny", point(10.0, 70.0)),
        ]
        .into_iter()
        .collect();
        let weather = StubWeather::answering(CLEAR).with_sample_at(point(30.0, 70.0), overcast);
        let pipeline = pipeline_with(weather, StubGeocoder::failing(), &SolarConfig::default());

        let snapshot = pipeline.compute_ranked_snapshot(&catalog, day(172)).await;
        let names: Vec<_> = snapshot.iter().map(|r| r.region_name.as_str()).collect();
        assert_eq!(names, ["Sunny", "Cloudy"]);
        assert_eq!(snapshot.entries()[1].temperature_celsius, 15.0);
        assert_eq!(snapshot.entries()[1].solar_intensity, 136.7);
    }

    #[tokio::test]
    async fn empty_catalog_gives_empty_snapshot() {
        let (pipeline, _) = clear_sky_pipeline();
        let snapshot = pipeline
            .compute_ranked_snapshot(&RegionCatalog::default(), day(1))
            .await;
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn two_region_equinox_example() {
        let catalog: RegionCatalog = vec![
            RegionEntry::new("A", point(10.0, 20.0)),
            RegionEntry::new("B", point(-5.0, 40.0)),
        ]
        .into_iter()
        .collect();
        let (pipeline, _) = clear_sky_pipeline();

        let snapshot = pipeline.compute_ranked_snapshot(&catalog, day(80)).await;

        assert_eq!(snapshot.len(), 2);
        for row in &snapshot {
            assert_eq!(row.solar_intensity, 1367.0);
        }
        let (first, second) = (&snapshot.entries()[0], &snapshot.entries()[1]);
        assert_eq!(first.region_name, "B");
        assert_eq!(second.region_name, "A");
        assert!(first.daylight_hours > second.daylight_hours);
        assert!(first.energy_mj > second.energy_mj);
    }

    #[tokio::test]
    async fn repeated_passes_reuse_cached_weather() {
        let weather = StubWeather::answering(CLEAR);
        let weather_calls = weather.call_counter();
        let pipeline = pipeline_with(weather, StubGeocoder::failing(), &SolarConfig::default());
        let catalog = fifteen_regions();

        pipeline.compute_ranked_snapshot(&catalog, day(172)).await;
        pipeline.compute_ranked_snapshot(&catalog, day(173)).await;
        assert_eq!(weather_calls.get(), 15);
    }

    #[tokio::test]
    async fn refresh_replaces_the_stored_snapshot() -> Result<(), PersistenceError> {
        let (pipeline, _) = clear_sky_pipeline();
        let store = MemorySnapshotStore::default();

        let first = pipeline
            .refresh_snapshot(&fifteen_regions(), day(172), &store)
            .await?;
        assert_eq!(store.load().await?, first);

        let second = pipeline
            .refresh_snapshot(&RegionCatalog::default(), day(172), &store)
            .await?;
        assert!(second.is_empty());
        assert!(store.load().await?.is_empty());
        assert_eq!(store.replacements(), 2);
        Ok(())
    }
}
