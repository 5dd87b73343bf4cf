pub mod coordinate;
pub mod energy_result;
pub mod fetched;
pub mod ranked_snapshot;
pub mod region;
pub mod weather_sample;
