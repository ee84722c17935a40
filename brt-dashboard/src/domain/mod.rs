//! Domain types for the arrivals dashboard.
//!
//! These types represent validated prediction data. Invariants are
//! enforced at construction time, so code that receives these types can
//! trust their validity.

mod prediction;
mod station;
mod stop_id;

pub use prediction::{Countdown, MarkerDescriptor, PredictionRecord, TableRow};
pub use station::{Station, StationLocation, VAZ_LOBO_LOCATION, VAZ_LOBO_STOP_ID};
pub use stop_id::{InvalidStopId, StopId};
