use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// ============ Report Rows ============

/// Average fare for one city; one entry per distinct city.
#[derive(Debug, Clone, Serialize)]
pub struct CityFare {
    /// City name as stored in the `trips` table.
    pub city: String,
    /// Mean of all fares recorded for this city.
    pub avg_fare: f64,
}

/// One of the longest trips, by duration.
#[derive(Debug, Clone, Serialize)]
pub struct TopTrip {
    /// City the trip took place in.
    pub city: String,
    /// Trip duration in minutes.
    pub minutes: i32,
    /// Fare charged for the trip.
    pub fare: f64,
}

// ============ Summary Document ============

/// The assembled summary document.
///
/// Serializes as a mapping with exactly three entries, in this order:
/// `total_trips`, `avg_fare_by_city`, and `top_{N}_longest_trips` where
/// `N` is the configured top-N count. The third key is computed at
/// serialization time, so `Serialize` is implemented by hand rather than
/// derived against a fixed schema.
#[derive(Debug, Clone)]
pub struct Summary {
    pub total_trips: i64,
    pub avg_fare_by_city: Vec<CityFare>,
    pub top_trips: Vec<TopTrip>,
    pub top_n: i64,
}

impl Summary {
    /// Combines the three query results into the summary document.
    /// Pure assembly; nothing is validated or reordered here.
    pub fn new(
        total_trips: i64,
        avg_fare_by_city: Vec<CityFare>,
        top_trips: Vec<TopTrip>,
        top_n: i64,
    ) -> Self {
        Self {
            total_trips,
            avg_fare_by_city,
            top_trips,
            top_n,
        }
    }
}

/// Key name for the top-trips list, e.g. `top_5_longest_trips` for N = 5.
pub fn top_trips_key(top_n: i64) -> String {
    format!("top_{}_longest_trips", top_n)
}

impl Serialize for Summary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("total_trips", &self.total_trips)?;
        map.serialize_entry("avg_fare_by_city", &self.avg_fare_by_city)?;
        map.serialize_entry(&top_trips_key(self.top_n), &self.top_trips)?;
        map.end()
    }
}
