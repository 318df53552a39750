//! The catalog of predefined Levels queries.
//!
//! Every operation the client can perform is a [`Query`]. Each query maps to
//! one immutable [`QueryTemplate`]: a GraphQL document, an optional operation
//! name and the default variables sent with it. The catalog is built once per
//! process and never mutated; range substitution works on a copy of the
//! defaults (see [`QueryTemplate::variables_at`]).
//!
//! # Range Variables
//!
//! A template that declares a `range` variable gets the resolved query window
//! written into it. A template that also declares `prevStatRange` gets the
//! comparison window derived from that resolved range.
//!
//! # Example
//!
//! ```rust
//! use levels_api::Query;
//!
//! let query: Query = "glucoseHistory".parse().unwrap();
//! let template = query.template();
//!
//! assert_eq!(template.operation_name(), Some("GlucoseMetricsHistory"));
//! assert!(template.takes_range());
//! assert!(template.takes_comparison_range());
//! ```

pub mod documents;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::range::{resolve, RangeOverride};

/// Name of the primary time-range variable.
pub const RANGE_VARIABLE: &str = "range";

/// Name of the comparison time-range variable.
pub const PREV_STAT_RANGE_VARIABLE: &str = "prevStatRange";

/// A predefined Levels operation.
///
/// The set is closed: every variant has a template in the catalog, so a
/// lookup cannot fail. Parsing a key from a string can, see
/// [`UnknownQueryError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    /// Profile of the signed-in account (`getUserData`).
    UserData,
    /// Streaks of good metabolic fitness days (`metabolicFitnessStreaks`).
    MetabolicFitnessStreaks,
    /// Heart rate samples (`heartRateMetrics`), range-bounded.
    HeartRateMetrics,
    /// Sleep logs (`sleepLogs`), range-bounded.
    SleepLogs,
    /// Sensor refresh mutation (`requestSensorRefresh`).
    RequestSensorRefresh,
    /// Activity zones (`findZones`).
    FindZones,
    /// Glucose sensor status (`getSensorStatus`).
    SensorStatus,
    /// Daily metabolic fitness score (`mfsDaily`), range-bounded.
    DailyMetabolicFitnessScore,
    /// Insight feed (`getInsights`), range-bounded.
    InsightFeed,
    /// Glucose history (`glucoseHistory`), range-bounded with a comparison range.
    GlucoseHistory,
}

impl Query {
    /// Every query in catalog order.
    pub const ALL: [Self; 10] = [
        Self::UserData,
        Self::MetabolicFitnessStreaks,
        Self::HeartRateMetrics,
        Self::SleepLogs,
        Self::RequestSensorRefresh,
        Self::FindZones,
        Self::SensorStatus,
        Self::DailyMetabolicFitnessScore,
        Self::InsightFeed,
        Self::GlucoseHistory,
    ];

    /// Returns the logical key of this query.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::UserData => "getUserData",
            Self::MetabolicFitnessStreaks => "metabolicFitnessStreaks",
            Self::HeartRateMetrics => "heartRateMetrics",
            Self::SleepLogs => "sleepLogs",
            Self::RequestSensorRefresh => "requestSensorRefresh",
            Self::FindZones => "findZones",
            Self::SensorStatus => "getSensorStatus",
            Self::DailyMetabolicFitnessScore => "mfsDaily",
            Self::InsightFeed => "getInsights",
            Self::GlucoseHistory => "glucoseHistory",
        }
    }

    /// Returns the immutable template for this query.
    #[must_use]
    pub fn template(self) -> &'static QueryTemplate {
        &catalog()[self as usize]
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Query {
    type Err = UnknownQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|query| query.key() == s)
            .ok_or_else(|| UnknownQueryError {
                name: s.to_string(),
            })
    }
}

/// Error returned when a string does not name a catalog query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown query '{name}'. Expected one of the predefined Levels queries (e.g., 'getUserData').")]
pub struct UnknownQueryError {
    /// The name that was not found.
    pub name: String,
}

/// An immutable GraphQL document with its default variables.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryTemplate {
    query: Query,
    operation_name: Option<&'static str>,
    document: &'static str,
    default_variables: Map<String, Value>,
}

impl QueryTemplate {
    fn new(
        query: Query,
        operation_name: Option<&'static str>,
        document: &'static str,
        default_variables: Value,
    ) -> Self {
        let default_variables = match default_variables {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            query,
            operation_name,
            document,
            default_variables,
        }
    }

    /// Returns the query this template belongs to.
    #[must_use]
    pub const fn query(&self) -> Query {
        self.query
    }

    /// Returns the GraphQL operation name, if the document names one.
    #[must_use]
    pub const fn operation_name(&self) -> Option<&'static str> {
        self.operation_name
    }

    /// Returns the GraphQL document text.
    #[must_use]
    pub const fn document(&self) -> &'static str {
        self.document
    }

    /// Returns the default variables, before any range substitution.
    #[must_use]
    pub const fn default_variables(&self) -> &Map<String, Value> {
        &self.default_variables
    }

    /// Returns `true` if the template declares the named variable.
    #[must_use]
    pub fn declares(&self, variable: &str) -> bool {
        self.default_variables.contains_key(variable)
    }

    /// Returns `true` if the template takes a `range` variable.
    #[must_use]
    pub fn takes_range(&self) -> bool {
        self.declares(RANGE_VARIABLE)
    }

    /// Returns `true` if the template also takes a `prevStatRange` variable.
    #[must_use]
    pub fn takes_comparison_range(&self) -> bool {
        self.takes_range() && self.declares(PREV_STAT_RANGE_VARIABLE)
    }

    /// Returns the variables to send for a call issued at `now`.
    ///
    /// The defaults are copied, never modified. Range variables are filled
    /// from `range_override` and `now`; every other variable keeps its
    /// default value.
    #[must_use]
    pub fn variables_at(
        &self,
        range_override: Option<RangeOverride>,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Map<String, Value> {
        let mut variables = self.default_variables.clone();

        if self.takes_range() {
            let range = resolve(range_override, now, offset);
            variables.insert(RANGE_VARIABLE.to_string(), json!(range));

            if self.takes_comparison_range() {
                let previous = range.comparison(offset);
                variables.insert(PREV_STAT_RANGE_VARIABLE.to_string(), json!(previous));
            }
        }

        variables
    }
}

fn catalog() -> &'static [QueryTemplate] {
    static CATALOG: OnceLock<Vec<QueryTemplate>> = OnceLock::new();
    CATALOG.get_or_init(|| Query::ALL.into_iter().map(build_template).collect())
}

fn build_template(query: Query) -> QueryTemplate {
    match query {
        Query::UserData => QueryTemplate::new(query, None, documents::USER_DATA, json!({})),
        Query::MetabolicFitnessStreaks => QueryTemplate::new(
            query,
            None,
            documents::METABOLIC_FITNESS_STREAKS,
            json!({}),
        ),
        Query::HeartRateMetrics => QueryTemplate::new(
            query,
            None,
            documents::HEART_RATE_METRICS,
            json!({ "range": [] }),
        ),
        Query::SleepLogs => QueryTemplate::new(
            query,
            Some("SleepLogs"),
            documents::SLEEP_LOGS,
            json!({ "range": [] }),
        ),
        Query::RequestSensorRefresh => QueryTemplate::new(
            query,
            None,
            documents::REQUEST_SENSOR_REFRESH,
            json!({ "priority": "user_app_focus" }),
        ),
        Query::FindZones => QueryTemplate::new(
            query,
            Some("GetZonesFromActivityCatalogue"),
            documents::FIND_ZONES,
            json!({
                "sortOrder": "SCORE_DESC",
                "types": ["FOOD", "EXERCISE", "NOTE"],
                "scoreGreaterThan": 0,
                "scoreLessThan": 10,
                "offset": 0,
                "limit": 20
            }),
        ),
        Query::SensorStatus => QueryTemplate::new(
            query,
            Some("GetSensorStatus"),
            documents::SENSOR_STATUS,
            json!({}),
        ),
        Query::DailyMetabolicFitnessScore => QueryTemplate::new(
            query,
            Some("mfsDaily"),
            documents::DAILY_METABOLIC_FITNESS_SCORE,
            json!({ "range": [], "sortOrder": "TIME_DESC" }),
        ),
        Query::InsightFeed => QueryTemplate::new(
            query,
            Some("GetInsightCardsFromDashboard"),
            documents::INSIGHT_FEED,
            json!({ "range": [] }),
        ),
        Query::GlucoseHistory => QueryTemplate::new(
            query,
            Some("GlucoseMetricsHistory"),
            documents::GLUCOSE_HISTORY,
            json!({ "range": [], "prevStatRange": [] }),
        ),
    }
}
