//! GraphQL documents of the Levels API.
//!
//! These are fixed by the external schema and sent exactly as written.

/// Profile of the signed-in account.
pub const USER_DATA: &str = r#"{
  me {
    id
    firstName
    lastName
    experiments
    email
    userValues(keys: ["current_timezone", "beta", "latest_glucose_timestamp"])
    referralCode {
      code
      url
      __typename
    }
    __typename
  }
}
"#;

/// Streaks of good metabolic fitness days.
pub const METABOLIC_FITNESS_STREAKS: &str = r#"{
  metabolicFitnessStreaks {
    streaks
    __typename
  }
}
"#;

/// Heart rate samples within a range.
pub const HEART_RATE_METRICS: &str = r#"query ($range: TimestampRange!) {
  heartRateMetrics(input: {range: $range}) {
    id
    values {
      time
      value
      __typename
    }
    __typename
  }
}
"#;

/// Sleep log entries within a range.
pub const SLEEP_LOGS: &str = r#"query SleepLogs($range: TimestampRange!) {
  sleepLogs(input: {range: $range}) {
    values {
      id
      type
      title
      timestamp
      endTimestamp
      note
      __typename
    }
    __typename
  }
}
"#;

/// Asks the service to pull fresh data from the glucose sensor.
pub const REQUEST_SENSOR_REFRESH: &str = r#"mutation ($priority: String!) {
  refreshSensorDataWithStatus(input: {priority: $priority}) {
    recordsImported
    mostRecentValue
    error
    errorWhileRefreshing
    nextAllowedScrape
    __typename
  }
}
"#;

/// Scored activity zones from the activity catalogue.
pub const FIND_ZONES: &str = r#"query GetZonesFromActivityCatalogue($keyword: String, $types: [HealthLogType!], $sortOrder: ZoneSortOptions!, $scoreGreaterThan: Int, $scoreLessThan: Int, $offset: Int, $limit: Int) {
  findZones(input: {keyword: $keyword, types: $types, sortOrder: $sortOrder, scoreGreaterThan: $scoreGreaterThan, scoreLessThan: $scoreLessThan, offset: $offset, limit: $limit}) {
    id
    range
    stats {
      score
      avg
      glucoseDelta
      timeAboveRange
      peak
      mayUpdate
      hideScore
      __typename
    }
    entries {
      id
      type
      title
      note
      state
      imageKey
      timestamp
      endTimestamp
      payload {
        isStrenuous
        __typename
      }
      __typename
    }
    __typename
  }
}
"#;

/// Connection and scrape status of the glucose sensor.
pub const SENSOR_STATUS: &str = r#"query GetSensorStatus {
  sensorStatus {
    isConnected
    vendor
    lastKnownData
    lastScrapeAttempt
    nextScheduledScrape
    mostRecentValue
    __typename
  }
}
"#;

/// Daily metabolic fitness score within a range.
pub const DAILY_METABOLIC_FITNESS_SCORE: &str = r#"query mfsDaily($range: TimestampRange!, $sortOrder: DailyMFSSortOptions!) {
  dailyMetabolicFitnessScore(input: {range: $range, sortOrder: $sortOrder}) {
    time
    value
    __typename
  }
}
"#;

/// Insight cards of the dashboard feed within a range.
pub const INSIGHT_FEED: &str = r#"query GetInsightCardsFromDashboard($range: TimestampRange!) {
  getUserFeed(input: {range: $range}) {
    id
    identifier
    activeAt
    content {
      title
      description
      dismissible
      link
      image
      header
      buttonText
      buttonLink
      __typename
    }
    shouldSolicitFeedback
    __typename
  }
}
"#;

/// Glucose readings, stats and zones, with stats for the preceding period.
pub const GLUCOSE_HISTORY: &str = r#"query GlucoseMetricsHistory($range: TimestampRange!, $prevStatRange: TimestampRange) {
  glucoseMetrics(input: {range: $range, prevStatRange: $prevStatRange}) {
    id
    values {
      time
      value
      __typename
    }
    stats {
      score
      avg
      avgPercent
      __typename
    }
    prevStats {
      score
      avg
      avgPercent
      __typename
    }
    glucoseAnomalies {
      id
      type
      startTime
      __typename
    }
    zones {
      id
      range
      stats {
        score
        avg
        glucoseDelta
        timeAboveRange
        peak
        mayUpdate
        hideScore
        __typename
      }
      entries {
        id
        type
        note
        title
        state
        userId
        timestamp
        endTimestamp
        payload {
          isStrenuous
          __typename
        }
        imageKey
        __typename
      }
      __typename
    }
    __typename
  }
}
"#;
