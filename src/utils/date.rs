use chrono::{DateTime, SecondsFormat, Utc};

pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text).ok().map(|t| t.with_timezone(&Utc))
}

// Optional timestamps: RFC 3339 text on output, RFC 3339 text or epoch seconds on input.
pub mod opt_serializer {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_timestamp, parse_timestamp};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Text(String),
        Seconds(f64),
    }

    pub fn serialize<S: Serializer>(time: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        time.as_ref().map(format_timestamp).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<Timestamp>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Timestamp::Text(text)) => parse_timestamp(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp {}", text))),
            Some(Timestamp::Seconds(secs)) => Utc.timestamp_millis_opt((secs * 1000.0).round() as i64)
                .single()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range {}", secs))),
        }
    }
}
