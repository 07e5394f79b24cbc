/// Serializes timestamps as `DD-MM-YYYY`, the date-only form the API
/// exposes. Deserialization accepts the same format and yields midnight
/// UTC.
pub mod date_dmy {
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let date = NaiveDate::parse_from_str(&s, FORMAT).map_err(de::Error::custom)?;
        Ok(date.and_time(NaiveTime::MIN).and_utc())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super::date_dmy")]
        at: DateTime<Utc>,
    }

    #[test]
    fn formats_day_month_year() {
        let stamped = Stamped {
            at: Utc.with_ymd_and_hms(2026, 8, 7, 15, 4, 5).unwrap(),
        };
        let json = serde_json::to_value(&stamped).unwrap();
        assert_eq!(json["at"], "07-08-2026");
    }

    #[test]
    fn round_trips_to_midnight_utc() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"31-01-2024"}"#).unwrap();
        assert_eq!(
            parsed.at,
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()
        );
    }
}
