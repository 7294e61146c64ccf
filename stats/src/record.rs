use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;
use strum::{
    Display,
    EnumIter,
};

/// Kind of proxy entity a stats row describes, from the numeric `type` column.
#[derive(Debug, Default, Clone, Copy, Display, EnumIter, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum EntityType {
    Frontend,
    Backend,
    Server,
    Listener,
    #[default]
    Unknown,
}

impl EntityType {
    /// Maps HAProxy's type code (0=frontend, 1=backend, 2=server, 3=listener).
    /// Anything else, including codes newer HAProxy versions might add, is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "0" => EntityType::Frontend,
            "1" => EntityType::Backend,
            "2" => EntityType::Server,
            "3" => EntityType::Listener,
            _ => EntityType::Unknown,
        }
    }
}

/// One row of the stats report.
///
/// Field names in JSON follow HAProxy's column names and must not change,
/// downstream consumers read them as-is.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatRecord {
    /// Proxy (frontend/backend/listen section) name.
    #[serde(rename = "pxname")]
    pub proxy_name: String,
    /// Service name: `FRONTEND`, `BACKEND` or the server name.
    #[serde(rename = "svname")]
    pub service_name: String,
    /// Cumulative number of sessions since the process started.
    #[serde(rename = "stot")]
    pub cumulative_sessions: i64,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Sessions per second over the last elapsed second.
    #[serde(rename = "rate")]
    pub session_rate: i64,
    /// Number of backup servers for a backend, 0/1 backup flag for a server.
    #[serde(rename = "bck")]
    pub backup_server_count: i64,
    /// UP, DOWN, NOLB, MAINT, OPEN, "no check", ... kept verbatim.
    pub status: String,
    /// Current sessions.
    #[serde(rename = "scur")]
    pub current_sessions: i64,
}

impl StatRecord {
    /// Builds a record from one row keyed by column name.
    ///
    /// Missing text columns become empty strings, missing or malformed numbers become 0.
    pub fn from_row(row: &HashMap<String, String>) -> Self {
        let text = |column: &str| row.get(column).cloned().unwrap_or_default();
        let number = |column: &str| row.get(column).map_or(0, |value| coerce_int(value));

        Self {
            proxy_name: text("pxname"),
            service_name: text("svname"),
            cumulative_sessions: number("stot"),
            entity_type: row
                .get("type")
                .map_or(EntityType::Unknown, |code| EntityType::from_code(code)),
            session_rate: number("rate"),
            backup_server_count: number("bck"),
            status: text("status"),
            current_sessions: number("scur"),
        }
    }
}

/// Parses a base-10 integer, falling back to 0. Surrounding whitespace is not accepted.
pub fn coerce_int(value: &str) -> i64 {
    value.parse().unwrap_or(0)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn type_codes() {
        assert_eq!(EntityType::from_code("0"), EntityType::Frontend);
        assert_eq!(EntityType::from_code("1"), EntityType::Backend);
        assert_eq!(EntityType::from_code("2"), EntityType::Server);
        assert_eq!(EntityType::from_code("3"), EntityType::Listener);
        for code in ["", "4", "abc", " 0", "00", "-1", "unknown"] {
            assert_eq!(EntityType::from_code(code), EntityType::Unknown, "code {code:?}");
        }
    }

    #[test]
    fn coerce_int_falls_back_to_zero() {
        assert_eq!(coerce_int("1836"), 1836);
        assert_eq!(coerce_int("-1"), -1);
        assert_eq!(coerce_int("0"), 0);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("   0"), 0);
        assert_eq!(coerce_int("12abc"), 0);
        assert_eq!(coerce_int("1.5"), 0);
    }

    #[test]
    fn from_row_copies_and_coerces() {
        let record = StatRecord::from_row(&row(&[
            ("pxname", "example-backend-default"),
            ("svname", "198.51.100.151:8080"),
            ("stot", "0"),
            ("type", "2"),
            ("rate", ""),
            ("bck", "1"),
            ("status", "no check"),
            ("scur", "nope"),
            ("lastsess", "-1"),
        ]));

        assert_eq!(
            record,
            StatRecord {
                proxy_name: "example-backend-default".to_string(),
                service_name: "198.51.100.151:8080".to_string(),
                cumulative_sessions: 0,
                entity_type: EntityType::Server,
                session_rate: 0,
                backup_server_count: 1,
                status: "no check".to_string(),
                current_sessions: 0,
            }
        );
    }

    #[test]
    fn from_row_with_nothing() {
        assert_eq!(StatRecord::from_row(&HashMap::new()), StatRecord::default());
    }

    #[test]
    fn json_keys_and_order() {
        let record = StatRecord {
            proxy_name: "example".to_string(),
            service_name: "FRONTEND".to_string(),
            cumulative_sessions: 1836,
            entity_type: EntityType::Frontend,
            session_rate: 2,
            backup_server_count: 0,
            status: "OPEN".to_string(),
            current_sessions: 1,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"pxname":"example","svname":"FRONTEND","stot":1836,"type":"FRONTEND","rate":2,"bck":0,"status":"OPEN","scur":1}"#
        );
        assert_eq!(serde_json::from_str::<StatRecord>(&json).unwrap(), record);
    }

    #[test]
    fn entity_type_display_matches_json() {
        use strum::IntoEnumIterator;
        for entity_type in EntityType::iter() {
            assert_eq!(
                serde_json::to_string(&entity_type).unwrap(),
                format!("\"{entity_type}\"")
            );
        }
    }
}
