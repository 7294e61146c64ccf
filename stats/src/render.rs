use crate::record::{
    EntityType,
    StatRecord,
};
use comfy_table::{
    presets,
    Attribute,
    Cell,
    CellAlignment,
    Color,
    ContentArrangement,
    Table,
};
use haproxy_status_config::OutputFormat;

/// Serializes a snapshot for display. JSON output keeps HAProxy's column names as keys.
pub fn render(records: &[StatRecord], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string(records),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(records),
        OutputFormat::Table => Ok(table(records).to_string()),
    }
}

fn table(records: &[StatRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["pxname", "svname", "type", "status", "scur", "rate", "stot", "bck"]
                .into_iter()
                .map(|name| Cell::new(name).add_attribute(Attribute::Bold).fg(Color::Cyan)),
        );

    for record in records {
        table.add_row(vec![
            Cell::new(&record.proxy_name).add_attribute(Attribute::Bold),
            Cell::new(&record.service_name),
            Cell::new(record.entity_type).fg(entity_color(record.entity_type)),
            Cell::new(&record.status).fg(status_color(&record.status)),
            number(record.current_sessions),
            number(record.session_rate),
            number(record.cumulative_sessions),
            number(record.backup_server_count),
        ]);
    }

    table
}

fn number(value: i64) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

fn status_color(status: &str) -> Color {
    match status {
        "UP" | "OPEN" => Color::Green,
        "DOWN" => Color::Red,
        s if s.starts_with("MAINT") || s.starts_with("DRAIN") || s == "NOLB" => Color::Yellow,
        s if s.starts_with("UP ") => Color::Yellow,
        s if s.starts_with("DOWN ") => Color::Red,
        _ => Color::Reset,
    }
}

fn entity_color(entity_type: EntityType) -> Color {
    match entity_type {
        EntityType::Frontend | EntityType::Listener => Color::Blue,
        EntityType::Backend => Color::Magenta,
        EntityType::Server => Color::Reset,
        EntityType::Unknown => Color::DarkGrey,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<StatRecord> {
        vec![
            StatRecord {
                proxy_name: "example".to_string(),
                service_name: "FRONTEND".to_string(),
                cumulative_sessions: 1836,
                entity_type: EntityType::Frontend,
                session_rate: 2,
                backup_server_count: 0,
                status: "OPEN".to_string(),
                current_sessions: 1,
            },
            StatRecord {
                proxy_name: "example-backend".to_string(),
                service_name: "198.51.100.196:443".to_string(),
                cumulative_sessions: 53,
                entity_type: EntityType::Server,
                session_rate: 0,
                backup_server_count: 1,
                status: "MAINT".to_string(),
                current_sessions: 0,
            },
        ]
    }

    #[test]
    fn json_is_a_single_line_array() {
        let json = render(&records(), OutputFormat::Json).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"[{"pxname":"example","svname":"FRONTEND","stot":1836,"type":"FRONTEND""#));

        let back: Vec<StatRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, records());
    }

    #[test]
    fn empty_snapshot_is_an_empty_array() {
        assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn pretty_json_parses_to_the_same_value() {
        let compact: serde_json::Value =
            serde_json::from_str(&render(&records(), OutputFormat::Json).unwrap()).unwrap();
        let pretty = render(&records(), OutputFormat::JsonPretty).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&pretty).unwrap(), compact);
    }

    #[test]
    fn table_lists_every_record() {
        let table = render(&records(), OutputFormat::Table).unwrap();
        for needle in ["pxname", "example-backend", "198.51.100.196:443", "FRONTEND", "SERVER", "MAINT", "1836"] {
            assert!(table.contains(needle), "missing {needle:?} in\n{table}");
        }
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color("UP"), Color::Green);
        assert_eq!(status_color("OPEN"), Color::Green);
        assert_eq!(status_color("DOWN"), Color::Red);
        assert_eq!(status_color("MAINT(via)"), Color::Yellow);
        assert_eq!(status_color("UP 1/3"), Color::Yellow);
        assert_eq!(status_color("no check"), Color::Reset);
    }
}
