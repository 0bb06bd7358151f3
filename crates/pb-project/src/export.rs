//! Tabular exports of the position log and the equipment list.

use pb_model::{Equipment, HistoryEntry, Layer};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub timestamp: String,
    pub equipment_name: String,
    pub from_position: String,
    pub to_position: String,
}

impl HistoryRow {
    pub const HEADER: [&'static str; 4] = ["Timestamp", "Equipment", "From", "To"];

    fn fields(&self) -> [&str; 4] {
        [
            self.timestamp.as_str(),
            self.equipment_name.as_str(),
            self.from_position.as_str(),
            self.to_position.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentRow {
    pub name: String,
    pub equipment_type: String,
    pub status: String,
    pub current_position: String,
    pub normal_position: String,
    pub energized: bool,
    pub loto: bool,
    pub layer: String,
    pub notes: String,
    pub last_updated: String,
}

impl EquipmentRow {
    pub const HEADER: [&'static str; 10] = [
        "Name",
        "Type",
        "Status",
        "Current Position",
        "Normal Position",
        "Energized",
        "LOTO",
        "Layer",
        "Notes",
        "Last Updated",
    ];
}

/// One row per log entry, in log order (newest first).
pub fn history_rows(history: &[HistoryEntry]) -> Vec<HistoryRow> {
    history
        .iter()
        .map(|h| HistoryRow {
            timestamp: h.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            equipment_name: h.equipment_name.clone(),
            from_position: h.from_position.clone(),
            to_position: h.to_position.clone(),
        })
        .collect()
}

/// One row per equipment. Layers that cannot be resolved show as "Default".
pub fn equipment_rows(equipment: &[Equipment], layers: &[Layer]) -> Vec<EquipmentRow> {
    equipment
        .iter()
        .map(|e| EquipmentRow {
            name: e.name.clone(),
            equipment_type: e.equipment_type.to_string(),
            status: e.status().to_string(),
            current_position: e.current_position.clone(),
            normal_position: e.normal_position.clone(),
            energized: e.is_energized,
            loto: e.is_loto,
            layer: layers
                .iter()
                .find(|l| l.id == e.layer_id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "Default".to_string()),
            notes: e.notes.replace('\r', "").replace('\n', " "),
            last_updated: e
                .last_updated
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn csv_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().map(quote).collect::<Vec<_>>().join(",")
}

pub fn history_csv(rows: &[HistoryRow]) -> String {
    let mut out = HistoryRow::HEADER.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&csv_line(row.fields()));
        out.push('\n');
    }
    out
}

pub fn equipment_csv(rows: &[EquipmentRow]) -> String {
    let mut out = EquipmentRow::HEADER.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&csv_line([
            row.name.as_str(),
            row.equipment_type.as_str(),
            row.status.as_str(),
            row.current_position.as_str(),
            row.normal_position.as_str(),
            yes_no(row.energized),
            yes_no(row.loto),
            row.layer.as_str(),
            row.notes.as_str(),
            row.last_updated.as_str(),
        ]));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pb_model::EquipmentType;

    #[test]
    fn history_rows_keep_order_and_format_time() {
        let entry = |name: &str, minute: u32| HistoryEntry {
            id: format!("h-{name}"),
            equipment_id: name.to_lowercase(),
            equipment_name: name.to_string(),
            from_position: "open".into(),
            to_position: "closed".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 5).unwrap(),
        };
        let rows = history_rows(&[entry("V-2", 30), entry("V-1", 10)]);
        assert_eq!(rows[0].equipment_name, "V-2");
        assert_eq!(rows[0].timestamp, "2024-03-01 12:30:05");
        assert_eq!(rows[1].equipment_name, "V-1");

        let csv = history_csv(&rows);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Timestamp,Equipment,From,To"));
        assert_eq!(
            lines.next(),
            Some("\"2024-03-01 12:30:05\",\"V-2\",\"open\",\"closed\"")
        );
    }

    #[test]
    fn equipment_rows_resolve_layers_and_flags() {
        let mut breaker = Equipment::new("b", "MSB-1", EquipmentType::Breaker);
        breaker.current_position = "open".into();
        breaker.is_loto = true;
        breaker.layer_id = "gone".into();
        breaker.notes = "line one\nsays \"hi\"".into();
        let mut layer = Layer::default_layer();
        layer.name = "Base".into();

        let rows = equipment_rows(&[breaker], &[layer]);
        let row = &rows[0];
        assert_eq!(row.equipment_type, "Breaker");
        assert_eq!(row.status, "Abnormal");
        assert_eq!(row.layer, "Default");
        assert!(row.loto && !row.energized);
        assert_eq!(row.last_updated, "");

        let csv = equipment_csv(&rows);
        let line = csv.lines().nth(1).unwrap();
        assert!(line.contains("\"line one says \"\"hi\"\"\""));
        assert!(line.contains("\"No\",\"Yes\""));
    }
}
