//! CSV and JSON rendering of cross-run series.

use ps_core::CrossRunSeriesSet;

fn column_name(name: &str, description: Option<&str>) -> String {
    match description {
        Some(d) => format!("{name}[{d}]"),
        None => name.to_string(),
    }
}

/// One row per combination: the varying values, then each series.
pub fn to_csv(set: &CrossRunSeriesSet, varying: &[String]) -> String {
    let mut header: Vec<String> = varying.to_vec();
    header.extend(
        set.values
            .iter()
            .map(|s| column_name(&s.name, s.description.as_deref())),
    );

    let mut csv = header.join(",");
    csv.push('\n');
    for (i, combination) in set.x.iter().enumerate() {
        let mut row: Vec<String> = varying
            .iter()
            .map(|name| combination.get(name).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        row.extend(set.values.iter().map(|s| s.y[i].to_string()));
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

pub fn to_json(set: &CrossRunSeriesSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(set)
}
