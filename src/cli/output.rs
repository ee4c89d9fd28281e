//! Progress-event JSON lines and the inspect action table (§6).

use crate::models::action::Action;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

/// Print a one-line JSON record `{"event": <name>, ...fields}`.
pub fn emit(event: &str, fields: Value) {
    let mut object = match fields {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    object.insert("event".to_string(), json!(event));
    println!("{}", Value::Object(object));
}

#[derive(Tabled)]
struct ActionProbRow {
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Probability")]
    probability: String,
}

/// Render an action-probability distribution as an ASCII table.
pub fn format_action_table(distribution: &[(Action, f64)]) -> String {
    let rows: Vec<ActionProbRow> = distribution
        .iter()
        .map(|(action, probability)| ActionProbRow {
            action: action.kind.name().to_string(),
            target: action
                .target
                .map(|t| format!("P{t}"))
                .unwrap_or_else(|| "-".to_string()),
            probability: format!("{probability:.3}"),
        })
        .collect();
    Table::new(rows).to_string()
}
