use serde_json::{json, Value};

pub async fn health() -> anyhow::Result<Value> {
    Ok(json!({ "status": "ok" }))
}
