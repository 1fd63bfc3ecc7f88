//! # Response Formatting
//!
//! Response bodies shared by the REST routes. Document listings are
//! returned as bare JSON arrays.

use serde::Serialize;
use serde_json::Value;

/// Body of a successful insert
#[derive(Debug, Clone, Serialize)]
pub struct InsertedResponse {
    #[serde(rename = "insertedId")]
    pub inserted_id: Value,
}

impl InsertedResponse {
    pub fn new(inserted_id: Value) -> Self {
        Self { inserted_id }
    }
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inserted_response_serialization() {
        let response = InsertedResponse::new(json!("507f1f77bcf86cd799439011"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({"insertedId": "507f1f77bcf86cd799439011"}));
    }
}
