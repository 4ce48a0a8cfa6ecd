//! Inventory Codec
//!
//! 所持品は「商品種別 → 所持数」のマッピングとして永続化される（JSON オブジェクト）。
//! このモジュールは永続化形式とクライアント向けの順序付きリストとの変換を担う。
//!
//! ## 永続化形式
//! - `{"cup": 2, "pen": 1}` のように数値で保存される
//! - 旧形式の `{"cup": "2"}`（10進文字列）も読み込み可能
//! - 空入力・`null`・`{}` は空の所持品として扱う
//!
//! ## 不変条件
//! - 所持数は 0 以上の整数
//! - `items()` は種別名の昇順（バイト順）で並ぶ

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error returned when a persisted inventory cannot be decoded
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("inventory must be a JSON object")]
    NotAnObject,

    #[error("quantity for {item_type:?} is not a non-negative integer")]
    InvalidQuantity { item_type: String },
}

/// One inventory line as rendered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: i64,
}

/// Owned items of one account, keyed by item type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, i64>);

impl Inventory {
    /// Decode a persisted type → quantity mapping
    pub fn decode(raw: &[u8]) -> Result<Self, InventoryError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(raw)? {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => map
                .into_iter()
                .map(|(item_type, value)| match parse_quantity(&value) {
                    Some(quantity) => Ok((item_type, quantity)),
                    None => Err(InventoryError::InvalidQuantity { item_type }),
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self),
            _ => Err(InventoryError::NotAnObject),
        }
    }

    /// Encode into the persisted form (integer quantities)
    pub fn to_json(&self) -> Result<Vec<u8>, InventoryError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Items ordered ascending by type name
    pub fn items(&self) -> Vec<InventoryItem> {
        self.0
            .iter()
            .map(|(item_type, &quantity)| InventoryItem {
                item_type: item_type.clone(),
                quantity,
            })
            .collect()
    }

    /// Quantity held for `item_type` (0 when absent)
    pub fn quantity(&self, item_type: &str) -> i64 {
        self.0.get(item_type).copied().unwrap_or(0)
    }

    /// Add exactly one unit of `item_type`
    pub fn add_one(&mut self, item_type: &str) {
        *self.0.entry(item_type.to_string()).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_quantity(value: &Value) -> Option<i64> {
    let quantity = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (quantity >= 0).then_some(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_type: &str, quantity: i64) -> InventoryItem {
        InventoryItem {
            item_type: item_type.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_empty_forms() {
        for raw in ["", "   ", "null", "{}"] {
            let inventory = Inventory::decode(raw.as_bytes()).unwrap();
            assert!(inventory.is_empty(), "{raw:?} should decode to nothing");
            assert!(inventory.items().is_empty());
        }
    }

    #[test]
    fn test_string_quantities_sorted_by_type() {
        let inventory = Inventory::decode(br#"{"shield":"1","potion":"3"}"#).unwrap();
        assert_eq!(inventory.items(), vec![item("potion", 3), item("shield", 1)]);
    }

    #[test]
    fn test_integer_quantities() {
        let inventory = Inventory::decode(br#"{"pen": 2, "cup": 1, "t-shirt": 4}"#).unwrap();
        assert_eq!(
            inventory.items(),
            vec![item("cup", 1), item("pen", 2), item("t-shirt", 4)]
        );
        assert_eq!(inventory.quantity("pen"), 2);
        assert_eq!(inventory.quantity("hoody"), 0);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            Inventory::decode(b"{not json"),
            Err(InventoryError::Syntax(_))
        ));
        assert!(matches!(
            Inventory::decode(b"[1, 2]"),
            Err(InventoryError::NotAnObject)
        ));
        assert!(matches!(
            Inventory::decode(br#"{"cup": -1}"#),
            Err(InventoryError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            Inventory::decode(br#"{"cup": 1.5}"#),
            Err(InventoryError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            Inventory::decode(br#"{"cup": "many"}"#),
            Err(InventoryError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            Inventory::decode(br#"{"cup": true}"#),
            Err(InventoryError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_add_one_and_encode() {
        let mut inventory = Inventory::default();
        inventory.add_one("cup");
        inventory.add_one("cup");
        inventory.add_one("book");

        let encoded = inventory.to_json().unwrap();
        assert_eq!(encoded, br#"{"book":1,"cup":2}"#.to_vec());
        assert_eq!(Inventory::decode(&encoded).unwrap(), inventory);
    }

    #[test]
    fn test_type_names_with_quotes_survive() {
        let mut inventory = Inventory::default();
        inventory.add_one(r#"mug "xl""#);
        let decoded = Inventory::decode(&inventory.to_json().unwrap()).unwrap();
        assert_eq!(decoded.quantity(r#"mug "xl""#), 1);
    }

    #[test]
    fn test_item_serializes_with_type_key() {
        let json = serde_json::to_string(&item("cup", 2)).unwrap();
        assert_eq!(json, r#"{"type":"cup","quantity":2}"#);
    }
}
