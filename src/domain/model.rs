use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Count reported when the movie-ticket classification is missing or the fetch degraded.
pub const SENTINEL_COUNT: i64 = -1;

/// Upstream sends `null` for blank text and sometimes numbers where text is expected.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accepts a JSON number or a numeric string; `null` and unparsable text become 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    };
    if number.is_none() && !value.is_null() {
        tracing::debug!("Unreadable numeric field {}, using 0", value);
    }
    Ok(number.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One sellable entry of the gift-shop catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketItem {
    #[serde(rename = "DisplayItemID", deserialize_with = "lenient_string")]
    pub item_id: String,
    #[serde(rename = "DisplayItemName", deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "DisplayLargeClassificationCode", deserialize_with = "lenient_string")]
    pub large_code: String,
    #[serde(rename = "DisplayMiddleClassificationCode", deserialize_with = "lenient_string")]
    pub middle_code: String,
    #[serde(rename = "DisplayMiddleClassificationName", deserialize_with = "lenient_string")]
    pub middle_name: String,
    #[serde(rename = "UseRestrictionsDayName", deserialize_with = "lenient_string")]
    pub restriction: String,
    #[serde(rename = "DiscountSellPrice", deserialize_with = "lenient_number")]
    pub price: i64,
    #[serde(rename = "ItemImageUrl", deserialize_with = "lenient_string")]
    pub image_url: String,
}

impl TicketItem {
    /// Placeholder returned when no new item could be located.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Item count for one (large, middle) classification pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationEntry {
    #[serde(rename = "DisplayLargeClassificationCode", deserialize_with = "lenient_string")]
    pub large_code: String,
    #[serde(rename = "DisplayMiddleClassificationCode", deserialize_with = "lenient_string")]
    pub middle_code: String,
    #[serde(rename = "ItemCount", deserialize_with = "lenient_number")]
    pub item_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
struct ItemList<T> {
    #[serde(rename = "Items", deserialize_with = "null_as_default")]
    items: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct CinemaMallItemLists {
    #[serde(rename = "CinemaMallClassifications", deserialize_with = "null_as_default")]
    classifications: ItemList<ClassificationEntry>,
    #[serde(rename = "Items", deserialize_with = "null_as_default")]
    items: ItemList<TicketItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct CinemaResponse {
    #[serde(rename = "CinemaMallItemLists", deserialize_with = "null_as_default")]
    lists: CinemaMallItemLists,
}

/// Decoded catalog response, flattened out of the upstream's nested wrappers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub classifications: Vec<ClassificationEntry>,
    pub items: Vec<TicketItem>,
}

impl CatalogSnapshot {
    pub fn new(classifications: Vec<ClassificationEntry>, items: Vec<TicketItem>) -> Self {
        Self {
            classifications,
            items,
        }
    }

    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let response: CinemaResponse = serde_json::from_str(body)?;
        Ok(Self {
            classifications: response.lists.classifications.items,
            items: response.lists.items.items,
        })
    }

    /// Re-encodes the snapshot in the upstream shape, for diagnostics.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let response = CinemaResponse {
            lists: CinemaMallItemLists {
                classifications: ItemList {
                    items: self.classifications.clone(),
                },
                items: ItemList {
                    items: self.items.clone(),
                },
            },
        };
        serde_json::to_string(&response)
    }
}
