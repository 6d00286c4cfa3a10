#![allow(dead_code)]

use serde_json::{json, Value};

/// Gift-shop response in the upstream's nested shape.
pub fn catalog_body(total: i64, promos: &[(&str, &str)]) -> Value {
    let mut items: Vec<Value> = promos
        .iter()
        .map(|(id, name)| {
            json!({
                "DisplayItemID": id,
                "DisplayItemName": name,
                "DisplayLargeClassificationCode": "20",
                "DisplayMiddleClassificationCode": "10",
                "DisplayMiddleClassificationName": "영화관람권",
                "UseRestrictionsDayName": "~ 2026.12.31",
                "DiscountSellPrice": 12000,
                "ItemImageUrl": format!("http://img.example/{}.jpg", id)
            })
        })
        .collect();

    items.push(json!({
        "DisplayItemID": "9000",
        "DisplayItemName": "일반 관람권",
        "DisplayLargeClassificationCode": "20",
        "DisplayMiddleClassificationCode": "10",
        "DisplayMiddleClassificationName": "영화관람권",
        "DiscountSellPrice": 14000
    }));
    items.push(json!({
        "DisplayItemID": "9001",
        "DisplayItemName": "1+1 콤보",
        "DisplayLargeClassificationCode": "20",
        "DisplayMiddleClassificationCode": "20",
        "DisplayMiddleClassificationName": "매점상품",
        "DiscountSellPrice": 9000
    }));

    json!({
        "IsOK": "true",
        "CinemaMallItemLists": {
            "CinemaMallClassifications": {
                "Items": [
                    {"DisplayLargeClassificationCode": "20", "DisplayMiddleClassificationCode": "10", "ItemCount": total},
                    {"DisplayLargeClassificationCode": "20", "DisplayMiddleClassificationCode": "20", "ItemCount": 31}
                ]
            },
            "Items": { "Items": items }
        }
    })
}
