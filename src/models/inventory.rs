use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::truthy::{self, Truthy};
use crate::error::{Error, Result};
use crate::request::{Method, RequestBody, RequestParams, Resource, StoreRequest};

/// The catalog item a store lot refers to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Catalog number, e.g. `bel004`.
    pub no: Option<String>,
    pub name: Option<String>,
    /// `PART`, `SET`, `MINIFIG`, ...
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    #[serde(
        rename = "categoryID",
        default,
        deserialize_with = "truthy::string_or_number"
    )]
    pub category_id: Option<String>,
}

/// One lot of a store inventory.
///
/// Fields are public and meant to be edited in place between
/// [`Inventory::get`] and [`Inventory::update`]. Scalars that the API sends as
/// `0`, `""` or `false` decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub inventory_id: Option<i64>,
    #[serde(deserialize_with = "item_or_skeleton")]
    pub item: InventoryItem,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub color_id: Option<i32>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// `N` or `U`.
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub new_or_used: Option<String>,
    /// `C`, `B` or `S`, sets only.
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub completeness: Option<String>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<String>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub bind_id: Option<i64>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub bulk: Option<i32>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub is_retain: Option<bool>,
    /// Lot is only visible to the store owner.
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub is_stock_room: Option<bool>,
    /// `A`, `B` or `C`.
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub stock_room_id: Option<String>,
    #[serde(deserialize_with = "truthy::date", skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub sale_rate: Option<i32>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub my_cost: Option<String>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub tier_quantity1: Option<i32>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub tier_price1: Option<String>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub tier_quantity2: Option<i32>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub tier_price2: Option<String>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub tier_quantity3: Option<i32>,
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "Option::is_none")]
    pub tier_price3: Option<String>,
}

fn item_or_skeleton<'de, D>(deserializer: D) -> std::result::Result<InventoryItem, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<InventoryItem>::deserialize(deserializer)?.unwrap_or_default())
}

impl Resource for Inventory {
    const NAME: &'static str = "Inventory";
    const PATH: &'static str = "/inventories";

    fn from_payload(payload: Value) -> Result<Self> {
        serde_json::from_value(payload).map_err(|e| Error::decode(Self::NAME, e))
    }
}

/// Filters for [`Inventory::all_filtered`].
///
/// Each list is sent comma separated; prefix a value with `-` to exclude it,
/// e.g. `item_type=-SET`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryFilter {
    pub item_types: Vec<String>,
    pub statuses: Vec<String>,
    pub category_ids: Vec<String>,
    pub color_ids: Vec<String>,
}

impl InventoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_types.push(item_type.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.statuses.push(status.into());
        self
    }

    pub fn category_id(mut self, category_id: impl ToString) -> Self {
        self.category_ids.push(category_id.to_string());
        self
    }

    pub fn color_id(mut self, color_id: impl ToString) -> Self {
        self.color_ids.push(color_id.to_string());
        self
    }

    fn to_params(&self) -> Option<RequestParams> {
        let mut params = RequestParams::new();
        for (key, values) in [
            ("item_type", &self.item_types),
            ("status", &self.statuses),
            ("category_id", &self.category_ids),
            ("color_id", &self.color_ids),
        ] {
            if !values.is_empty() {
                params.insert(key.to_string(), values.join(","));
            }
        }
        (!params.is_empty()).then_some(params)
    }
}

impl Inventory {
    /// Request for a single lot.
    ///
    /// ```
    /// use bricklink_store::models::Inventory;
    ///
    /// let request = Inventory::get(50592684);
    /// assert_eq!(request.uri(), "/inventories/50592684");
    /// ```
    pub fn get(inventory_id: i64) -> StoreRequest<Inventory> {
        StoreRequest::fetch_one(inventory_id)
    }

    /// Request for every lot in the store.
    pub fn all() -> StoreRequest<Vec<Inventory>> {
        StoreRequest::fetch_all()
    }

    pub fn all_filtered(filter: &InventoryFilter) -> StoreRequest<Vec<Inventory>> {
        StoreRequest::new(
            Method::Get,
            Self::PATH,
            filter.to_params(),
            None,
            Self::from_payload_list,
        )
    }

    pub fn delete(inventory_id: i64) -> StoreRequest<()> {
        StoreRequest::new(
            Method::Delete,
            format!("{}/{}", Self::PATH, inventory_id),
            None,
            None,
            |_| Ok(()),
        )
    }

    /// Request that writes this lot's editable fields back to the store,
    /// leaving its stock level unchanged.
    ///
    /// Without an `inventory_id` the request still builds, against
    /// `/inventories/`, and fails when sent.
    pub fn update(&self) -> StoreRequest<Inventory> {
        self.update_adjusting(0)
    }

    /// Like [`Inventory::update`], also adding `quantity_change` units to the
    /// lot (negative removes). The store API treats the update `quantity` as
    /// a change, not a new total.
    pub fn update_adjusting(&self, quantity_change: i32) -> StoreRequest<Inventory> {
        let uri = match self.inventory_id {
            Some(id) => format!("{}/{}", Self::PATH, id),
            None => format!("{}/", Self::PATH),
        };
        StoreRequest::new(
            Method::Put,
            uri,
            None,
            Some(self.update_body(quantity_change)),
            Self::from_payload,
        )
    }

    /// Request that lists this lot as a new one.
    pub fn create(&self) -> StoreRequest<Inventory> {
        StoreRequest::new(
            Method::Post,
            Self::PATH,
            None,
            Some(self.create_body()),
            Self::from_payload,
        )
    }

    pub fn update_body(&self, quantity_change: i32) -> RequestBody {
        let mut body = RequestBody::new();
        body.set("quantity", Some(quantity_change))
            .set("unit_price", self.unit_price.clone())
            .set("description", self.description.clone())
            .set("remarks", self.remarks.clone())
            .set("bulk", self.bulk)
            .set("is_retain", self.is_retain)
            .set("is_stock_room", self.is_stock_room);
        if self.is_stock_room == Some(true) {
            body.set("stock_room_id", self.stock_room_id.clone());
        }
        body.set("my_cost", self.my_cost.clone())
            .set("sale_rate", self.sale_rate);
        self.set_tiers(&mut body);
        body
    }

    pub fn create_body(&self) -> RequestBody {
        let mut item = RequestBody::new();
        item.set("no", self.item.no.clone())
            .set("type", self.item.item_type.clone());

        let mut body = RequestBody::new();
        if !item.is_empty() {
            body.set("item", Some(item.into_value()));
        }
        body.set("color_id", self.color_id)
            .set("quantity", self.quantity)
            .set("unit_price", self.unit_price.clone())
            .set("new_or_used", self.new_or_used.clone())
            .set("completeness", self.completeness.clone())
            .set("description", self.description.clone())
            .set("remarks", self.remarks.clone())
            .set("bulk", self.bulk)
            .set("is_retain", self.is_retain)
            .set("is_stock_room", self.is_stock_room);
        if self.is_stock_room == Some(true) {
            body.set("stock_room_id", self.stock_room_id.clone());
        }
        body.set("my_cost", self.my_cost.clone())
            .set("sale_rate", self.sale_rate);
        self.set_tiers(&mut body);
        body
    }

    // Tiers go out as a complete set of three or not at all.
    fn set_tiers(&self, body: &mut RequestBody) {
        if let (Some(q1), Some(p1), Some(q2), Some(p2), Some(q3), Some(p3)) = (
            self.tier_quantity1.filter(Truthy::is_truthy),
            self.tier_price1.as_ref().filter(|p| p.is_truthy()),
            self.tier_quantity2.filter(Truthy::is_truthy),
            self.tier_price2.as_ref().filter(|p| p.is_truthy()),
            self.tier_quantity3.filter(Truthy::is_truthy),
            self.tier_price3.as_ref().filter(|p| p.is_truthy()),
        ) {
            body.set("tier_quantity1", Some(q1))
                .set("tier_price1", Some(p1.as_str()))
                .set("tier_quantity2", Some(q2))
                .set("tier_price2", Some(p2.as_str()))
                .set("tier_quantity3", Some(q3))
                .set("tier_price3", Some(p3.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tiered() -> Inventory {
        Inventory {
            inventory_id: Some(7),
            tier_quantity1: Some(10),
            tier_price1: Some("0.90".into()),
            tier_quantity2: Some(50),
            tier_price2: Some("0.80".into()),
            tier_quantity3: Some(100),
            tier_price3: Some("0.70".into()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_payload_decodes_to_skeleton() {
        let inventory = Inventory::from_payload(json!({})).unwrap();
        assert_eq!(inventory, Inventory::default());
        assert_eq!(inventory.item, InventoryItem::default());
        assert_eq!(inventory.date_created, None);
    }

    #[test]
    fn scenario_payload_keeps_present_fields() {
        let inventory = Inventory::from_payload(json!({
            "inventory_id": 50592684,
            "item": {"no": "bel004", "name": "X", "type": "PART", "categoryID": "1"},
            "quantity": 10
        }))
        .unwrap();

        assert_eq!(inventory.inventory_id, Some(50592684));
        assert_eq!(inventory.item.no.as_deref(), Some("bel004"));
        assert_eq!(inventory.item.item_type.as_deref(), Some("PART"));
        assert_eq!(inventory.item.category_id.as_deref(), Some("1"));
        assert_eq!(inventory.quantity, Some(10));
        assert_eq!(
            inventory,
            Inventory {
                inventory_id: Some(50592684),
                item: inventory.item.clone(),
                quantity: Some(10),
                ..Default::default()
            }
        );
    }

    #[test]
    fn falsy_scalars_decode_as_missing() {
        let inventory = Inventory::from_payload(json!({
            "inventory_id": 1,
            "quantity": 0,
            "remarks": "",
            "is_retain": false,
            "item": null,
            "date_created": null
        }))
        .unwrap();
        assert_eq!(inventory.quantity, None);
        assert_eq!(inventory.remarks, None);
        assert_eq!(inventory.is_retain, None);
        assert_eq!(inventory.item, InventoryItem::default());
    }

    #[test]
    fn date_created_is_parsed() {
        let inventory =
            Inventory::from_payload(json!({"date_created": "2013-12-01T05:00:00.000Z"})).unwrap();
        let expected: DateTime<Utc> = "2013-12-01T05:00:00Z".parse().unwrap();
        assert_eq!(inventory.date_created, Some(expected));
    }

    #[test]
    fn blank_date_created_decodes_as_missing() {
        let inventory =
            Inventory::from_payload(json!({"inventory_id": 1, "date_created": ""})).unwrap();
        assert_eq!(inventory.inventory_id, Some(1));
        assert_eq!(inventory.date_created, None);

        let lots = Inventory::from_payload_list(json!([
            {"inventory_id": 1, "date_created": ""},
            {"inventory_id": 2, "date_created": "2013-12-01T05:00:00.000Z"}
        ]))
        .unwrap();
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].date_created, None);
        assert!(lots[1].date_created.is_some());
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        for payload in [
            json!({"item": "bel004"}),
            json!({"quantity": "ten"}),
            json!({"date_created": "yesterday"}),
            json!(42),
        ] {
            let err = Inventory::from_payload(payload).unwrap_err();
            assert!(matches!(err, Error::DecodeMismatch { resource: "Inventory", .. }));
        }
    }

    #[test]
    fn decoding_own_serialization_is_identity() {
        let inventory = Inventory::from_payload(json!({
            "inventory_id": 50592684,
            "item": {"no": "3001", "name": "Brick 2 x 4", "type": "PART", "categoryID": 5},
            "color_id": 11,
            "quantity": 40,
            "new_or_used": "N",
            "unit_price": "0.1500",
            "is_stock_room": true,
            "stock_room_id": "B",
            "date_created": "2020-02-01T10:30:00.000Z",
            "tier_quantity1": 10,
            "tier_price1": "0.1400"
        }))
        .unwrap();
        let echoed = serde_json::to_value(&inventory).unwrap();
        assert_eq!(Inventory::from_payload(echoed).unwrap(), inventory);
    }

    #[test]
    fn get_builds_a_read_request() {
        let request = Inventory::get(50592684);
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.uri(), "/inventories/50592684");
        assert!(request.body().is_none());
        assert_eq!(request, Inventory::get(50592684));
    }

    #[test]
    fn all_filtered_joins_values() {
        let filter = InventoryFilter::new()
            .item_type("PART")
            .item_type("-SET")
            .color_id(11);
        let request = Inventory::all_filtered(&filter);
        let params = request.params().unwrap();
        assert_eq!(params.get("item_type").map(String::as_str), Some("PART,-SET"));
        assert_eq!(params.get("color_id").map(String::as_str), Some("11"));
        assert!(!params.contains_key("status"));

        assert_eq!(Inventory::all_filtered(&InventoryFilter::new()), Inventory::all());
    }

    #[test]
    fn update_keeps_stock_level_and_sends_own_price() {
        let inventory = Inventory {
            inventory_id: Some(3),
            quantity: Some(12),
            unit_price: Some("1.2500".into()),
            ..Default::default()
        };
        let request = inventory.update();
        assert_eq!(request.method(), Method::Put);
        assert_eq!(request.uri(), "/inventories/3");
        assert_eq!(
            request.body().cloned().unwrap().into_value(),
            json!({"quantity": 0, "unit_price": "1.2500"})
        );
    }

    #[test]
    fn update_adjusting_sends_quantity_change() {
        let inventory = Inventory {
            inventory_id: Some(3),
            quantity: Some(12),
            ..Default::default()
        };
        let body = inventory.update_adjusting(-2).body().cloned().unwrap();
        assert_eq!(body.get("quantity"), Some(&json!(-2)));

        let bare = Inventory {
            inventory_id: Some(1),
            ..Default::default()
        };
        assert_eq!(bare.update_body(0).get("quantity"), Some(&json!(0)));
    }

    #[test]
    fn stock_room_id_requires_stock_room() {
        let mut inventory = Inventory {
            inventory_id: Some(3),
            stock_room_id: Some("A".into()),
            ..Default::default()
        };
        assert!(!inventory.update_body(0).contains_key("stock_room_id"));

        inventory.is_stock_room = Some(false);
        assert!(!inventory.update_body(0).contains_key("stock_room_id"));

        inventory.is_stock_room = Some(true);
        let body = inventory.update_body(0);
        assert_eq!(body.get("stock_room_id"), Some(&json!("A")));
        assert_eq!(body.get("is_stock_room"), Some(&json!(true)));
    }

    #[test]
    fn tiers_are_all_or_nothing() {
        let body = tiered().update_body(0);
        assert_eq!(body.get("tier_quantity3"), Some(&json!(100)));
        assert_eq!(body.get("tier_price1"), Some(&json!("0.90")));

        let mut partial = tiered();
        partial.tier_price1 = None;
        let body = partial.update_body(0);
        for key in [
            "tier_quantity1",
            "tier_price1",
            "tier_quantity2",
            "tier_price2",
            "tier_quantity3",
            "tier_price3",
        ] {
            assert!(!body.contains_key(key), "{key} should be dropped");
        }
    }

    #[test]
    fn falsy_tier_values_drop_all_tiers() {
        let mut zeroed = tiered();
        zeroed.tier_quantity2 = Some(0);
        assert!(!zeroed.update_body(0).contains_key("tier_quantity1"));

        let mut blank = tiered();
        blank.tier_price3 = Some(String::new());
        let body = blank.update_body(0);
        assert!(!body.contains_key("tier_price1"));
        assert!(!body.contains_key("tier_quantity3"));
    }

    #[test]
    fn update_without_id_still_builds() {
        let request = Inventory::default().update();
        assert_eq!(request.uri(), "/inventories/");
        assert_eq!(request.body().cloned().unwrap().into_value(), json!({"quantity": 0}));
    }

    #[test]
    fn create_posts_item_reference() {
        let inventory = Inventory {
            inventory_id: Some(99),
            item: InventoryItem {
                no: Some("3001".into()),
                name: Some("Brick 2 x 4".into()),
                item_type: Some("PART".into()),
                category_id: Some("5".into()),
            },
            color_id: Some(11),
            quantity: Some(40),
            new_or_used: Some("N".into()),
            unit_price: Some("0.15".into()),
            ..Default::default()
        };
        let request = inventory.create();
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.uri(), "/inventories");
        assert_eq!(
            request.body().cloned().unwrap().into_value(),
            json!({
                "item": {"no": "3001", "type": "PART"},
                "color_id": 11,
                "quantity": 40,
                "unit_price": "0.15",
                "new_or_used": "N"
            })
        );
    }

    #[test]
    fn delete_ignores_response_payload() {
        let request = Inventory::delete(12);
        assert_eq!(request.method(), Method::Delete);
        assert_eq!(request.uri(), "/inventories/12");
        assert!(request.decode(Value::Null).is_ok());
    }
}
