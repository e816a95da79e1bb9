use serde::{Deserialize, Serialize};

use crate::pms::models::RoomType;

#[derive(Debug, Default, Deserialize)]
pub struct RoomTypesParams {
    #[serde(rename = "propertyID")]
    pub property_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypesResponse {
    pub success: bool,
    pub room_types: Vec<RoomType>,
}
