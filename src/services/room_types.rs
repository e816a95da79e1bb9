use crate::pms::models::RoomType;
use crate::pms::PmsApi;

/// 获取物业下全部房型，失败时返回空列表
pub async fn fetch_room_types(api: &dyn PmsApi, token: &str, property_id: &str) -> Vec<RoomType> {
    match api.get_room_types(token, property_id).await {
        Ok(envelope) => {
            if !envelope.success {
                tracing::warn!(
                    "获取房型返回 success=false: property_id={}, message={}",
                    property_id,
                    envelope.message.as_deref().unwrap_or("-")
                );
            }
            envelope.into_data().unwrap_or_default()
        }
        Err(e) => {
            tracing::error!("获取房型失败: property_id={}, error={}", property_id, e);
            Vec::new()
        }
    }
}
