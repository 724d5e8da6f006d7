use crate::domain::ports::GroupIdGenerator;
use chrono::Utc;
use uuid::Uuid;

/// Time-based group ids: `mg_<unix millis>_<8 hex chars>`.
pub struct TimestampGroupIdGenerator;

impl GroupIdGenerator for TimestampGroupIdGenerator {
    fn next_id(&self) -> String {
        let entropy = Uuid::new_v4().simple().to_string();
        format!("mg_{}_{}", Utc::now().timestamp_millis(), &entropy[..8])
    }
}
