use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 每个作业对应一个聊天群组，过期时间等于作业截止时间
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatGroup {
    pub id: i64,
    pub assignment_id: i64,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl ChatGroup {
    /// 群组是否活跃：过期时间不早于给定时刻。
    /// 每次读取时重新计算，从不持久化。
    pub fn is_active(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at >= now
    }
}

// 聊天消息，user_id 为空表示系统消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatMessage {
    pub id: i64,
    pub group_id: i64,
    pub user_id: Option<i64>,
    pub content: String,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_group_active_before_expiry() {
        let now = Utc::now();
        let group = ChatGroup {
            id: 1,
            assignment_id: 1,
            expires_at: now + Duration::hours(1),
        };
        assert!(group.is_active(now));
    }

    #[test]
    fn test_group_inactive_after_expiry() {
        let now = Utc::now();
        let group = ChatGroup {
            id: 1,
            assignment_id: 1,
            expires_at: now - Duration::seconds(1),
        };
        assert!(!group.is_active(now));
    }

    #[test]
    fn test_group_active_exactly_at_expiry() {
        let now = Utc::now();
        let group = ChatGroup {
            id: 1,
            assignment_id: 1,
            expires_at: now,
        };
        // 过期时刻本身仍视为活跃
        assert!(group.is_active(now));
    }
}
