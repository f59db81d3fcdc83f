//! Live API response types
//!
//! List payloads are wrapped twice on the wire, e.g.
//! `{"OnlineInfo": {"LiveStreamOnlineInfo": [...]}}`; the wrappers are kept
//! so the structs decode the body as-is. Missing fields default.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a stream a forbid/resume applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStreamType {
    /// The broadcaster pushing the stream.
    #[default]
    Publisher,
}

impl LiveStreamType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publisher => "publisher",
        }
    }
}

impl fmt::Display for LiveStreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Publish / online lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PublishListResponse {
    pub request_id: String,
    pub publish_info: PublishInfoList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PublishInfoList {
    pub live_stream_publish_info: Vec<LiveStreamPublishInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiveStreamPublishInfo {
    pub domain_name: String,
    pub app_name: String,
    pub stream_name: String,
    pub stream_url: String,
    pub edge_node_addr: String,
    pub client_addr: String,
    pub publish_time: String,
    pub stop_time: String,
    pub publish_domain: String,
    pub publish_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OnlineListResponse {
    pub request_id: String,
    pub online_info: OnlineInfoList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OnlineInfoList {
    pub live_stream_online_info: Vec<LiveStreamOnlineInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiveStreamOnlineInfo {
    pub domain_name: String,
    pub app_name: String,
    pub stream_name: String,
    pub publish_time: String,
    pub publish_url: String,
}

// ---------------------------------------------------------------------------
// Blacklist and control history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BlockListResponse {
    pub request_id: String,
    pub domain_name: String,
    pub stream_urls: StreamUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StreamUrls {
    pub stream_url: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ControlHistoryResponse {
    pub request_id: String,
    pub control_info: ControlInfoList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ControlInfoList {
    pub live_stream_control_info: Vec<LiveStreamControlInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiveStreamControlInfo {
    pub stream_name: String,
    #[serde(rename = "ClientIP")]
    pub client_ip: String,
    pub action: String,
    pub time_stamp: String,
}

// ---------------------------------------------------------------------------
// Audience and stream quality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OnlineUserNumResponse {
    pub request_id: String,
    pub total_user_number: i64,
    pub online_user_info: OnlineUserInfoList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OnlineUserInfoList {
    pub live_stream_online_user_num_info: Vec<LiveStreamOnlineUserNumInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiveStreamOnlineUserNumInfo {
    pub stream_url: String,
    pub user_number: i64,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FrameRateAndBitRateResponse {
    pub request_id: String,
    pub frame_rate_and_bit_rate_infos: FrameRateAndBitRateInfos,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FrameRateAndBitRateInfos {
    pub frame_rate_and_bit_rate_info: Vec<FrameRateAndBitRateInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FrameRateAndBitRateInfo {
    pub stream_url: String,
    pub video_frame_rate: f64,
    pub audio_frame_rate: f64,
    pub bit_rate: f64,
    pub time: String,
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RecordConfigResponse {
    pub request_id: String,
    pub live_app_record_list: LiveAppRecordList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiveAppRecordList {
    pub live_app_record: Vec<LiveAppRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiveAppRecord {
    pub domain_name: String,
    pub app_name: String,
    pub oss_endpoint: String,
    pub oss_bucket: String,
    pub oss_object_prefix: String,
    pub create_time: String,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Snapshot settings for one app, used by add and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotConfig {
    pub app_name: String,
    /// Seconds between snapshots (5..=3600).
    pub time_interval: u32,
    pub oss_endpoint: String,
    pub oss_bucket: String,
    /// Object name overwritten by each snapshot.
    pub overwrite_oss_object: String,
    /// Object name pattern for sequentially stored snapshots.
    pub sequence_oss_object: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnapshotConfigResponse {
    pub request_id: String,
    pub page_num: i64,
    pub page_size: i64,
    pub order: String,
    pub total_num: i64,
    pub total_page: i64,
    pub live_stream_snapshot_config_list: SnapshotConfigList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnapshotConfigList {
    pub live_stream_snapshot_config: Vec<LiveStreamSnapshotConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiveStreamSnapshotConfig {
    pub domain_name: String,
    pub app_name: String,
    pub time_interval: i64,
    pub oss_endpoint: String,
    pub oss_bucket: String,
    pub overwrite_oss_object: String,
    pub sequence_oss_object: String,
    pub create_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_stream_type_str() {
        assert_eq!(LiveStreamType::Publisher.as_str(), "publisher");
        assert_eq!(LiveStreamType::default().to_string(), "publisher");
    }

    #[test]
    fn test_online_list_deserialize() {
        let json = r#"{
            "RequestId": "ED6A8E3F-2A3B-4F1B-9E8E-7A2C4B1D9F00",
            "OnlineInfo": {
                "LiveStreamOnlineInfo": [{
                    "DomainName": "live.example.com",
                    "AppName": "live",
                    "StreamName": "room1",
                    "PublishTime": "2016-12-01T17:37:00Z",
                    "PublishUrl": "rtmp://video-center.alivecdn.com/live/room1"
                }]
            }
        }"#;
        let resp: OnlineListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.online_info.live_stream_online_info.len(), 1);
        let info = &resp.online_info.live_stream_online_info[0];
        assert_eq!(info.stream_name, "room1");
        assert_eq!(info.publish_time, "2016-12-01T17:37:00Z");
    }

    #[test]
    fn test_block_list_deserialize() {
        let json = r#"{
            "RequestId": "r",
            "DomainName": "live.example.com",
            "StreamUrls": {"StreamUrl": ["live.example.com/live/a", "live.example.com/live/b"]}
        }"#;
        let resp: BlockListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.domain_name, "live.example.com");
        assert_eq!(resp.stream_urls.stream_url.len(), 2);
    }

    #[test]
    fn test_control_history_client_ip_rename() {
        let json = r#"{"ControlInfo": {"LiveStreamControlInfo": [
            {"StreamName": "s", "ClientIP": "10.0.0.1", "Action": "forbid", "TimeStamp": "2016-12-01T17:37:00Z"}
        ]}}"#;
        let resp: ControlHistoryResponse = serde_json::from_str(json).unwrap();
        let info = &resp.control_info.live_stream_control_info[0];
        assert_eq!(info.client_ip, "10.0.0.1");
        assert_eq!(info.action, "forbid");
        assert_eq!(info.time_stamp, "2016-12-01T17:37:00Z");
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let resp: PublishListResponse = serde_json::from_str(r#"{"RequestId": "r"}"#).unwrap();
        assert_eq!(resp.request_id, "r");
        assert!(resp.publish_info.live_stream_publish_info.is_empty());
    }

    #[test]
    fn test_online_user_num_deserialize() {
        let json = r#"{
            "TotalUserNumber": 12,
            "OnlineUserInfo": {"LiveStreamOnlineUserNumInfo": [
                {"StreamUrl": "rtmp://live.example.com/live/s", "UserNumber": 12, "Time": "2016-12-01T17:37:00Z"}
            ]}
        }"#;
        let resp: OnlineUserNumResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total_user_number, 12);
        assert_eq!(resp.online_user_info.live_stream_online_user_num_info[0].user_number, 12);
    }

    #[test]
    fn test_snapshot_config_deserialize() {
        let json = r#"{
            "PageNum": 1, "PageSize": 10, "TotalNum": 1, "TotalPage": 1, "Order": "asc",
            "LiveStreamSnapshotConfigList": {"LiveStreamSnapshotConfig": [{
                "DomainName": "live.example.com", "AppName": "live", "TimeInterval": 5,
                "OssEndpoint": "oss-cn-hangzhou.aliyuncs.com", "OssBucket": "snaps",
                "OverwriteOssObject": "{AppName}/{StreamName}.jpg"
            }]}
        }"#;
        let resp: SnapshotConfigResponse = serde_json::from_str(json).unwrap();
        let cfg = &resp.live_stream_snapshot_config_list.live_stream_snapshot_config[0];
        assert_eq!(cfg.time_interval, 5);
        assert_eq!(cfg.oss_bucket, "snaps");
        assert!(cfg.sequence_oss_object.is_empty());
    }
}
