//! Live API action names

pub const LIVE_API_VERSION: &str = "2016-11-01";

// Stream queries
pub const DESCRIBE_LIVE_STREAMS_PUBLISH_LIST: &str = "DescribeLiveStreamsPublishList";
pub const DESCRIBE_LIVE_STREAMS_ONLINE_LIST: &str = "DescribeLiveStreamsOnlineList";
pub const DESCRIBE_LIVE_STREAMS_BLOCK_LIST: &str = "DescribeLiveStreamsBlockList";
pub const DESCRIBE_LIVE_STREAMS_CONTROL_HISTORY: &str = "DescribeLiveStreamsControlHistory";
pub const DESCRIBE_LIVE_STREAM_ONLINE_USER_NUM: &str = "DescribeLiveStreamOnlineUserNum";
pub const DESCRIBE_LIVE_STREAMS_FRAME_RATE_AND_BIT_RATE_DATA: &str =
    "DescribeLiveStreamsFrameRateAndBitRateData";

// Stream control
pub const FORBID_LIVE_STREAM: &str = "ForbidLiveStream";
pub const RESUME_LIVE_STREAM: &str = "ResumeLiveStream";

// Recording
pub const ADD_LIVE_APP_RECORD_CONFIG: &str = "AddLiveAppRecordConfig";
pub const DESCRIBE_LIVE_APP_RECORD_CONFIG: &str = "DescribeLiveAppRecordConfig";
pub const DELETE_LIVE_APP_RECORD_CONFIG: &str = "DeleteLiveAppRecordConfig";

// Snapshots
pub const ADD_LIVE_APP_SNAPSHOT_CONFIG: &str = "AddLiveAppSnapshotConfig";
pub const UPDATE_LIVE_APP_SNAPSHOT_CONFIG: &str = "UpdateLiveAppSnapshotConfig";
pub const DESCRIBE_LIVE_SNAPSHOT_CONFIG: &str = "DescribeLiveSnapshotConfig";
pub const DELETE_LIVE_APP_SNAPSHOT_CONFIG: &str = "DeleteLiveAppSnapshotConfig";
