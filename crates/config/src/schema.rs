use {
    mtsend_protocol::{MAX_PART_SIZE, ParseMode},
    serde::{Deserialize, Serialize},
};

const MIB: u64 = 1024 * 1024;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtsendConfig {
    pub upload: UploadConfig,
    pub send: SendConfig,
}

/// Chunked upload tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Bytes per uploaded part.
    pub part_size: usize,

    /// Files strictly larger than this use the big-file part call.
    pub big_file_threshold: u64,

    /// Largest file accepted for upload.
    pub max_file_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            part_size: MAX_PART_SIZE,
            big_file_threshold: 10 * MIB,
            max_file_size: 1500 * MIB,
        }
    }
}

/// Send behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendConfig {
    /// Caption parse mode used when the caller does not pick one.
    pub parse_mode: ParseMode,

    /// Cap on missing-part recoveries for one send. Unbounded when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_part_recovery_attempts: Option<u32>,

    /// Abort the whole send after this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}
