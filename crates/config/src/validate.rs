//! Semantic checks that serde cannot express.

use mtsend_protocol::{MAX_PART_SIZE, PART_SIZE_ALIGN};

use crate::schema::MtsendConfig;

/// A single rejected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Dotted path, e.g. `upload.part_size`.
    pub path: &'static str,
    pub message: String,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Return every problem found; an empty list means the config is usable.
#[must_use]
pub fn validate(config: &MtsendConfig) -> Vec<Problem> {
    let mut problems = Vec::new();
    let upload = &config.upload;

    if upload.part_size == 0
        || upload.part_size % PART_SIZE_ALIGN != 0
        || MAX_PART_SIZE % upload.part_size != 0
    {
        problems.push(Problem {
            path: "upload.part_size",
            message: format!(
                "{} must be a multiple of {PART_SIZE_ALIGN} that divides {MAX_PART_SIZE}",
                upload.part_size
            ),
        });
    }

    if upload.max_file_size == 0 {
        problems.push(Problem {
            path: "upload.max_file_size",
            message: "must be greater than zero".into(),
        });
    }

    if upload.big_file_threshold > upload.max_file_size {
        problems.push(Problem {
            path: "upload.big_file_threshold",
            message: format!(
                "{} exceeds upload.max_file_size ({})",
                upload.big_file_threshold, upload.max_file_size
            ),
        });
    }

    if config.send.timeout_secs == Some(0) {
        problems.push(Problem {
            path: "send.timeout_secs",
            message: "must be greater than zero when set".into(),
        });
    }

    problems
}
