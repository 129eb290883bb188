use std::{io::SeekFrom, path::Path};

use {
    async_trait::async_trait,
    mtsend_config::UploadConfig,
    mtsend_protocol::{ApiError, UploadedFile},
    tokio::{
        fs::File,
        io::{AsyncReadExt, AsyncSeekExt},
    },
    tracing::{debug, info},
};

use crate::error::{Context, Error, Result};

// ── Progress ────────────────────────────────────────────────────────────────

/// Receives `(bytes_done, bytes_total)` after every uploaded part.
pub trait UploadProgress: Send + Sync {
    fn report(&self, done: u64, total: u64);
}

impl<F> UploadProgress for F
where
    F: Fn(u64, u64) + Send + Sync,
{
    fn report(&self, done: u64, total: u64) {
        self(done, total)
    }
}

/// Progress callback that also receives a caller-owned context value.
pub struct BoundProgress<C, F> {
    context: C,
    callback: F,
}

impl<C, F> BoundProgress<C, F>
where
    C: Send + Sync,
    F: Fn(u64, u64, &C) + Send + Sync,
{
    pub fn new(context: C, callback: F) -> Self {
        Self { context, callback }
    }
}

impl<C, F> UploadProgress for BoundProgress<C, F>
where
    C: Send + Sync,
    F: Fn(u64, u64, &C) + Send + Sync,
{
    fn report(&self, done: u64, total: u64) {
        (self.callback)(done, total, &self.context)
    }
}

// ── Contracts ───────────────────────────────────────────────────────────────

/// Uploads local files in parts and re-sends parts the server lost.
#[async_trait]
pub trait ChunkedUploader: Send + Sync {
    /// Upload every part of `path` and return the assembled file handle.
    async fn save_file(
        &self,
        path: &Path,
        progress: Option<&dyn UploadProgress>,
    ) -> Result<UploadedFile>;

    /// Upload the single 0-based part `part` of an upload already started
    /// under `file_id`.
    async fn save_file_part(&self, path: &Path, file_id: i64, part: i32) -> Result<()>;
}

/// Raw part upload calls of the remote API.
#[async_trait]
pub trait UploadApi: Send + Sync {
    /// `upload.saveFilePart`
    async fn save_file_part(
        &self,
        file_id: i64,
        part: i32,
        bytes: Vec<u8>,
    ) -> std::result::Result<(), ApiError>;

    /// `upload.saveBigFilePart`
    async fn save_big_file_part(
        &self,
        file_id: i64,
        part: i32,
        total_parts: i32,
        bytes: Vec<u8>,
    ) -> std::result::Result<(), ApiError>;
}

// ── Part uploader ───────────────────────────────────────────────────────────

/// [`ChunkedUploader`] that reads the file from disk and uploads parts
/// sequentially through an [`UploadApi`].
pub struct PartUploader<A> {
    api: A,
    config: UploadConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plan {
    size: u64,
    part_size: usize,
    total_parts: i32,
    big: bool,
}

impl<A: UploadApi> PartUploader<A> {
    pub fn new(api: A, config: UploadConfig) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn plan(&self, path: &Path, size: u64) -> Result<Plan> {
        if size == 0 {
            return Err(Error::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        if size > self.config.max_file_size {
            return Err(Error::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.config.max_file_size,
            });
        }
        if self.config.part_size == 0 {
            return Err(Error::message("upload part size must be greater than zero"));
        }

        let total_parts = i32::try_from(size.div_ceil(self.config.part_size as u64))
            .context("too many upload parts")?;
        Ok(Plan {
            size,
            part_size: self.config.part_size,
            total_parts,
            big: size > self.config.big_file_threshold,
        })
    }

    async fn open(&self, path: &Path) -> Result<(File, Plan)> {
        let file = File::open(path)
            .await
            .with_context(|| format!("failed to open {}", path.display()))?;
        let size = file
            .metadata()
            .await
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();
        let plan = self.plan(path, size)?;
        Ok((file, plan))
    }

    async fn send_part(&self, file_id: i64, part: i32, plan: &Plan, bytes: Vec<u8>) -> Result<()> {
        if plan.big {
            self.api
                .save_big_file_part(file_id, part, plan.total_parts, bytes)
                .await?;
        } else {
            self.api.save_file_part(file_id, part, bytes).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<A: UploadApi> ChunkedUploader for PartUploader<A> {
    async fn save_file(
        &self,
        path: &Path,
        progress: Option<&dyn UploadProgress>,
    ) -> Result<UploadedFile> {
        let (mut file, plan) = self.open(path).await?;
        let file_id = rand::random::<i64>();
        info!(
            path = %path.display(),
            file_id,
            size = plan.size,
            total_parts = plan.total_parts,
            big = plan.big,
            "upload start"
        );

        let mut buf = vec![0u8; plan.part_size];
        let mut done = 0u64;
        for part in 0..plan.total_parts {
            let len = read_part(&mut file, &mut buf)
                .await
                .with_context(|| format!("failed to read part {part} of {}", path.display()))?;
            if len == 0 {
                return Err(Error::message(format!(
                    "{} shrank during upload at part {part}",
                    path.display()
                )));
            }
            self.send_part(file_id, part, &plan, buf[..len].to_vec())
                .await?;

            done = (done + len as u64).min(plan.size);
            debug!(file_id, part, done, total = plan.size, "uploaded part");
            if let Some(progress) = progress {
                progress.report(done, plan.size);
            }
        }

        info!(path = %path.display(), file_id, "upload complete");
        Ok(UploadedFile {
            id: file_id,
            parts: plan.total_parts,
            name: file_name(path),
            big: plan.big,
        })
    }

    async fn save_file_part(&self, path: &Path, file_id: i64, part: i32) -> Result<()> {
        let (mut file, plan) = self.open(path).await?;
        if !(0..plan.total_parts).contains(&part) {
            return Err(Error::message(format!(
                "part {part} out of range for {} ({} parts)",
                path.display(),
                plan.total_parts
            )));
        }

        let offset = u64::from(part.unsigned_abs()) * plan.part_size as u64;
        file.seek(SeekFrom::Start(offset))
            .await
            .with_context(|| format!("failed to seek to part {part} of {}", path.display()))?;

        let mut buf = vec![0u8; plan.part_size];
        let len = read_part(&mut file, &mut buf)
            .await
            .with_context(|| format!("failed to read part {part} of {}", path.display()))?;
        buf.truncate(len);

        debug!(file_id, part, len, "re-uploading part");
        self.send_part(file_id, part, &plan, buf).await
    }
}

/// Fill `buf` from `file`, stopping early only at end of file.
async fn read_part(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Base name of `path`, as sent in the filename attribute.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        mtsend_protocol::RpcError,
        std::{
            path::PathBuf,
            sync::{Arc, Mutex},
        },
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SentPart {
        file_id: i64,
        part: i32,
        total_parts: Option<i32>,
        bytes: Vec<u8>,
    }

    #[derive(Default)]
    struct RecordingApi {
        parts: Mutex<Vec<SentPart>>,
        fail_part: Option<i32>,
    }

    #[async_trait]
    impl UploadApi for RecordingApi {
        async fn save_file_part(
            &self,
            file_id: i64,
            part: i32,
            bytes: Vec<u8>,
        ) -> std::result::Result<(), ApiError> {
            if self.fail_part == Some(part) {
                return Err(RpcError::new(400, "FILE_PART_INVALID").into());
            }
            self.parts.lock().unwrap().push(SentPart {
                file_id,
                part,
                total_parts: None,
                bytes,
            });
            Ok(())
        }

        async fn save_big_file_part(
            &self,
            file_id: i64,
            part: i32,
            total_parts: i32,
            bytes: Vec<u8>,
        ) -> std::result::Result<(), ApiError> {
            self.parts.lock().unwrap().push(SentPart {
                file_id,
                part,
                total_parts: Some(total_parts),
                bytes,
            });
            Ok(())
        }
    }

    fn config(part_size: usize, big_file_threshold: u64) -> UploadConfig {
        UploadConfig {
            part_size,
            big_file_threshold,
            ..Default::default()
        }
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, data).unwrap();
        path
    }

    #[tokio::test]
    async fn splits_file_into_parts_and_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "clip.mp4", 2500);
        let uploader = PartUploader::new(RecordingApi::default(), config(1024, 1 << 20));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = move |done: u64, total: u64| sink.lock().unwrap().push((done, total));

        let file = uploader.save_file(&path, Some(&progress)).await.unwrap();
        assert_eq!(file.parts, 3);
        assert_eq!(file.name, "clip.mp4");
        assert!(!file.big);

        let parts = uploader.api().parts.lock().unwrap().clone();
        assert_eq!(
            parts.iter().map(|p| p.bytes.len()).collect::<Vec<_>>(),
            vec![1024, 1024, 452]
        );
        assert!(parts.iter().all(|p| p.file_id == file.id && p.total_parts.is_none()));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(1024, 2500), (2048, 2500), (2500, 2500)]
        );
    }

    #[tokio::test]
    async fn big_files_use_big_part_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "big.mp4", 4096);
        let uploader = PartUploader::new(RecordingApi::default(), config(1024, 2048));

        let file = uploader.save_file(&path, None).await.unwrap();
        assert!(file.big);
        let parts = uploader.api().parts.lock().unwrap().clone();
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| p.total_parts == Some(4)));
    }

    #[tokio::test]
    async fn bound_progress_passes_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "clip.mp4", 10);
        let uploader = PartUploader::new(RecordingApi::default(), config(1024, 1 << 20));

        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let progress = BoundProgress::new(
            "chat-7".to_string(),
            move |done: u64, total: u64, chat: &String| {
                sink.lock().unwrap().push(format!("{chat}:{done}/{total}"));
            },
        );
        uploader.save_file(&path, Some(&progress)).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["chat-7:10/10".to_string()]);
    }

    #[tokio::test]
    async fn save_file_part_resends_exactly_one_part() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "clip.mp4", 2500);
        let uploader = PartUploader::new(RecordingApi::default(), config(1024, 1 << 20));

        uploader.save_file_part(&path, 99, 1).await.unwrap();
        let parts = uploader.api().parts.lock().unwrap().clone();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].file_id, 99);
        assert_eq!(parts[0].part, 1);
        let expected: Vec<u8> = (1024..2048).map(|i| (i % 251) as u8).collect();
        assert_eq!(parts[0].bytes, expected);

        uploader.save_file_part(&path, 99, 2).await.unwrap();
        assert_eq!(uploader.api().parts.lock().unwrap()[1].bytes.len(), 452);
    }

    #[tokio::test]
    async fn save_file_part_rejects_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "clip.mp4", 100);
        let uploader = PartUploader::new(RecordingApi::default(), config(1024, 1 << 20));

        let err = uploader.save_file_part(&path, 1, 5).await.unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[tokio::test]
    async fn empty_and_oversized_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write_file(&dir, "empty.mp4", 0);
        let uploader = PartUploader::new(
            RecordingApi::default(),
            UploadConfig {
                part_size: 1024,
                big_file_threshold: 10,
                max_file_size: 100,
            },
        );
        assert!(matches!(
            uploader.save_file(&empty, None).await,
            Err(Error::EmptyFile { .. })
        ));

        let large = write_file(&dir, "large.mp4", 101);
        assert!(matches!(
            uploader.save_file(&large, None).await,
            Err(Error::FileTooLarge { size: 101, limit: 100, .. })
        ));
        assert!(uploader.api().parts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn api_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "clip.mp4", 2048);
        let api = RecordingApi {
            fail_part: Some(1),
            ..Default::default()
        };
        let uploader = PartUploader::new(api, config(1024, 1 << 20));

        let err = uploader.save_file(&path, None).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        assert_eq!(uploader.api().parts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let uploader = PartUploader::new(RecordingApi::default(), config(1024, 1 << 20));
        let err = uploader
            .save_file(Path::new("/nonexistent/clip.mp4"), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to open /nonexistent/clip.mp4"));
    }
}
