use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::MediaStore;
use crate::UploadError;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const BUCKET: &str = "game-images";
const OBJECT_PREFIX: &str = "games";

/// An image picked for upload, not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Rejects non-image content types and files over [`MAX_IMAGE_BYTES`].
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.size() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge {
                size: self.size(),
                limit: MAX_IMAGE_BYTES,
            });
        }
        if !self.content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(self.content_type.clone()));
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("bin")
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Media store on the local filesystem.
///
/// Objects live under `<root>/game-images/games/` and are served from
/// `<public_base_url>/game-images/games/`.
pub struct FsMediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Object path inside the bucket for a public URL issued by this store.
    fn object_path<'a>(&self, public_url: &'a str) -> Result<&'a str, UploadError> {
        let invalid = || UploadError::InvalidUrl(public_url.to_string());
        let rest = public_url
            .strip_prefix(self.public_base_url.as_str())
            .and_then(|rest| rest.strip_prefix(&format!("/{BUCKET}/")))
            .ok_or_else(invalid)?;
        if rest.is_empty() || rest.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(invalid());
        }
        Ok(rest)
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn upload(
        &self,
        image: &ImageUpload,
        associated_id: &str,
    ) -> Result<String, UploadError> {
        let object = format!(
            "{OBJECT_PREFIX}/{associated_id}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            image.extension()
        );
        let path = self.root.join(BUCKET).join(&object);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => UploadError::AlreadyExists(object.clone()),
                _ => UploadError::Io(e),
            })?;
        file.write_all(&image.bytes).await?;
        file.flush().await?;

        tracing::info!("Stored {} bytes as {object}", image.size());
        Ok(format!("{}/{BUCKET}/{object}", self.public_base_url))
    }

    async fn delete(&self, public_url: &str) -> Result<(), UploadError> {
        let object = self.object_path(public_url)?;
        tokio::fs::remove_file(self.root.join(BUCKET).join(object)).await?;
        tracing::info!("Deleted {object}");
        Ok(())
    }
}
