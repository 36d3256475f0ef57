use anyhow::Result;
use std::path::PathBuf;

/// Device position resolved at capture time, decimal degrees.
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A photo staged for upload. The multipart filename and MIME type are
/// derived from the source file's extension.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl CapturedImage {
    pub async fn from_path(path: &str) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(path, bytes))
    }

    /// Seam for camera integrations that hand over bytes directly.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
    }

    pub fn upload_name(&self) -> String {
        format!("photo.{}", self.extension())
    }

    pub fn mime(&self) -> &'static str {
        mime_for_extension(self.extension())
    }
}

pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_name_and_mime_follow_extension() {
        let image = CapturedImage::from_bytes("/tmp/IMG_2041.JPG", vec![1, 2, 3]);
        assert_eq!(image.upload_name(), "photo.JPG");
        assert_eq!(image.mime(), "image/jpeg");

        let image = CapturedImage::from_bytes("/tmp/shot.png", vec![]);
        assert_eq!(image.upload_name(), "photo.png");
        assert_eq!(image.mime(), "image/png");

        // No extension falls back to jpeg, matching the camera default.
        let image = CapturedImage::from_bytes("/tmp/capture", vec![]);
        assert_eq!(image.upload_name(), "photo.jpg");
        assert_eq!(image.mime(), "image/jpeg");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(mime_for_extension("tiff"), "application/octet-stream");
        assert_eq!(mime_for_extension("JPEG"), "image/jpeg");
    }
}
