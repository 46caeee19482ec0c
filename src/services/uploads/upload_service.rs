//! # 사진 업로드 서비스
//!
//! base64로 전달된 이미지를 디코딩하고, 최대 너비에 맞춰 줄인 뒤
//! 업로드 디렉터리에 `{uuid}.{확장자}` 이름으로 저장합니다.
//!
//! ```text
//! PhotoUpload { mime_type, data }
//!     │ image/* 아니면 415
//!     ▼
//! base64 디코딩 → image 디코딩 → 리사이즈(너비 ≤ max_width) → 파일 저장
//!     │ (디코딩/인코딩은 블로킹 스레드 풀에서 실행)
//!     ▼
//! Some("0b9c...e1.jpeg")
//! ```
//!
//! 사진이 없으면 아무 일도 하지 않고 `None`을 돌려줍니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::web;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, ImageFormat};
use log::{info, warn};
use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::stores::request::PhotoUpload;

/// 사진 업로드 서비스
///
/// 업로드 디렉터리와 최대 너비는 생성 시점의 [`UploadConfig`]를 따릅니다.
pub struct UploadService {
    upload_dir: PathBuf,
    max_width: u32,
}

static UPLOAD_SERVICE_INSTANCE: OnceCell<Arc<UploadService>> = OnceCell::new();

impl UploadService {
    pub fn instance() -> Arc<Self> {
        UPLOAD_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(UploadConfig::upload_dir(), UploadConfig::max_width())))
            .clone()
    }

    pub fn new(upload_dir: PathBuf, max_width: u32) -> Self {
        Self { upload_dir, max_width }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// 사진을 처리하고 저장된 파일 이름을 돌려줍니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(None)` - 사진이 없음
    /// * `Ok(Some(filename))` - 저장 완료
    /// * `Err(AppError::UnsupportedMedia)` - `image/*`가 아니거나 지원하지 않는 이미지 형식
    /// * `Err(AppError::ValidationError)` - base64 또는 이미지 데이터가 깨짐
    pub async fn process(&self, upload: Option<PhotoUpload>) -> AppResult<Option<String>> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let (format, extension) = image_format(&upload.mime_type)?;
        let bytes = decode_payload(&upload.data)?;
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.upload_dir.join(&filename);
        let max_width = self.max_width;

        web::block(move || resize_and_write(&bytes, format, &path, max_width))
            .await
            .map_err(|e| AppError::InternalError(format!("이미지 처리 작업 실패: {}", e)))??;

        info!("📷 사진 저장: {}", filename);
        Ok(Some(filename))
    }

    /// 저장한 사진 파일을 지웁니다. 실패는 경고 로그만 남깁니다.
    pub async fn discard(&self, filename: &str) {
        let path = self.upload_dir.join(filename);

        match web::block(move || std::fs::remove_file(path)).await {
            Ok(Ok(())) => info!("🗑️ 사진 삭제: {}", filename),
            Ok(Err(e)) => warn!("사진 삭제 실패 {}: {}", filename, e),
            Err(e) => warn!("사진 삭제 작업 실패 {}: {}", filename, e),
        }
    }
}

/// MIME 타입을 검사하고 `(이미지 형식, 확장자)`를 돌려줍니다.
///
/// 확장자는 MIME 하위 타입을 그대로 씁니다. (`image/jpeg` → `jpeg`)
fn image_format(mime_type: &str) -> AppResult<(ImageFormat, String)> {
    let mime_type = mime_type.trim().to_ascii_lowercase();

    let Some(subtype) = mime_type.strip_prefix("image/").filter(|s| !s.is_empty()) else {
        return Err(AppError::UnsupportedMedia(
            "이미지 파일만 업로드할 수 있습니다".to_string(),
        ));
    };

    let format = ImageFormat::from_mime_type(&mime_type)
        .filter(|format| format.reading_enabled() && format.writing_enabled())
        .ok_or_else(|| {
            AppError::UnsupportedMedia(format!("지원하지 않는 이미지 형식입니다: {}", mime_type))
        })?;

    Ok((format, subtype.to_string()))
}

/// 순수 base64 또는 `data:<mime>;base64,<data>` 형식을 디코딩합니다.
fn decode_payload(data: &str) -> AppResult<Vec<u8>> {
    let encoded = match data.split_once(',') {
        Some((header, body)) if header.starts_with("data:") => body,
        _ => data,
    };

    STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::ValidationError("사진 데이터가 올바른 base64가 아닙니다".to_string()))
}

/// 너비가 `max_width`를 넘으면 비율을 유지해 줄인 크기, 아니면 원래 크기
pub(crate) fn fit_within_width(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }

    let scaled = (u64::from(height) * u64::from(max_width) + u64::from(width) / 2) / u64::from(width);
    (max_width, scaled.max(1) as u32)
}

fn resize_and_write(bytes: &[u8], format: ImageFormat, path: &Path, max_width: u32) -> AppResult<()> {
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AppError::ValidationError(format!("이미지를 읽을 수 없습니다: {}", e)))?;

    let (width, height) = fit_within_width(image.width(), image.height(), max_width);
    let image = if (width, height) == (image.width(), image.height()) {
        image
    } else {
        image.resize_exact(width, height, FilterType::Lanczos3)
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::InternalError(format!("업로드 디렉터리 생성 실패: {}", e)))?;
    }

    image
        .save_with_format(path, format)
        .map_err(|e| AppError::InternalError(format!("이미지 저장 실패: {}", e)))
}

/// 서비스 레지스트리 생성자 함수
fn upload_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(UploadService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "upload_service",
        constructor: upload_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;

    fn png_base64(width: u32, height: u32) -> String {
        let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        STANDARD.encode(bytes.into_inner())
    }

    fn temp_upload_dir() -> PathBuf {
        std::env::temp_dir().join(format!("delicious-uploads-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_image_format_accepts_image_types() {
        let (format, extension) = image_format("image/jpeg").unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(extension, "jpeg");

        let (format, extension) = image_format("IMAGE/PNG").unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(extension, "png");
    }

    #[test]
    fn test_image_format_rejects_other_types() {
        assert!(matches!(image_format("application/pdf"), Err(AppError::UnsupportedMedia(_))));
        assert!(matches!(image_format("text/plain"), Err(AppError::UnsupportedMedia(_))));
        assert!(matches!(image_format("image/"), Err(AppError::UnsupportedMedia(_))));
    }

    #[test]
    fn test_image_format_rejects_formats_without_codec() {
        assert!(matches!(image_format("image/bmp"), Err(AppError::UnsupportedMedia(_))));
        assert!(matches!(image_format("image/tiff"), Err(AppError::UnsupportedMedia(_))));
        assert!(matches!(image_format("image/x-icon"), Err(AppError::UnsupportedMedia(_))));
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(decode_payload("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_payload("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
        assert!(matches!(decode_payload("%%%"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_fit_within_width() {
        assert_eq!(fit_within_width(1600, 1200, 800), (800, 600));
        assert_eq!(fit_within_width(800, 300, 800), (800, 300));
        // 작은 이미지는 키우지 않음
        assert_eq!(fit_within_width(400, 300, 800), (400, 300));
        assert_eq!(fit_within_width(5000, 1, 800), (800, 1));
    }

    #[actix_web::test]
    async fn test_process_without_photo_is_noop() {
        let service = UploadService::new(temp_upload_dir(), 800);
        assert_eq!(service.process(None).await.unwrap(), None);
        assert!(!service.upload_dir().exists());
    }

    #[actix_web::test]
    async fn test_process_rejects_non_image_mime() {
        let service = UploadService::new(temp_upload_dir(), 800);
        let upload = PhotoUpload { mime_type: "application/pdf".to_string(), data: "aGVsbG8=".to_string() };
        assert!(matches!(service.process(Some(upload)).await, Err(AppError::UnsupportedMedia(_))));
    }

    #[actix_web::test]
    async fn test_process_resizes_and_writes_file() {
        let dir = temp_upload_dir();
        let service = UploadService::new(dir.clone(), 800);
        let upload = PhotoUpload { mime_type: "image/png".to_string(), data: png_base64(1600, 400) };

        let filename = service.process(Some(upload)).await.unwrap().unwrap();
        assert!(filename.ends_with(".png"));
        assert_eq!(filename.len(), 36 + ".png".len());

        let saved = image::open(dir.join(&filename)).unwrap();
        assert_eq!((saved.width(), saved.height()), (800, 200));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[actix_web::test]
    async fn test_process_rejects_bmp_as_unsupported() {
        let service = UploadService::new(temp_upload_dir(), 800);
        // 1x1 BMP
        let bmp = "Qk06AAAAAAAAADYAAAAoAAAAAQAAAAEAAAABABgAAAAAAAQAAAATCwAAEwsAAAAAAAAAAAAA/wAAAA==";
        let upload = PhotoUpload { mime_type: "image/bmp".to_string(), data: bmp.to_string() };
        assert!(matches!(service.process(Some(upload)).await, Err(AppError::UnsupportedMedia(_))));
        assert!(!service.upload_dir().exists());
    }

    #[actix_web::test]
    async fn test_discard_removes_saved_photo() {
        let dir = temp_upload_dir();
        let service = UploadService::new(dir.clone(), 800);
        let upload = PhotoUpload { mime_type: "image/png".to_string(), data: png_base64(10, 10) };

        let filename = service.process(Some(upload)).await.unwrap().unwrap();
        assert!(dir.join(&filename).exists());

        service.discard(&filename).await;
        assert!(!dir.join(&filename).exists());

        // 이미 없는 파일은 경고만 남김
        service.discard(&filename).await;

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[actix_web::test]
    async fn test_process_rejects_corrupt_image() {
        let service = UploadService::new(temp_upload_dir(), 800);
        let upload = PhotoUpload { mime_type: "image/png".to_string(), data: "aGVsbG8=".to_string() };
        assert!(matches!(service.process(Some(upload)).await, Err(AppError::ValidationError(_))));
    }
}
