//! 사진 업로드 ([`upload_service::UploadService`])

pub mod upload_service;
