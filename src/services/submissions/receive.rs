//! multipart 接收：文本字段 + 单个 PDF 文件暂存
//!
//! 上传与重新提交共用。文件在校验通过后落到暂存目录，
//! 调用方负责把它推进文件存储或在失败时删除。

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AssignMateError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::is_pdf_content;

pub(super) struct ReceivedFile {
    pub original_name: String,
    pub tmp_path: PathBuf,
    pub size: usize,
}

impl ReceivedFile {
    /// 删除暂存文件，失败只记日志
    pub fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.tmp_path) {
            tracing::warn!("Failed to remove temp file {}: {}", self.tmp_path.display(), e);
        }
    }
}

pub(super) enum Received {
    Upload {
        fields: HashMap<String, String>,
        file: ReceivedFile,
    },
    Rejected(HttpResponse),
}

/// 读取 multipart 请求：收集文本字段，把唯一的 PDF 文件写入暂存目录
///
/// 第一个数据块做 %PDF 魔术字节校验，超过大小上限立即中止。
/// 任何拒绝路径都不会留下暂存文件。
pub(super) async fn receive_pdf_upload(mut payload: Multipart) -> ActixResult<Received> {
    let config = AppConfig::get();
    let tmp_dir = &config.upload.tmp_dir;
    let max_size = config.upload.max_size;

    // 确保暂存目录存在
    if !Path::new(tmp_dir).exists()
        && let Err(e) = fs::create_dir_all(tmp_dir)
    {
        tracing::error!("{}", AssignMateError::file_operation(format!("{e}")));
        return Ok(Received::Rejected(HttpResponse::InternalServerError().json(
            ApiResponse::error_empty(ErrorCode::FileUploadFailed, "创建暂存目录失败"),
        )));
    }

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut received: Option<ReceivedFile> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            if received.is_some() {
                if let Some(file) = &received {
                    file.discard();
                }
                return Ok(Received::Rejected(HttpResponse::BadRequest().json(
                    ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "Only one file can be uploaded at a time",
                    ),
                )));
            }

            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 只收 PDF
            let is_pdf_ext = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if !is_pdf_ext {
                return Ok(Received::Rejected(HttpResponse::BadRequest().json(
                    ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "Only PDF submissions are accepted",
                    ),
                )));
            }

            let tmp_path = Path::new(tmp_dir).join(format!(
                "{}-{}.part",
                chrono::Utc::now().timestamp(),
                Uuid::new_v4()
            ));
            let mut f = match File::create(&tmp_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", AssignMateError::file_operation(format!("{e}")));
                    return Ok(Received::Rejected(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::FileUploadFailed,
                            "暂存文件创建失败",
                        )),
                    ));
                }
            };

            let mut total_size: usize = 0;
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                // 客户端中断或读流失败时不留暂存文件
                let data = match chunk {
                    Ok(data) => data,
                    Err(e) => {
                        let _ = fs::remove_file(&tmp_path);
                        return Err(e.into());
                    }
                };

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !is_pdf_content(&data) {
                        let _ = fs::remove_file(&tmp_path);
                        return Ok(Received::Rejected(HttpResponse::BadRequest().json(
                            ApiResponse::error_empty(
                                ErrorCode::FileTypeNotAllowed,
                                "文件内容不是 PDF",
                            ),
                        )));
                    }
                }

                total_size += data.len();
                if total_size > max_size {
                    let _ = fs::remove_file(&tmp_path);
                    return Ok(Received::Rejected(HttpResponse::BadRequest().json(
                        ApiResponse::error_empty(
                            ErrorCode::FileSizeExceeded,
                            "File size exceeds the limit",
                        ),
                    )));
                }
                if let Err(e) = f.write_all(&data) {
                    let _ = fs::remove_file(&tmp_path);
                    return Err(e.into());
                }
            }

            if total_size == 0 {
                let _ = fs::remove_file(&tmp_path);
                return Ok(Received::Rejected(HttpResponse::BadRequest().json(
                    ApiResponse::error_empty(ErrorCode::EmptyFile, "Uploaded file is empty"),
                )));
            }

            received = Some(ReceivedFile {
                original_name,
                tmp_path,
                size: total_size,
            });
        } else if !name.is_empty() {
            // 文本字段（assignment_id、remark_id 等）
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = match chunk {
                    Ok(data) => data,
                    Err(e) => {
                        // 文件字段可能已经落盘，一并清理
                        if let Some(file) = &received {
                            file.discard();
                        }
                        return Err(e.into());
                    }
                };
                value.extend_from_slice(&data);
                if value.len() > 256 {
                    break; // 文本字段不应该这么长
                }
            }
            fields.insert(name, String::from_utf8_lossy(&value).trim().to_string());
        }
    }

    match received {
        Some(file) => Ok(Received::Upload { fields, file }),
        None => Ok(Received::Rejected(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::FileNotFound, "No file found in upload payload"),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::PayloadError;
    use actix_web::http::header::{self, HeaderMap};
    use actix_web::web::Bytes;
    use futures_util::stream;

    const BOUNDARY: &str = "abbc761f78ff4d7cb7573b5a23f96ef0";

    fn multipart_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary=\"{BOUNDARY}\"")
                .parse()
                .unwrap(),
        );
        headers
    }

    fn file_part_head(filename: &str) -> Bytes {
        Bytes::from(format!(
            "--{BOUNDARY}\r\ncontent-disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\r\n"
        ))
    }

    // stream::iter 的元素全部立即就绪，actix-multipart 会在第一次 poll 就吞掉
    // 尾部错误；每个元素前让出两次调度：poll_stream 每次缓冲一个元素后会再
    // poll 一次探测 Pending，只让出一次的话尾部错误仍会被外层 try_next 吞掉
    fn trickle(
        items: Vec<Result<Bytes, PayloadError>>,
    ) -> impl futures_util::Stream<Item = Result<Bytes, PayloadError>> {
        stream::iter(items).then(|item| async move {
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            item
        })
    }

    fn tmp_part_files() -> Vec<std::path::PathBuf> {
        let tmp_dir = &AppConfig::get().upload.tmp_dir;
        match fs::read_dir(tmp_dir) {
            Ok(entries) => {
                let mut paths: Vec<_> = entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.extension().is_some_and(|ext| ext == "part"))
                    .collect();
                paths.sort();
                paths
            }
            Err(_) => Vec::new(),
        }
    }

    // 中断的上传不能留下暂存文件，无论断在文件块中途还是后续文本字段
    #[actix_web::test]
    async fn test_aborted_upload_leaves_no_temp_file() {
        let before = tmp_part_files();

        // 文件传到一半客户端断开
        let mut body = b"%PDF-1.4\n".to_vec();
        body.resize(128 * 1024, b'a');
        let payload = Multipart::new(
            &multipart_headers(),
            trickle(vec![
                Ok(file_part_head("report.pdf")),
                Ok(Bytes::from(body)),
                Err(PayloadError::Incomplete(None)),
            ]),
        );
        assert!(receive_pdf_upload(payload).await.is_err());
        assert_eq!(
            tmp_part_files(),
            before,
            "temp file left behind after aborted upload"
        );

        // 文件字段已落盘，后续文本字段读取失败
        let payload = Multipart::new(
            &multipart_headers(),
            trickle(vec![
                Ok(file_part_head("report.pdf")),
                Ok(Bytes::from_static(b"%PDF-1.4 minimal content")),
                Ok(Bytes::from(format!(
                    "\r\n--{BOUNDARY}\r\ncontent-disposition: form-data; name=\"assignment_id\"\r\n\r\n42"
                ))),
                Err(PayloadError::Incomplete(None)),
            ]),
        );
        assert!(receive_pdf_upload(payload).await.is_err());
        assert_eq!(
            tmp_part_files(),
            before,
            "temp file left behind after text field error"
        );
    }
}
