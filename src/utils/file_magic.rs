/// 检查文件内容是否为 PDF
///
/// 提交只接受 PDF，上传时在第一个数据块上做魔术字节校验，
/// 避免把整份文件读进内存后才发现类型不对。
pub fn is_pdf_content(data: &[u8]) -> bool {
    data.starts_with(b"%PDF")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        assert!(is_pdf_content(b"%PDF-1.4"));
        assert!(is_pdf_content(b"%PDF-1.7\n%binary"));
    }

    #[test]
    fn test_non_pdf_rejected() {
        assert!(!is_pdf_content(b"PK\x03\x04")); // zip/docx
        assert!(!is_pdf_content(b"\x89PNG\r\n\x1a\n"));
        assert!(!is_pdf_content(b"plain text"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!is_pdf_content(&[]));
    }
}
