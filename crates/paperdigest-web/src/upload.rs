use axum::extract::Multipart;

/// An uploaded PDF with its data and metadata.
pub struct UploadedPdf {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parse a multipart form upload into the PDF payload.
///
/// Returns `Ok(None)` when no usable `pdf` field is present (the
/// missing-file case), and `Err` when a file is present but is not a
/// PDF.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<Option<UploadedPdf>, String> {
    let mut file: Option<UploadedPdf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                if data.is_empty() {
                    continue;
                }
                validate_pdf(&filename, &data)?;

                file = Some(UploadedPdf { filename, data });
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    Ok(file)
}

/// Check extension and magic bytes before handing data to the pipeline.
fn validate_pdf(filename: &str, data: &[u8]) -> Result<(), String> {
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err("Unsupported file type. Please upload a PDF file.".to_string());
    }
    if !data.starts_with(b"%PDF-") {
        return Err("File has .pdf extension but doesn't appear to be a valid PDF".to_string());
    }
    Ok(())
}
