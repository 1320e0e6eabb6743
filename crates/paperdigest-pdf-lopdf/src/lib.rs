use lopdf::Document;

use paperdigest_core::{BackendError, PdfBackend};

/// lopdf-based implementation of [`PdfBackend`].
///
/// Pure-Rust extraction with no native dependencies. Layout is not
/// reconstructed: columns, figures, and tables come out as reading
/// order only, which is all the downstream heading heuristic needs.
#[derive(Debug, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn extract_text(&self, data: &[u8]) -> Result<String, BackendError> {
        let document =
            Document::load_mem(data).map_err(|e| BackendError::Open(e.to_string()))?;

        let mut pages_text = Vec::new();
        // get_pages yields pages keyed by 1-based number, in document order
        for (page_number, _object_id) in document.get_pages() {
            let text = document
                .extract_text(&[page_number])
                .map_err(|e| BackendError::Extraction(e.to_string()))?;
            pages_text.push(text);
        }

        Ok(pages_text.join("\n").trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// Build a minimal single-page PDF whose page shows `text`.
    fn one_page_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn extracts_text_from_a_valid_pdf() {
        let data = one_page_pdf("Abstract");
        let backend = LopdfBackend::new();
        let text = backend.extract_text(&data).unwrap();
        assert!(text.contains("Abstract"), "extracted: {text:?}");
    }

    #[test]
    fn garbage_bytes_fail_to_open() {
        let backend = LopdfBackend::new();
        let err = backend.extract_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, BackendError::Open(_)));
    }

    #[test]
    fn empty_payload_fails_to_open() {
        let backend = LopdfBackend::new();
        assert!(backend.extract_text(&[]).is_err());
    }
}
