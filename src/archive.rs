use std::io::{Cursor, Write};

use base64::Engine;
use thiserror::Error;
use zip::{result::ZipError, write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::catalog::ModuleCatalog;
use crate::models::GeneratedImageResult;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no generated images to export")]
    Empty,
    #[error("image {index} is not valid base64")]
    Decode { index: usize },
    #[error("zip error: {0}")]
    Zip(#[from] ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn entry_name(catalog: &ModuleCatalog, index: usize) -> String {
    format!("{}/{}_{}.jpeg", catalog.export_folder, catalog.export_prefix, index)
}

pub fn archive_name(catalog: &ModuleCatalog) -> String {
    format!("{}.zip", catalog.export_folder)
}

/// Packs the results into a ZIP, one `<folder>/<prefix>_<i>.jpeg` entry per
/// image, numbered from 1 in result order.
pub fn export_zip(catalog: &ModuleCatalog, results: &[GeneratedImageResult]) -> Result<Vec<u8>, ExportError> {
    if results.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    // JPEG data does not compress further.
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (i, result) in results.iter().enumerate() {
        let index = i + 1;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(result.image_base64.trim())
            .map_err(|_| ExportError::Decode { index })?;
        writer.start_file(entry_name(catalog, index), options)?;
        writer.write_all(&bytes)?;
    }

    let cursor = writer.finish()?;
    tracing::info!("📦 Exported {} images as {}", results.len(), archive_name(catalog));
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModuleKind;
    use chrono::Utc;
    use std::io::Read;
    use uuid::Uuid;

    fn result(payload: &[u8]) -> GeneratedImageResult {
        GeneratedImageResult {
            id: Uuid::new_v4(),
            image_base64: base64::engine::general_purpose::STANDARD.encode(payload),
            mime_type: "image/jpeg".into(),
            prompt: "p".into(),
            summary: "s".into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn entries_are_numbered_from_one_under_the_module_folder() {
        let catalog = ModuleKind::Style.catalog();
        let bytes = export_zip(catalog, &[result(b"first"), result(b"second")]).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut second = archive.by_name("StyleMundo_Ensaio_Completo/stylumundo_essay_2.jpeg").unwrap();
        let mut content = Vec::new();
        second.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"second");
    }

    #[test]
    fn nothing_to_export() {
        assert!(matches!(export_zip(ModuleKind::Travel.catalog(), &[]), Err(ExportError::Empty)));
        assert_eq!(archive_name(ModuleKind::Travel.catalog()), "TravelMundo.zip");
    }

    #[test]
    fn corrupt_result_is_reported_by_position() {
        let mut bad = result(b"ok");
        bad.image_base64 = "***".into();
        let err = export_zip(ModuleKind::Sport.catalog(), &[result(b"ok"), bad]).unwrap_err();
        assert!(matches!(err, ExportError::Decode { index: 2 }));
    }
}
