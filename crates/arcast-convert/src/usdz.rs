//! usdz container packaging.
//!
//! A usdz file is a ZIP archive with two constraints beyond the ZIP spec:
//! every entry is stored uncompressed, and each entry's file data begins at a
//! 64-byte-aligned offset within the archive. Alignment is achieved through
//! the ZIP extra-field padding the zip crate emits for aligned entries.

use crate::traits::ConversionError;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Required data offset alignment for usdz entries.
const USDZ_ALIGNMENT: u16 = 64;

/// Pack named entries into a usdz archive. The first entry becomes the default
/// layer, so callers put the root `.usda` file first.
pub(crate) fn pack_usdz(entries: &[(&str, &[u8])]) -> Result<Vec<u8>, ConversionError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, data) in entries {
        writer
            .start_file_aligned(*name, options, USDZ_ALIGNMENT)
            .map_err(|e| ConversionError::Packaging(e.to_string()))?;
        writer
            .write_all(data)
            .map_err(|e| ConversionError::Packaging(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| ConversionError::Packaging(e.to_string()))?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn entries_are_stored_and_aligned() {
        let usda = b"#usda 1.0\n";
        let extra = vec![0xABu8; 100];
        let packed = pack_usdz(&[("model.usda", usda.as_slice()), ("texture.bin", &extra)]).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(packed)).unwrap();
        assert_eq!(archive.len(), 2);

        for index in 0..archive.len() {
            let entry = archive.by_index(index).unwrap();
            assert_eq!(entry.compression(), CompressionMethod::Stored);
            assert_eq!(entry.data_start() % u64::from(USDZ_ALIGNMENT), 0);
        }
    }

    #[test]
    fn first_entry_is_the_root_layer() {
        let packed = pack_usdz(&[("model.usda", b"#usda 1.0\n".as_slice())]).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(packed)).unwrap();

        let mut entry = archive.by_index(0).unwrap();
        assert_eq!(entry.name(), "model.usda");

        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "#usda 1.0\n");
    }
}
