use crate::file_reader::read_content;
use crate::file_reader::read_content_if_exists;
use crate::file_reader::ReadContentError;

type Result<T> = std::result::Result<T, ReadContentError>;

#[test]
fn strips_a_leading_byte_order_mark() -> Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("Bom.graphql");
    std::fs::write(&file_path, "\u{feff}fragment F on User { id }").expect("write");

    assert_eq!(read_content(&file_path)?, "fragment F on User { id }");
    Ok(())
}

#[test]
fn missing_files_are_none_or_not_a_file() -> Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("Missing.graphql");

    assert_eq!(read_content_if_exists(&file_path)?, None);
    assert_eq!(read_content_if_exists(dir.path())?, None);
    let err = read_content(&file_path).expect_err("missing file should fail");
    assert_eq!(err, ReadContentError::NotAFile { file_path: file_path.to_owned() });
    assert_eq!(err.file_path(), file_path.as_path());
    Ok(())
}

#[test]
fn invalid_utf8_is_a_decode_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("Binary.graphql");
    std::fs::write(&file_path, [0xff, 0xfe, 0x00]).expect("write");

    assert!(matches!(read_content(&file_path), Err(ReadContentError::Decode { .. })));
}
