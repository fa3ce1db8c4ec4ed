use legalbrain_client::error::ClientError;
use legalbrain_client::pack::read_pack_file;
use legalbrain_core::error::CoreError;

#[tokio::test]
async fn reads_pdf_with_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Lot 12 Pack.PDF");
    std::fs::write(&path, b"%PDF-1.4 pack").unwrap();

    let pack = read_pack_file(&path).await.unwrap();
    assert_eq!(pack.file_name(), "Lot 12 Pack.PDF");
    assert_eq!(pack.content_type(), "application/pdf");
    assert_eq!(pack.bytes(), b"%PDF-1.4 pack");
}

#[tokio::test]
async fn rejects_other_extensions_without_reading() {
    let dir = tempfile::tempdir().unwrap();
    // Never created: the extension check comes first.
    let path = dir.path().join("notes.docx");

    let err = read_pack_file(&path).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Core(CoreError::UnsupportedPackType(ref name)) if name == "notes.docx"
    ));
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.zip");

    let err = read_pack_file(&path).await.unwrap_err();
    assert!(matches!(err, ClientError::Io { .. }));
}
