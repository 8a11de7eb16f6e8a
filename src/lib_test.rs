use super::*;

#[test]
fn test_error_kind() {
    let err: Result<()> = err_at!(KeyNotFound, msg: "missing {}", 10);
    let err = err.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.is_not_found());
    assert_eq!(err.kind().to_string(), "NotFoundError");

    let err: Result<()> = err_at!(NotIndexed, msg: "index {:?}", "email");
    let err = err.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotIndexed);
    assert_eq!(err.kind().to_string(), "NotIndexedError");

    let res: result::Result<(), std::io::Error> =
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
    let err = err_at!(IOError, res).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);
    assert_eq!(err.kind().to_string(), "StoreError");
    assert!(!err.is_not_found());
}

#[test]
fn test_error_display() {
    let err: Result<()> = err_at!(Fatal, msg: "poisoned");
    let s = err.unwrap_err().to_string();
    assert!(s.contains("lib_test.rs:"), "{}", s);
    assert!(s.ends_with("Fatal: poisoned"), "{}", s);

    let res: result::Result<u32, String> = Err("bad toml".to_string());
    let err = err_at!(FailConfig, res, "while loading {}", "ix.toml").unwrap_err();
    assert!(err.to_string().ends_with("bad toml while loading ix.toml"));

    let ok: result::Result<u32, String> = Ok(10);
    assert_eq!(err_at!(FailConfig, ok).unwrap(), 10);
}
