use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn redirection_target_recognizes_f_and_capital_f() {
    assert_eq!(redirection_target("-f foo.f"), Some("foo.f"));
    assert_eq!(redirection_target("-F  foo.f"), Some("foo.f"));
    assert_eq!(redirection_target("foo.f"), None);
}

#[test]
fn reads_lines_strips_comments_and_includes_self() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("sources.f");
    fs::write(&list, "a.txt // a comment\nb.txt\n\n+incdir+x+y+z\n").unwrap();

    let items = read(list.to_str().unwrap()).unwrap();
    assert_eq!(items[0], list.to_str().unwrap());
    assert!(items.contains(&"a.txt".to_string()));
    assert!(items.contains(&"b.txt".to_string()));
    assert!(items.contains(&"x".to_string()));
    assert!(items.contains(&"y".to_string()));
    assert!(items.contains(&"z".to_string()));
}

#[test]
fn discards_unrecognized_option_tokens() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("sources.f");
    fs::write(&list, "+define+FOO a.txt -strange b.txt\n").unwrap();

    let items = read(list.to_str().unwrap()).unwrap();
    assert!(!items.contains(&"+define+FOO".to_string()));
    assert!(!items.contains(&"-strange".to_string()));
    assert!(items.contains(&"a.txt".to_string()));
    assert!(items.contains(&"b.txt".to_string()));
}

#[test]
fn follows_nested_filelist_redirection() {
    let dir = tempdir().unwrap();
    let inner = dir.path().join("inner.f");
    let outer = dir.path().join("outer.f");
    fs::write(&inner, "inner_target.txt\n").unwrap();
    fs::write(&outer, format!("-f {}\nouter_target.txt\n", inner.display())).unwrap();

    let items = read(outer.to_str().unwrap()).unwrap();
    assert!(items.contains(&"inner_target.txt".to_string()));
    assert!(items.contains(&"outer_target.txt".to_string()));
}

#[test]
fn missing_filelist_is_an_error() {
    let err = read("/nonexistent/path/to.f").unwrap_err();
    assert!(matches!(err, TargetError::FilelistMissing(_, _)));
}

#[test]
fn cyclic_filelist_is_bounded() {
    let dir = tempdir().unwrap();
    let cyclic = dir.path().join("cyclic.f");
    fs::write(&cyclic, format!("-f {}\n", cyclic.display())).unwrap();

    let err = read(cyclic.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, TargetError::FilelistTooDeep(_)));
}
