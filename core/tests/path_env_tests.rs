// tests/path_env_tests.rs
use serial_test::serial;
use shellkit::shell::{self, basename, clean, dirname};
use shellkit::ErrorKind;

#[test]
fn test_basename() {
  assert_eq!(basename("/usr/lib/libc.so"), "libc.so");
  assert_eq!(basename("dir/sub/"), "sub");
  assert_eq!(basename("file"), "file");
  assert_eq!(basename("/"), "/");
  assert_eq!(basename("///"), "/");
  assert_eq!(basename(""), ".");
}

#[test]
fn test_dirname() {
  assert_eq!(dirname("/usr/lib/libc.so"), "/usr/lib");
  assert_eq!(dirname("a/b/"), "a/b");
  assert_eq!(dirname("file"), ".");
  assert_eq!(dirname("/file"), "/");
  assert_eq!(dirname("a//b"), "a");
  assert_eq!(dirname(""), ".");
}

#[test]
fn test_clean() {
  assert_eq!(clean("a/./b/../c//"), "a/c");
  assert_eq!(clean("/../x"), "/x");
  assert_eq!(clean("../../a"), "../../a");
  assert_eq!(clean("a/.."), ".");
  assert_eq!(clean("/"), "/");
}

#[test]
#[serial]
fn test_env_roundtrip() {
  let key = "SHELLKIT_TEST_ENV_ROUNDTRIP";
  assert_eq!(shell::env(key), "");
  shell::set_env(key, "value").unwrap();
  assert_eq!(shell::env(key), "value");
  shell::set_env(key, "").unwrap();
  assert_eq!(shell::env(key), "");
}

#[test]
#[serial]
fn test_set_env_rejects_invalid_input() {
  assert_eq!(shell::set_env("", "x").unwrap_err().kind(), ErrorKind::InvalidArgument);
  assert_eq!(shell::set_env("A=B", "x").unwrap_err().kind(), ErrorKind::InvalidArgument);
  assert_eq!(
    shell::set_env("SHELLKIT_NUL", "a\0b").unwrap_err().kind(),
    ErrorKind::InvalidArgument
  );
}
