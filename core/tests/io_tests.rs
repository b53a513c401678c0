// tests/io_tests.rs
use shellkit::shell;
use shellkit::ErrorKind;
use std::io::Cursor;

#[test]
fn test_echo_to_joins_with_spaces() {
  let mut out = Vec::new();
  shell::echo_to(&mut out, ["hello", "world"]).unwrap();
  shell::echo_to(&mut out, [1, 2, 3]).unwrap();
  shell::echo_to(&mut out, Vec::<String>::new()).unwrap();
  assert_eq!(String::from_utf8(out).unwrap(), "hello world\n1 2 3\n\n");
}

#[test]
fn test_echo_to_stdout() {
  shell::echo(["to", "stdout"]).unwrap();
}

#[test]
fn test_read_line_from_trims_and_advances() {
  let mut input = Cursor::new("  first line \r\nsecond\nlast");
  assert_eq!(shell::read_line_from(&mut input).unwrap(), "first line");
  assert_eq!(shell::read_line_from(&mut input).unwrap(), "second");
  assert_eq!(shell::read_line_from(&mut input).unwrap(), "last");

  let err = shell::read_line_from(&mut input).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Io);
}
