/// Convert operand text to an integer the way C's `atoi` does.
///
/// Leading ASCII whitespace is skipped, one optional sign is accepted and
/// decimal digits are consumed up to the first non-digit. Text without any
/// digits converts to 0. Values outside the `i32` range saturate.
#[must_use]
pub fn parse_operand(text: &str) -> i32 {
  let mut bytes = text
    .bytes()
    .skip_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'))
    .peekable();

  let negative = match bytes.peek() {
    Some(b'-') => {
      bytes.next();
      true
    }
    Some(b'+') => {
      bytes.next();
      false
    }
    _ => false,
  };

  // One past i32::MAX so that i32::MIN survives negation
  let limit = i64::from(i32::MAX) + 1;
  let mut magnitude: i64 = 0;
  for digit in bytes.map_while(|b| char::from(b).to_digit(10)) {
    magnitude = (magnitude * 10 + i64::from(digit)).min(limit);
  }

  let value = if negative { -magnitude } else { magnitude };
  i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX })
}
