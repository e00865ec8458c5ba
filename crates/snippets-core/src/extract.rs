//! Conversion of submitted snippet markup into stored plain text.
//!
//! The edit form may submit HTML (pasted lists, rich-text editors) or plain
//! text. Either way the stored form is one bullet per line, with no markup,
//! no entities and no redundant whitespace.

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};

/// Longest HTML5 entity name plus the surrounding `&` and `;`.
const MAX_ENTITY_LEN: usize = 40;

/// Turn submitted HTML into newline-separated plain-text lines.
///
/// Every tag becomes a line break. An empty result means the field carried no
/// content at all.
pub fn list_elements_from_html(code: &str) -> String {
  let mut text = String::with_capacity(code.len());
  let mut in_tag = false;
  for c in code.chars() {
    match c {
      '<' => {
        in_tag = true;
        text.push('\n');
      }
      '>' => in_tag = false,
      _ if !in_tag => text.push(c),
      _ => {}
    }
  }

  text
    .split('\n')
    .map(|line| {
      unescape_entities(line)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
    })
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}

/// Entities that browsers also recognise without the closing `;`.
const LEGACY_ENTITIES: &[&str] = &[
  "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml",
  "COPY", "Ccedil", "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT",
  "Iacute", "Icirc", "Igrave", "Iuml", "LT", "Ntilde", "Oacute", "Ocirc",
  "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN", "Uacute",
  "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig",
  "agrave", "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil",
  "cent", "copy", "curren", "deg", "divide", "eacute", "ecirc", "egrave",
  "eth", "euml", "frac12", "frac14", "frac34", "gt", "iacute", "icirc",
  "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
  "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf",
  "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot",
  "raquo", "reg", "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn",
  "times", "uacute", "ucirc", "ugrave", "uml", "uuml", "yacute", "yen",
  "yuml",
];

const LONGEST_LEGACY_ENTITY: usize = 6;

/// Decode named and numeric character references, leaving anything that is
/// not a recognised entity exactly as typed.
///
/// Follows browser leniency: numeric references and the legacy named
/// entities decode without a trailing `;`, and a legacy name is matched as
/// the longest prefix of the letters that follow `&`.
fn unescape_entities(line: &str) -> Cow<'_, str> {
  if !line.contains('&') {
    return Cow::Borrowed(line);
  }

  let mut out = String::with_capacity(line.len());
  let mut rest = line;
  while let Some(amp) = rest.find('&') {
    out.push_str(&rest[..amp]);
    let candidate = &rest[amp..];

    match decode_reference(candidate) {
      Some((text, consumed)) => {
        out.push_str(&text);
        rest = &candidate[consumed..];
      }
      None => {
        out.push('&');
        rest = &candidate[1..];
      }
    }
  }
  out.push_str(rest);
  Cow::Owned(out)
}

/// Decode the reference at the start of `candidate` (which begins with `&`).
/// Returns the replacement text and the number of bytes consumed.
fn decode_reference(candidate: &str) -> Option<(Cow<'static, str>, usize)> {
  let terminated = candidate
    .find(';')
    .filter(|&semi| semi < MAX_ENTITY_LEN)
    .and_then(|semi| {
      unescape_with(&candidate[..=semi], resolve_html5_entity)
        .ok()
        .map(|text| (Cow::Owned(text.into_owned()), semi + 1))
    });

  terminated
    .or_else(|| decode_numeric(candidate))
    .or_else(|| decode_legacy(candidate))
}

/// `&#NNN` or `&#xHHH`, with or without the closing `;`.
fn decode_numeric(candidate: &str) -> Option<(Cow<'static, str>, usize)> {
  let body = candidate.strip_prefix("&#")?;
  let (radix, digits_at) = match body.as_bytes().first() {
    Some(b'x' | b'X') => (16, 3),
    _ => (10, 2),
  };
  let digits = candidate[digits_at..]
    .bytes()
    .take_while(|b| (*b as char).is_digit(radix))
    .count();
  if digits == 0 {
    return None;
  }

  let end = digits_at + digits;
  let c = u32::from_str_radix(&candidate[digits_at..end], radix)
    .ok()
    .filter(|&code| code != 0)
    .and_then(char::from_u32)
    .unwrap_or(char::REPLACEMENT_CHARACTER);
  let consumed = if candidate[end..].starts_with(';') { end + 1 } else { end };
  Some((Cow::Owned(c.to_string()), consumed))
}

/// The longest legacy entity name that prefixes the letters after `&`.
fn decode_legacy(candidate: &str) -> Option<(Cow<'static, str>, usize)> {
  let name = &candidate[1..];
  let run = name
    .bytes()
    .take_while(u8::is_ascii_alphanumeric)
    .count()
    .min(LONGEST_LEGACY_ENTITY);

  (2..=run).rev().find_map(|len| {
    let prefix = &name[..len];
    LEGACY_ENTITIES
      .contains(&prefix)
      .then(|| resolve_html5_entity(prefix))
      .flatten()
      .map(|text| (Cow::Borrowed(text), len + 1))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paragraphs_become_lines() {
    assert_eq!(
      list_elements_from_html("<p>Did X</p><p>Did   Y</p>"),
      "Did X\nDid Y"
    );
  }

  #[test]
  fn list_markup_from_editor() {
    let html = "<ul>\n  <li>Reviewed <b>parser</b> PR</li>\n  <li>  </li>\n</ul>";
    assert_eq!(list_elements_from_html(html), "Reviewed\nparser\nPR");
  }

  #[test]
  fn tags_only_is_empty() {
    assert_eq!(list_elements_from_html("<ul><li></li><br/></ul>"), "");
    assert_eq!(list_elements_from_html(""), "");
    assert_eq!(list_elements_from_html("   \n\t "), "");
  }

  #[test]
  fn plain_text_lines_survive() {
    assert_eq!(
      list_elements_from_html("first line\r\n\r\n  second   line  "),
      "first line\nsecond line"
    );
  }

  #[test]
  fn entities_are_unescaped() {
    assert_eq!(list_elements_from_html("Fish &amp; chips"), "Fish & chips");
    assert_eq!(list_elements_from_html("&lt;b&gt; is bold"), "<b> is bold");
    assert_eq!(list_elements_from_html("it&#39;s&nbsp;done"), "it's done");
    assert_eq!(list_elements_from_html("caf&eacute;"), "café");
  }

  #[test]
  fn unknown_entities_are_kept() {
    assert_eq!(list_elements_from_html("AT&T"), "AT&T");
    assert_eq!(list_elements_from_html("&bogus; & more"), "&bogus; & more");
    assert_eq!(list_elements_from_html("a &x&amp; b"), "a &x& b");
    assert_eq!(list_elements_from_html("&#; &#x;"), "&#; &#x;");
  }

  #[test]
  fn entities_without_semicolon_are_unescaped() {
    assert_eq!(list_elements_from_html("Fish &amp chips &lt3"), "Fish & chips <3");
    assert_eq!(list_elements_from_html("&copy 2024"), "\u{a9} 2024");
    assert_eq!(list_elements_from_html("it&#39s &#x41 B"), "it's A B");
    assert_eq!(list_elements_from_html("&ampx"), "&x");
    assert_eq!(list_elements_from_html("&notit;"), "\u{ac}it;");
  }

  #[test]
  fn unterminated_tag_swallows_rest() {
    assert_eq!(list_elements_from_html("kept <dropped"), "kept");
  }
}
