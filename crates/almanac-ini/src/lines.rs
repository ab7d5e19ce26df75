//! Line-level tokenizing shared by all key/value files.

/// One `key = value` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// 1-based line number, for diagnostics.
    pub line: usize,
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Entry<'a> {
    /// Parse the key as a numeric id.
    pub fn id(&self) -> Option<i32> {
        self.key.parse().ok()
    }

    /// Split a dotted key (`12.trade`) into its id and property.
    pub fn id_and_property(&self) -> Option<(i32, &'a str)> {
        let (id, property) = self.key.split_once('.')?;
        Some((id.trim().parse().ok()?, property.trim()))
    }
}

/// Iterate over the `key = value` lines of a file.
///
/// Blank lines, `;`/`#` comments and lines without `=` are skipped. The line is
/// split on the first `=` and both halves are trimmed.
pub fn entries(text: &str) -> impl Iterator<Item = Entry<'_>> {
    text.lines().enumerate().filter_map(|(index, raw)| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            return None;
        }

        let (key, value) = line.split_once('=')?;
        Some(Entry {
            line: index + 1,
            key: key.trim(),
            value: value.trim(),
        })
    })
}

/// Split a comma-separated value into groups of exactly `size` fields.
///
/// A trailing partial group is dropped. A `size` of zero yields nothing.
pub fn csv_groups(value: &str, size: usize) -> impl Iterator<Item = Vec<&str>> {
    let mut fields = value.split(',').map(str::trim);
    std::iter::from_fn(move || {
        if size == 0 {
            return None;
        }
        let group: Vec<&str> = fields.by_ref().take(size).collect();
        (group.len() == size).then_some(group)
    })
}

/// A `{...}` tuple: numeric fields plus an optional trailing quoted string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tuple {
    pub fields: Vec<String>,
    pub text: Option<String>,
}

impl Tuple {
    /// Parse a required integer field.
    pub fn int(&self, index: usize) -> Option<i32> {
        self.fields.get(index)?.parse().ok()
    }

    /// Parse an optional integer field; absent means zero, malformed means `None`.
    pub fn int_or_zero(&self, index: usize) -> Option<i32> {
        match self.fields.get(index) {
            None => Some(0),
            Some(field) => field.parse().ok(),
        }
    }

    /// Parse an optional float field; absent means zero, malformed means `None`.
    pub fn float_or_zero(&self, index: usize) -> Option<f64> {
        match self.fields.get(index) {
            None => Some(0.0),
            Some(field) => field.parse().ok(),
        }
    }
}

/// Extract every brace-delimited tuple from a value.
///
/// Tuples that are unterminated, or that carry a quoted string anywhere but the
/// last field, are skipped.
pub fn tuples(value: &str) -> Vec<Tuple> {
    let mut result = Vec::new();
    let mut rest = value;

    while let Some(start) = rest.find('{') {
        let body_start = start + 1;
        let Some(len) = closing_brace(&rest[body_start..]) else {
            break;
        };

        if let Some(tuple) = parse_tuple_body(&rest[body_start..body_start + len]) {
            result.push(tuple);
        }
        rest = &rest[body_start + len + 1..];
    }

    result
}

/// Position of the `}` closing a tuple body, ignoring braces inside quotes.
fn closing_brace(body: &str) -> Option<usize> {
    let mut quoted = false;
    for (pos, c) in body.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '}' if !quoted => return Some(pos),
            _ => {}
        }
    }
    None
}

fn parse_tuple_body(body: &str) -> Option<Tuple> {
    let mut raw_fields = Vec::new();
    let mut quoted = false;
    let mut field_start = 0;

    for (pos, c) in body.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                raw_fields.push(body[field_start..pos].trim());
                field_start = pos + 1;
            }
            _ => {}
        }
    }
    raw_fields.push(body[field_start..].trim());

    let mut tuple = Tuple::default();
    let last = raw_fields.len() - 1;
    for (index, field) in raw_fields.into_iter().enumerate() {
        if field.starts_with('"') {
            if index != last || field.len() < 2 || !field.ends_with('"') {
                return None;
            }
            tuple.text = Some(field[1..field.len() - 1].to_string());
        } else {
            tuple.fields.push(field.to_string());
        }
    }

    Some(tuple)
}
