//! Build property publication
//!
//! Writes the commit id into the caller-owned property map, and loads or
//! stores that map as a `.properties` file for command-line use.
//!
//! The file is edited line by line: only the entry whose key changed is
//! rewritten (or appended), every other line is written back byte for byte.

use std::fs;
use std::path::Path;

use crate::models::{PropertyMap, StampError};

/// Writes the commit id under a configured key
pub struct PropertyPublisher;

impl PropertyPublisher {
    /// Set `name` to `value`, overwriting any previous entry.
    ///
    /// An empty name is a configuration error and leaves the map untouched.
    pub fn publish(properties: &mut PropertyMap, name: &str, value: &str) -> Result<(), StampError> {
        if name.trim().is_empty() {
            return Err(StampError::Configuration(
                "property update is enabled, so 'property_name' must be a valid name".to_string(),
            ));
        }
        properties.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// One key/value entry, possibly spanning continuation lines
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    first_line: usize,
    last_line: usize,
    key: String,
    value: String,
}

/// A properties file kept as its raw lines plus the entries found in them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesFile {
    /// Raw lines including their terminators
    lines: Vec<String>,
    entries: Vec<Entry>,
}

impl PropertiesFile {
    /// Load a properties file; a missing file yields an empty document
    pub fn load(path: &Path) -> Result<Self, StampError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| StampError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
        let entries = scan_entries(&lines);
        Self { lines, entries }
    }

    /// Entries as a map; for repeated keys the last one wins
    pub fn to_map(&self) -> PropertyMap {
        self.entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Set one entry, replacing the lines of its last occurrence or appending
    pub fn set(&mut self, key: &str, value: &str) {
        let line = format!("{}={}", escape_key(key), escape_value(value));

        match self.entries.iter().rev().find(|entry| entry.key == key) {
            Some(entry) => {
                let (first, last) = (entry.first_line, entry.last_line);
                let terminator = line_terminator(&self.lines[last]).to_string();
                self.lines.drain(first..=last);
                self.lines.insert(first, format!("{}{}", line, terminator));
            }
            None => {
                if let Some(last) = self.lines.last_mut() {
                    if !last.ends_with('\n') {
                        last.push('\n');
                    }
                }
                self.lines.push(format!("{}\n", line));
            }
        }
        self.entries = scan_entries(&self.lines);
    }

    /// Write back every map entry whose value differs from the file
    pub fn apply(&mut self, properties: &PropertyMap) {
        for (key, value) in properties {
            if self.get(key) != Some(value.as_str()) {
                self.set(key, value);
            }
        }
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }

    pub fn store(&self, path: &Path) -> Result<(), StampError> {
        fs::write(path, self.render()).map_err(|source| StampError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn line_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Odd number of trailing backslashes means the line continues
fn continues(content: &str) -> bool {
    content.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn scan_entries(lines: &[String]) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let first_line = index;
        let content = lines[index].trim_end_matches(&['\n', '\r'][..]).trim_start_matches(is_blank);
        index += 1;

        if content.is_empty() || content.starts_with('#') || content.starts_with('!') {
            continue;
        }

        let mut logical = content.to_string();
        while continues(&logical) && index < lines.len() {
            logical.pop();
            let next = lines[index].trim_end_matches(&['\n', '\r'][..]).trim_start_matches(is_blank);
            logical.push_str(next);
            index += 1;
        }

        let (key, value) = split_key_value(&logical);
        entries.push(Entry {
            first_line,
            last_line: index - 1,
            key,
            value,
        });
    }
    entries
}

/// Split a logical line at the first unescaped `=`, `:` or blank
fn split_key_value(logical: &str) -> (String, String) {
    let mut key_end = logical.len();
    let mut escaped = false;
    for (at, c) in logical.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = at;
            break;
        }
    }

    let mut rest = logical[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(&['=', ':'][..]) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (unescape(&logical[..key_end]), unescape(rest))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => out.push_str(&hex),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape_char(c: char, out: &mut String) -> bool {
    match c {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\x0c' => out.push_str("\\f"),
        _ => return false,
    }
    true
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if escape_char(c, &mut out) {
            continue;
        }
        if matches!(c, ' ' | '=' | ':' | '#' | '!') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut leading = true;
    for c in value.chars() {
        if escape_char(c, &mut out) {
            leading = false;
            continue;
        }
        if leading && c == ' ' {
            out.push('\\');
        } else {
            leading = false;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_publish_sets_and_overwrites() {
        let mut properties = PropertyMap::new();
        PropertyPublisher::publish(&mut properties, "vcs.commit.id", "abc").unwrap();
        assert_eq!(properties.get("vcs.commit.id").map(String::as_str), Some("abc"));

        PropertyPublisher::publish(&mut properties, "vcs.commit.id", "def").unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties["vcs.commit.id"], "def");
    }

    #[test]
    fn test_publish_empty_name_is_configuration_error() {
        let mut properties = PropertyMap::new();
        properties.insert("existing".to_string(), "1".to_string());

        let err = PropertyPublisher::publish(&mut properties, "", "abc").unwrap_err();
        assert!(matches!(err, StampError::Configuration(_)));
        assert_eq!(properties.len(), 1);

        assert!(PropertyPublisher::publish(&mut properties, "   ", "abc").is_err());
    }

    #[test]
    fn test_parse_all_separator_forms() {
        let file = PropertiesFile::parse(
            "# comment\n! also comment\n\nname = demo\nowner: alice\nteam ops\nurl=http://x/?a=b\nflag\n",
        );
        let map = file.to_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map["name"], "demo");
        assert_eq!(map["owner"], "alice");
        assert_eq!(map["team"], "ops");
        assert_eq!(map["url"], "http://x/?a=b");
        assert_eq!(map["flag"], "");
    }

    #[test]
    fn test_unrelated_lines_survive_update() {
        let original = "# keep this comment\nproject.name=demo\nproject.owner: alice\nproject.team ops\n";
        let mut file = PropertiesFile::parse(original);
        let mut properties = file.to_map();
        PropertyPublisher::publish(&mut properties, "vcs.commit.id", "abc").unwrap();

        file.apply(&properties);
        assert_eq!(file.render(), format!("{}vcs.commit.id=abc\n", original));
    }

    #[test]
    fn test_existing_entry_replaced_in_place() {
        let mut file = PropertiesFile::parse("a = 1\r\nvcs.commit.id : old\r\n# tail\r\n");
        file.set("vcs.commit.id", "new");
        assert_eq!(file.render(), "a = 1\r\nvcs.commit.id=new\r\n# tail\r\n");
    }

    #[test]
    fn test_continuation_entry_replaced_whole() {
        let mut file = PropertiesFile::parse("id = abc\\\n    def\nnext=1\n");
        assert_eq!(file.get("id"), Some("abcdef"));

        file.set("id", "xyz");
        assert_eq!(file.render(), "id=xyz\nnext=1\n");
    }

    #[test]
    fn test_append_to_file_without_trailing_newline() {
        let mut file = PropertiesFile::parse("a=1");
        file.set("b", "2");
        assert_eq!(file.render(), "a=1\nb=2\n");
    }

    #[test]
    fn test_last_duplicate_wins_and_is_replaced() {
        let mut file = PropertiesFile::parse("k=1\nk=2\n");
        assert_eq!(file.get("k"), Some("2"));
        file.set("k", "3");
        assert_eq!(file.render(), "k=1\nk=3\n");
        assert_eq!(file.to_map()["k"], "3");
    }

    #[test]
    fn test_special_keys_and_values_round_trip() {
        let mut properties = PropertyMap::new();
        properties.insert("a=b".to_string(), "abc".to_string());
        properties.insert("#hash".to_string(), "x".to_string());
        properties.insert("!bang: key".to_string(), "  padded".to_string());
        properties.insert("win".to_string(), "C:\\git\\bin".to_string());

        let mut file = PropertiesFile::default();
        file.apply(&properties);
        let reloaded = PropertiesFile::parse(&file.render());
        assert_eq!(reloaded.to_map(), properties);
        assert!(file.render().contains("a\\=b=abc\n"));
    }

    #[test]
    fn test_unicode_escape() {
        let file = PropertiesFile::parse("greeting=caf\\u00e9\n");
        assert_eq!(file.get("greeting"), Some("café"));
    }

    #[test]
    fn test_apply_without_changes_keeps_bytes() {
        let original = "#c\nvcs.commit.id   abc\n";
        let mut file = PropertiesFile::parse(original);
        let properties = file.to_map();
        file.apply(&properties);
        assert_eq!(file.render(), original);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = tempdir().unwrap();
        let file = PropertiesFile::load(&temp_dir.path().join("absent.properties")).unwrap();
        assert!(file.to_map().is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_store_then_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("build.properties");
        let mut file = PropertiesFile::parse("# header\nb: 2\n");
        file.set("a", "1");

        file.store(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# header\nb: 2\na=1\n");
        assert_eq!(PropertiesFile::load(&path).unwrap(), file);
    }
}
