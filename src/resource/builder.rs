//! Assembles `VS_VERSIONINFO` blocks in memory for tests.

use std::iter;

use crate::Locale;

enum Value {
    None,
    Binary(Vec<u8>),
    Text(String),
}

struct Node {
    key: String,
    value: Value,
    children: Vec<Node>,
}

impl Node {
    fn new(key: &str, value: Value, children: Vec<Self>) -> Self {
        Self {
            key: key.to_owned(),
            value,
            children,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        let start = out.len();
        out.extend_from_slice(&[0; 6]);
        out.extend(utf16z(&self.key));
        pad(out);

        let (value_length, r#type) = match &self.value {
            Value::None => (0, 1),
            Value::Binary(bytes) => {
                out.extend_from_slice(bytes);
                (bytes.len(), 0)
            }
            Value::Text(text) => {
                let bytes = utf16z(text).collect::<Vec<_>>();
                out.extend_from_slice(&bytes);
                (bytes.len() / size_of::<u16>(), 1)
            }
        };

        for child in &self.children {
            pad(out);
            child.write(out);
        }

        let length = u16::try_from(out.len() - start).unwrap();
        let value_length = u16::try_from(value_length).unwrap();
        out[start..start + 2].copy_from_slice(&length.to_le_bytes());
        out[start + 2..start + 4].copy_from_slice(&value_length.to_le_bytes());
        out[start + 4..start + 6].copy_from_slice(&u16::to_le_bytes(r#type));
    }
}

fn utf16z(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.encode_utf16()
        .chain(iter::once(0))
        .flat_map(u16::to_le_bytes)
}

fn pad(out: &mut Vec<u8>) {
    out.resize(out.len().next_multiple_of(4), 0);
}

#[derive(Default)]
pub struct VersionBlock {
    fixed: Option<Vec<u8>>,
    string_tables: Vec<Node>,
    translation: Option<Vec<u8>>,
}

impl VersionBlock {
    /// Signature, struct version, file version 1.2.3.4, product version 5.6.7.8, flags mask,
    /// flags, OS, type, subtype and the two date words.
    pub const FIXED: [u32; 13] = [
        0xFEEF_04BD,
        0x0001_0000,
        0x0001_0002,
        0x0003_0004,
        0x0005_0006,
        0x0007_0008,
        0x0000_003F,
        0x0000_0003,
        0x0004_0004,
        0x0000_0001,
        0x0000_0000,
        0x01D7_0000,
        0x1234_5678,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixed(self, words: [u32; 13]) -> Self {
        self.fixed_bytes(words.into_iter().flat_map(u32::to_le_bytes).collect())
    }

    pub fn fixed_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.fixed = Some(bytes);
        self
    }

    pub fn string_table(mut self, key: &str, strings: &[(&str, &str)]) -> Self {
        let strings = strings
            .iter()
            .map(|&(name, value)| Node::new(name, Value::Text(value.to_owned()), Vec::new()))
            .collect();
        self.string_tables
            .push(Node::new(key, Value::None, strings));
        self
    }

    pub fn translations(self, locales: &[Locale]) -> Self {
        self.translation_bytes(
            locales
                .iter()
                .flat_map(|locale| {
                    [locale.lang_id, locale.charset_id]
                        .into_iter()
                        .flat_map(u16::to_le_bytes)
                })
                .collect(),
        )
    }

    pub fn translation_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.translation = Some(bytes);
        self
    }

    /// A root with no value, no children and no padding after its key.
    pub fn bare_root() -> Vec<u8> {
        let length = 6 + utf16z("VS_VERSION_INFO").count();

        [length as u16, 0, 0]
            .into_iter()
            .flat_map(u16::to_le_bytes)
            .chain(utf16z("VS_VERSION_INFO"))
            .collect()
    }

    pub fn build(self) -> Vec<u8> {
        let mut children = Vec::new();
        if !self.string_tables.is_empty() {
            children.push(Node::new(
                "StringFileInfo",
                Value::None,
                self.string_tables,
            ));
        }
        if let Some(translation) = self.translation {
            children.push(Node::new(
                "VarFileInfo",
                Value::None,
                vec![Node::new("Translation", Value::Binary(translation), Vec::new())],
            ));
        }

        // The root value is binary even when there is no fixed info
        let value = Value::Binary(self.fixed.unwrap_or_default());
        let root = Node::new("VS_VERSION_INFO", value, children);

        let mut out = Vec::new();
        root.write(&mut out);
        out
    }
}
