//! Named font resources and the per-document cache of embedded fonts.

use crate::{document::Document, document::DocumentKey, font::Font, RenderError};
use id_arena::Id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Where a font's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
    /// An `http://` or `https://` URL
    Url(String),
}

impl FontSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, FontSource::Url(_))
    }

    /// Read the font's bytes from memory or disk. URLs are reported as
    /// [RenderError::RemoteFontsDisabled], since reading them means fetching them.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, RenderError> {
        match self {
            FontSource::Bytes(bytes) => Ok(bytes.clone()),
            FontSource::Path(path) => Ok(std::fs::read(path)?),
            FontSource::Url(url) => Err(RenderError::RemoteFontsDisabled(
                name.to_string(),
                url.clone(),
            )),
        }
    }

    /// Read the font's bytes, downloading them if the source is a URL
    #[cfg(feature = "remote-fonts")]
    pub async fn fetch(&self, client: &reqwest::Client, name: &str) -> Result<Vec<u8>, RenderError> {
        match self {
            FontSource::Url(url) => {
                log::debug!("fetching font `{name}` from {url}");
                let response = client.get(url).send().await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
            _ => self.read(name),
        }
    }
}

impl From<String> for FontSource {
    /// Strings starting with `http` are URLs, anything else is a file path
    fn from(source: String) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            FontSource::Url(source)
        } else {
            FontSource::Path(PathBuf::from(source))
        }
    }
}

struct FontSourceVisitor;

impl<'de> serde::de::Visitor<'de> for FontSourceVisitor {
    type Value = FontSource;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a font path, an http(s) URL or the font's bytes")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<FontSource, E> {
        Ok(FontSource::from(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<FontSource, E> {
        Ok(FontSource::from(v))
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<FontSource, E> {
        Ok(FontSource::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<FontSource, E> {
        Ok(FontSource::Bytes(v))
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<FontSource, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(FontSource::Bytes(bytes))
    }
}

impl<'de> Deserialize<'de> for FontSource {
    /// Strings are paths or URLs; byte strings and arrays of bytes are the font itself
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FontSourceVisitor)
    }
}

impl Serialize for FontSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FontSource::Bytes(bytes) => serializer.serialize_bytes(bytes),
            FontSource::Path(path) => serializer.serialize_str(&path.to_string_lossy()),
            FontSource::Url(url) => serializer.serialize_str(url),
        }
    }
}

fn default_subset() -> bool {
    true
}

/// How a template names a font, before the font is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub data: FontSource,
    #[serde(default)]
    pub fallback: bool,
    /// Requests a subset when embedding. Fonts are currently always embedded whole.
    #[serde(default = "default_subset")]
    pub subset: bool,
}

/// A loaded font and its flags
pub struct FontEntry {
    pub font: Font,
    pub fallback: bool,
    pub subset: bool,
}

/// Identifies one [FontSet], so fonts a document embedded from one set are never handed out
/// for another set drawing into the same document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontSetId(u64);

impl FontSetId {
    fn next() -> FontSetId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        FontSetId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The fonts a render may draw with, by name. Exactly one of them is the fallback font,
/// used whenever a schema names no font or a font that isn't in the set.
pub struct FontSet {
    id: FontSetId,
    entries: Vec<(String, FontEntry)>,
    fallback: usize,
}

impl FontSet {
    pub fn new<I, S>(entries: I) -> Result<FontSet, RenderError>
    where
        I: IntoIterator<Item = (S, FontEntry)>,
        S: Into<String>,
    {
        let entries: Vec<(String, FontEntry)> = entries
            .into_iter()
            .map(|(name, entry)| (name.into(), entry))
            .collect();
        if entries.is_empty() {
            return Err(RenderError::NoFonts);
        }

        let fallbacks: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, (_, entry))| entry.fallback)
            .map(|(i, _)| i)
            .collect();
        match fallbacks.as_slice() {
            [fallback] => Ok(FontSet {
                id: FontSetId::next(),
                fallback: *fallback,
                entries,
            }),
            _ => Err(RenderError::FallbackFont(fallbacks.len())),
        }
    }

    /// A set holding one font, which is also the fallback
    pub fn single<S: Into<String>>(name: S, font: Font) -> FontSet {
        FontSet {
            id: FontSetId::next(),
            entries: vec![(
                name.into(),
                FontEntry {
                    font,
                    fallback: true,
                    subset: true,
                },
            )],
            fallback: 0,
        }
    }

    /// Load every font from local sources
    pub fn load<I, S>(specs: I) -> Result<FontSet, RenderError>
    where
        I: IntoIterator<Item = (S, FontSpec)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        for (name, spec) in specs {
            let name = name.into();
            let font = Font::load(spec.data.read(&name)?)?;
            entries.push((
                name,
                FontEntry {
                    font,
                    fallback: spec.fallback,
                    subset: spec.subset,
                },
            ));
        }
        FontSet::new(entries)
    }

    /// Load every font, downloading the ones that point at URLs
    #[cfg(feature = "remote-fonts")]
    pub async fn fetch<I, S>(client: &reqwest::Client, specs: I) -> Result<FontSet, RenderError>
    where
        I: IntoIterator<Item = (S, FontSpec)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        for (name, spec) in specs {
            let name = name.into();
            let font = Font::load(spec.data.fetch(client, &name).await?)?;
            entries.push((
                name,
                FontEntry {
                    font,
                    fallback: spec.fallback,
                    subset: spec.subset,
                },
            ));
        }
        FontSet::new(entries)
    }

    pub fn id(&self) -> FontSetId {
        self.id
    }

    pub fn fallback_name(&self) -> &str {
        &self.entries[self.fallback].0
    }

    pub fn fallback(&self) -> &Font {
        &self.entries[self.fallback].1.font
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Look up a font by name, returning the name actually used alongside the font. No name
    /// selects the fallback font; an unknown name does too, with a warning.
    pub fn resolve(&self, name: Option<&str>) -> (&str, &Font) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            if let Some((found, entry)) = self.entries.iter().find(|(n, _)| n == name) {
                return (found, &entry.font);
            }
            log::warn!(
                "font `{name}` is not in the font set, falling back to `{}`",
                self.fallback_name()
            );
        }
        (self.fallback_name(), self.fallback())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FontEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fonts embedded into documents, so every schema on every page of a document draws with the
/// same embedded font objects. Entries are kept per document and per font set. The cache is
/// owned by the caller and handed to each render.
#[derive(Default)]
pub struct FontCache {
    embedded: HashMap<(DocumentKey, FontSetId), HashMap<String, Id<Font>>>,
    next_key: u64,
}

impl FontCache {
    pub fn new() -> FontCache {
        FontCache::default()
    }

    /// A key no document created through this cache has used yet
    pub fn next_document_key(&mut self) -> DocumentKey {
        let key = DocumentKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Start a new document whose fonts will be tracked by this cache
    pub fn new_document(&mut self) -> Document {
        Document::new(self.next_document_key())
    }

    /// The IDs of every font in `fonts` as embedded into `document`, embedding the whole set
    /// the first time the document sees it.
    pub fn embedded_fonts(
        &mut self,
        document: &mut Document,
        fonts: &FontSet,
    ) -> Result<&HashMap<String, Id<Font>>, RenderError> {
        let key = (document.key, fonts.id());
        if self.embedded.contains_key(&key) {
            log::trace!(
                "font cache hit for document {:?}, font set {:?}",
                document.key,
                fonts.id()
            );
        } else {
            let mut ids = HashMap::with_capacity(fonts.len());
            for (name, entry) in fonts.iter() {
                let id = document.add_font(entry.font.reload()?);
                log::debug!(
                    "embedded font `{name}` from font set {:?} into document {:?} as F{}",
                    fonts.id(),
                    document.key,
                    id.index()
                );
                ids.insert(name.to_string(), id);
            }
            self.embedded.insert(key, ids);
        }

        Ok(self.embedded.entry(key).or_default())
    }

    /// The embedded font for `name` (or the fallback font) in `document`
    pub fn font_id(
        &mut self,
        document: &mut Document,
        fonts: &FontSet,
        name: Option<&str>,
    ) -> Result<Id<Font>, RenderError> {
        let (resolved, _) = fonts.resolve(name);
        self.embedded_fonts(document, fonts)?
            .get(resolved)
            .copied()
            .ok_or_else(|| RenderError::FontNotEmbedded(resolved.to_string()))
    }

    /// Drop everything cached for a document, e.g. once it has been written
    pub fn forget(&mut self, key: DocumentKey) {
        self.embedded.retain(|(document, _), _| *document != key);
    }

    pub fn is_cached(&self, key: DocumentKey) -> bool {
        self.embedded.keys().any(|(document, _)| *document == key)
    }
}
