use crate::constants::markers;
use crate::documentation::source::DocumentationSource;
use crate::error::Result;
use regex::Regex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Body and declared parameters of a documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub text: String,
    pub parameters: Vec<String>,
}

/// Raw documentation text of a quantity, once it has been looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedSource {
    Loaded(String),
    /// The quantity has no documentation; it is not looked up again.
    Absent,
}

impl CachedSource {
    fn from_loaded(text: Option<String>) -> Self {
        text.map_or(CachedSource::Absent, CachedSource::Loaded)
    }

    fn text(&self) -> Option<&str> {
        match self {
            CachedSource::Loaded(text) => Some(text),
            CachedSource::Absent => None,
        }
    }
}

/// Finds documentation blocks for a quantity, falling back to the generic source.
pub struct DocumentationResolver<S: DocumentationSource> {
    source: S,
    cache: HashMap<String, CachedSource>,
    generic: CachedSource,
    /// Block pattern of every tag looked up so far.
    patterns: HashMap<String, Regex>,
}

impl<S: DocumentationSource> DocumentationResolver<S> {
    /// Creates a resolver and preloads the generic documentation.
    pub fn new(source: S) -> Result<Self> {
        let generic = CachedSource::from_loaded(source.load_generic()?);
        if generic == CachedSource::Absent {
            log::warn!("No generic documentation found; tags missing from a quantity stay unresolved");
        }
        Ok(Self { source, cache: HashMap::new(), generic, patterns: HashMap::new() })
    }

    /// Resolves `tag` for `quantity`.
    ///
    /// The quantity's own documentation is read on first use and memoised, including its absence.
    ///
    /// # Returns
    /// * `Ok(Some(ResolvedTag))` - The first block with that tag, from the quantity or the generic source
    /// * `Ok(None)` - If neither source defines the tag
    pub fn resolve_tag(&mut self, quantity: &str, tag: &str) -> Result<Option<ResolvedTag>> {
        if !self.cache.contains_key(quantity) {
            let loaded = CachedSource::from_loaded(self.source.load(quantity)?);
            if loaded == CachedSource::Absent {
                log::debug!("'{quantity}' has no documentation of its own, using generic documentation");
            }
            self.cache.insert(quantity.to_string(), loaded);
        }

        let pattern: &Regex = match self.patterns.entry(tag.to_string()) {
            Entry::Occupied(entry) => &*entry.into_mut(),
            Entry::Vacant(entry) => &*entry.insert(block_pattern(tag)?),
        };

        let own = self.cache.get(quantity).and_then(CachedSource::text);
        if let Some(text) = own {
            if let Some(resolved) = extract_with(pattern, text) {
                return Ok(Some(resolved));
            }
            log::trace!("'{quantity}' does not define '{tag}', trying generic documentation");
        }

        Ok(self.generic.text().and_then(|text| extract_with(pattern, text)))
    }

    /// Cached state of a quantity's documentation, `None` when not looked up yet.
    pub fn cached(&self, quantity: &str) -> Option<&CachedSource> {
        self.cache.get(quantity)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Extracts the first `#Document:tag#...#/Document:tag#` block of `text`.
///
/// An opening marker starts a line and declares bare parameter names, which tells it apart
/// from a call such as `#Document:tag(unit=Metre)#` inside another block.
pub fn extract_block(text: &str, tag: &str) -> Result<Option<ResolvedTag>> {
    Ok(extract_with(&block_pattern(tag)?, text))
}

fn block_pattern(tag: &str) -> Result<Regex> {
    let tag = regex::escape(tag);
    let pattern = Regex::new(&format!(
        r"(?ms)^[ \t]*{open}{tag}(?:\(([^)=]*)\))?#(.*?){close}{tag}#",
        open = regex::escape(markers::DOCUMENT),
        close = regex::escape(markers::DOCUMENT_END),
    ))?;
    Ok(pattern)
}

fn extract_with(pattern: &Regex, text: &str) -> Option<ResolvedTag> {
    pattern.captures(text).map(|captures| {
        let parameters = captures
            .get(1)
            .map(|list| {
                list.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|parameter| !parameter.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let body = captures.get(2).map_or("", |body| body.as_str());
        ResolvedTag { text: body.trim_matches(['\r', '\n']).to_string(), parameters }
    })
}
