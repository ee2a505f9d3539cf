//! `lopdf` backed document source and sink

use crate::document::{DocumentSink, DocumentSource};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Page attributes that a page may inherit from its ancestors in the page tree
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files
const MAX_TREE_DEPTH: usize = 64;

// =============================================================================
// Loading and Saving
// =============================================================================

/// Load a PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    if !tokio::fs::try_exists(&path).await? {
        return Err(BookletError::InputNotFound(path));
    }

    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    log::debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

/// Save a document, creating missing parent directories
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, BookletError>(writer)
    })
    .await??;

    tokio::task::spawn_blocking(move || write_output(&path, &bytes)).await?
}

/// Write `bytes` to a sibling temporary file, then move it into place.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let output_error = |source| BookletError::Output {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_error)?;
    }

    let partial = partial_path(path);
    let written = std::fs::write(&partial, bytes)
        .and_then(|()| std::fs::rename(&partial, path));
    if let Err(err) = written {
        let _ = std::fs::remove_file(&partial);
        return Err(output_error(err));
    }

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

// =============================================================================
// Source
// =============================================================================

/// A loaded PDF, addressed by zero-based page index
pub struct PdfSource {
    document: Document,
    page_ids: Vec<ObjectId>,
    page_set: HashSet<ObjectId>,
}

impl PdfSource {
    pub fn new(document: Document) -> Self {
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        let page_set = page_ids.iter().copied().collect();
        Self {
            document,
            page_ids,
            page_set,
        }
    }

    /// Whether `id` is a page reachable from the document's page tree
    pub fn contains_page(&self, id: ObjectId) -> bool {
        self.page_set.contains(&id)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(BookletError::PageOutOfRange {
                index,
                count: self.page_ids.len(),
            })
    }
}

impl DocumentSource for PdfSource {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_size(&self, index: usize) -> Result<PageSize> {
        let page_id = self.page_id(index)?;
        Ok(media_box_size(&self.document, page_id).unwrap_or_default())
    }
}

/// Resolve one level of indirection
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        _ => Some(obj),
    }
}

/// Look up `key` on a page, walking up the page tree if it is inherited
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(key) {
            return resolve(doc, value);
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

fn media_box_size(doc: &Document, page_id: ObjectId) -> Option<PageSize> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")?
        .as_array()
        .ok()?;
    if media_box.len() != 4 {
        return None;
    }

    let mut coords = [0.0f32; 4];
    for (coord, obj) in coords.iter_mut().zip(media_box) {
        *coord = extract_number(resolve(doc, obj)?)?;
    }
    let [x0, y0, x1, y1] = coords;
    Some(PageSize::new((x1 - x0).abs(), (y1 - y0).abs()))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn has_type(obj: &Object, type_name: &[u8]) -> bool {
    match obj {
        Object::Dictionary(dict) => {
            matches!(dict.get(b"Type"), Ok(Object::Name(name)) if name.as_slice() == type_name)
        }
        _ => false,
    }
}

// =============================================================================
// Sink
// =============================================================================

/// Builds a new PDF from pages of a single [`PdfSource`].
pub struct PdfSink {
    output: Document,
    pages_id: ObjectId,
    page_refs: Vec<Object>,
    /// Source object id -> output object id
    copied: HashMap<ObjectId, ObjectId>,
    /// Source pages whose copy has already been written
    placed: HashSet<ObjectId>,
}

impl Default for PdfSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSink {
    pub fn new() -> Self {
        let mut output = Document::with_version("1.7");
        let pages_id = output.new_object_id();
        Self {
            output,
            pages_id,
            page_refs: Vec::new(),
            copied: HashMap::new(),
            placed: HashSet::new(),
        }
    }

    /// Number of pages appended so far
    pub fn len(&self) -> usize {
        self.page_refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_refs.is_empty()
    }

    /// Close the page tree and return the finished document
    pub fn into_document(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        self.output
    }

    /// Output id for a source page. References to a page seen before the page
    /// itself is appended share the id; a page appended twice gets a fresh one.
    fn page_slot(&mut self, source_id: ObjectId) -> ObjectId {
        if !self.placed.insert(source_id) {
            return self.output.new_object_id();
        }
        match self.copied.get(&source_id) {
            Some(&id) => id,
            None => {
                let id = self.output.new_object_id();
                self.copied.insert(source_id, id);
                id
            }
        }
    }

    /// Deep copy `obj` into the output document, following references.
    ///
    /// Each source object is copied once. Ids are recorded before recursing,
    /// so reference cycles terminate. Pages are not copied through references;
    /// they get a reserved id that [`DocumentSink::append_page`] fills in.
    /// Page objects outside the source page tree become `null`.
    fn copy_object(&mut self, source: &PdfSource, obj: &Object) -> Result<Object> {
        match obj {
            Object::Reference(id) => {
                if let Some(&new_id) = self.copied.get(id) {
                    return Ok(Object::Reference(new_id));
                }

                let Ok(referenced) = source.document().get_object(*id) else {
                    log::debug!("Dropping dangling reference {} {} R", id.0, id.1);
                    return Ok(Object::Null);
                };
                if has_type(referenced, b"Pages") {
                    return Ok(Object::Reference(self.pages_id));
                }

                let is_page = has_type(referenced, b"Page");
                if is_page && !source.contains_page(*id) {
                    log::debug!("Dropping reference to detached page {} {} R", id.0, id.1);
                    return Ok(Object::Null);
                }

                let new_id = self.output.new_object_id();
                self.copied.insert(*id, new_id);
                if is_page {
                    return Ok(Object::Reference(new_id));
                }

                let copied = self.copy_object(source, referenced)?;
                self.output.objects.insert(new_id, copied);
                Ok(Object::Reference(new_id))
            }
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.copy_dictionary(source, dict)?)),
            Object::Array(arr) => {
                let new_arr: Result<Vec<_>> = arr
                    .iter()
                    .map(|item| self.copy_object(source, item))
                    .collect();
                Ok(Object::Array(new_arr?))
            }
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(source, &stream.dict)?;
                let mut copied = Stream::new(dict, stream.content.clone());
                copied.allows_compression = stream.allows_compression;
                Ok(Object::Stream(copied))
            }
            // Primitive types: just clone
            _ => Ok(obj.clone()),
        }
    }

    fn copy_dictionary(&mut self, source: &PdfSource, dict: &Dictionary) -> Result<Dictionary> {
        let mut new_dict = Dictionary::new();
        for (key, value) in dict.iter() {
            new_dict.set(key.clone(), self.copy_object(source, value)?);
        }
        Ok(new_dict)
    }
}

impl DocumentSink<PdfSource> for PdfSink {
    fn append_page(&mut self, source: &PdfSource, index: usize) -> Result<()> {
        let source_id = source.page_id(index)?;
        let doc = source.document();
        let page = doc.get_dictionary(source_id)?;
        let page_id = self.page_slot(source_id);

        let mut page_dict = Dictionary::new();
        for (key, value) in page.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            page_dict.set(key.clone(), self.copy_object(source, value)?);
        }

        // Pull inherited attributes down so the copy does not depend on the
        // source page tree
        for key in INHERITABLE_ATTRIBUTES {
            if page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(doc, source_id, key) {
                page_dict.set(key, self.copy_object(source, value)?);
            }
        }

        page_dict.set("Parent", Object::Reference(self.pages_id));
        self.output
            .objects
            .insert(page_id, Object::Dictionary(page_dict));
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }

    fn append_blank(&mut self, size: PageSize) -> Result<()> {
        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), Vec::new()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(size.width),
                Object::Real(size.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(Dictionary::new()));

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }

    fn finish(self, path: &Path) -> Result<()> {
        let mut document = self.into_document();
        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        write_output(path, &bytes)
    }
}
