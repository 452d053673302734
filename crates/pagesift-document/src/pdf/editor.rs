// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF editor — rebuild documents from an existing PDF using the `lopdf`
// crate: copy a selection of pages into a new document, delete pages by
// range text, reverse page order, strip annotations, strip metadata.
//
// The source document is never modified; every operation returns the bytes
// of a new document.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pagesift_core::error::{PageSiftError, Result};
use pagesift_core::parse_page_ranges;
use tracing::{debug, info, instrument, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed, cyclic page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Which pages an edit applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScope {
    All,
    /// Page-range text such as `"1, 3-5"`.
    Ranges(String),
}

impl PageScope {
    /// Zero-based indices covered by this scope.
    pub fn resolve(&self, total_pages: usize) -> Result<BTreeSet<usize>> {
        let indices = match self {
            Self::All => (0..total_pages).collect(),
            Self::Ranges(text) => parse_page_ranges(text, total_pages),
        };
        if indices.is_empty() {
            return Err(PageSiftError::NoPagesSelected);
        }
        Ok(indices)
    }
}

/// Reads an existing PDF and produces edited copies of it.
#[derive(Debug)]
pub struct PdfEditor {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfEditor {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            PageSiftError::Load(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create an editor from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            PageSiftError::Load(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the editor was created via [`PdfEditor::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Page selection -------------------------------------------------------

    /// Build a new document containing the pages at the given zero-based
    /// indices, in the order given.
    #[instrument(skip(self, indices), fields(selected = indices.len()))]
    pub fn copy_pages(&self, indices: &[usize]) -> Result<Vec<u8>> {
        if indices.is_empty() {
            return Err(PageSiftError::ExportFailure(
                "refusing to write a document without pages".into(),
            ));
        }

        let pages = self.document.get_pages();
        let mut page_ids = Vec::with_capacity(indices.len());
        let mut seen = BTreeSet::new();
        for &index in indices {
            if !seen.insert(index) {
                return Err(PageSiftError::ExportFailure(format!(
                    "page index {} selected twice",
                    index
                )));
            }
            let page_id = *pages.get(&(index as u32 + 1)).ok_or_else(|| {
                PageSiftError::ExportFailure(format!(
                    "page index {} out of range (document has {} pages)",
                    index,
                    pages.len()
                ))
            })?;
            page_ids.push(page_id);
        }

        let mut copier = PageCopier::new(&self.document, &page_ids);
        for &page_id in &page_ids {
            copier.copy_page(page_id)?;
        }
        let output = copier.finish()?;

        info!(
            source_pages = pages.len(),
            kept_pages = page_ids.len(),
            output_bytes = output.len(),
            "Pages copied into new document"
        );
        Ok(output)
    }

    /// Delete the pages named by `selection` (page-range text) and return the
    /// remaining pages as a new document.
    #[instrument(skip(self))]
    pub fn delete_pages(&self, selection: &str) -> Result<Vec<u8>> {
        let total = self.page_count();
        let to_delete = parse_page_ranges(selection, total);

        if to_delete.is_empty() {
            return Err(PageSiftError::NoPagesSelected);
        }
        if to_delete.len() >= total {
            return Err(PageSiftError::CannotDeleteAllPages);
        }

        let keep: Vec<usize> = (0..total).filter(|index| !to_delete.contains(index)).collect();
        info!(deleted = to_delete.len(), kept = keep.len(), "Deleting pages");
        self.copy_pages(&keep)
    }

    /// Return a new document with the page order reversed.
    #[instrument(skip(self))]
    pub fn reverse_pages(&self) -> Result<Vec<u8>> {
        let reversed: Vec<usize> = (0..self.page_count()).rev().collect();
        self.copy_pages(&reversed)
    }

    // -- Cleanup --------------------------------------------------------------

    /// Remove annotations whose `/Subtype` is in `subtypes` from every page
    /// in `scope`. Annotations without a subtype are kept.
    #[instrument(skip(self, subtypes), fields(types = subtypes.len()))]
    pub fn remove_annotations(
        &self,
        scope: &PageScope,
        subtypes: &BTreeSet<String>,
    ) -> Result<Vec<u8>> {
        let targets = scope.resolve(self.page_count())?;
        if subtypes.is_empty() {
            return Err(PageSiftError::NoAnnotationTypesSelected);
        }

        let mut doc = self.document.clone();
        let pages = doc.get_pages();
        let mut removed = 0usize;

        for index in targets {
            let page_id = *pages.get(&(index as u32 + 1)).ok_or_else(|| {
                PageSiftError::ExportFailure(format!("page {} not found in page tree", index + 1))
            })?;

            let annotations = annotation_entries(&doc, page_id);
            if annotations.is_empty() {
                continue;
            }
            let before = annotations.len();
            let kept: Vec<Object> = annotations
                .into_iter()
                .filter(|entry| {
                    annotation_subtype(&doc, entry).is_none_or(|subtype| !subtypes.contains(&subtype))
                })
                .collect();
            removed += before - kept.len();

            let page = doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|err| {
                    PageSiftError::ExportFailure(format!("cannot edit page {}: {}", index + 1, err))
                })?;
            if kept.is_empty() {
                page.remove(b"Annots");
            } else {
                page.set("Annots", Object::Array(kept));
            }
        }

        info!(removed, "Annotations removed");
        save_document(&mut doc)
    }

    /// Remove the document information dictionary and the catalog's XMP
    /// metadata stream.
    #[instrument(skip(self))]
    pub fn remove_metadata(&self) -> Result<Vec<u8>> {
        let mut doc = self.document.clone();

        if let Ok(info_id) = doc.trailer.get(b"Info").and_then(Object::as_reference) {
            doc.objects.remove(&info_id);
        }
        let had_info = doc.trailer.remove(b"Info").is_some();

        let mut had_xmp = false;
        if let Ok(root_id) = doc.trailer.get(b"Root").and_then(Object::as_reference) {
            let metadata_id = doc
                .get_dictionary(root_id)
                .ok()
                .and_then(|catalog| catalog.get(b"Metadata").ok())
                .and_then(|metadata| metadata.as_reference().ok());
            if let Ok(catalog) = doc.get_object_mut(root_id).and_then(Object::as_dict_mut) {
                had_xmp = catalog.remove(b"Metadata").is_some();
            }
            if let Some(id) = metadata_id {
                doc.objects.remove(&id);
            }
        }

        info!(had_info, had_xmp, "Metadata removed");
        save_document(&mut doc)
    }
}

// -- Page copying -------------------------------------------------------------

/// Copies pages from `source` into a brand-new document.
///
/// Each source object is copied at most once; shared resources stay shared
/// and reference cycles (e.g. an annotation's `/P` back to its page)
/// terminate. References into the page tree that do not lead to a copied
/// page are dropped so unrelated pages are never pulled in.
struct PageCopier<'a> {
    source: &'a Document,
    target: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    /// Source object id -> target object id.
    copied: BTreeMap<ObjectId, ObjectId>,
}

impl<'a> PageCopier<'a> {
    /// Reserve target ids for every page up front, so links between copied
    /// pages resolve no matter which is copied first.
    fn new(source: &'a Document, page_ids: &[ObjectId]) -> Self {
        let mut target = Document::with_version(source.version.clone());
        let pages_id = target.new_object_id();
        let copied = page_ids
            .iter()
            .map(|&page_id| (page_id, target.new_object_id()))
            .collect();

        Self {
            source,
            target,
            pages_id,
            kids: Vec::with_capacity(page_ids.len()),
            copied,
        }
    }

    /// Append a copy of the source page as the last page of the target.
    fn copy_page(&mut self, page_id: ObjectId) -> Result<()> {
        let source = self.source;
        let page = source.get_dictionary(page_id).map_err(|err| {
            PageSiftError::ExportFailure(format!("cannot read page object {:?}: {}", page_id, err))
        })?;
        let new_id = *self.copied.get(&page_id).ok_or_else(|| {
            PageSiftError::ExportFailure(format!("page object {:?} was not planned", page_id))
        })?;

        let mut new_page = Dictionary::new();
        for (key, value) in page.iter() {
            // The parent is the target's own page tree.
            if key == b"Parent" {
                continue;
            }
            let cloned = self.clone_object(value);
            new_page.set(key.clone(), cloned);
        }

        // Detached from its old ancestors, the page must carry what it used
        // to inherit.
        for key in INHERITABLE_KEYS {
            if new_page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, page, key) {
                let cloned = self.clone_object(value);
                new_page.set(key.to_vec(), cloned);
            }
        }
        new_page.set("Parent", Object::Reference(self.pages_id));

        self.target.objects.insert(new_id, Object::Dictionary(new_page));
        self.kids.push(Object::Reference(new_id));
        Ok(())
    }

    fn clone_object(&mut self, object: &'a Object) -> Object {
        match object {
            Object::Reference(id) => self.clone_reference(*id),
            Object::Dictionary(dict) => Object::Dictionary(self.clone_dictionary(dict)),
            Object::Array(items) => {
                Object::Array(items.iter().map(|item| self.clone_object(item)).collect())
            }
            Object::Stream(stream) => Object::Stream(Stream::new(
                self.clone_dictionary(&stream.dict),
                stream.content.clone(),
            )),
            // Booleans, numbers, strings, names and null copy as-is.
            other => other.clone(),
        }
    }

    fn clone_dictionary(&mut self, dict: &'a Dictionary) -> Dictionary {
        let mut cloned = Dictionary::new();
        for (key, value) in dict.iter() {
            let value = self.clone_object(value);
            cloned.set(key.clone(), value);
        }
        cloned
    }

    fn clone_reference(&mut self, id: ObjectId) -> Object {
        if let Some(&new_id) = self.copied.get(&id) {
            return Object::Reference(new_id);
        }

        let source = self.source;
        let referenced = match source.get_object(id) {
            Ok(object) => object,
            Err(err) => {
                warn!(?id, %err, "Cannot resolve reference, using Null");
                return Object::Null;
            }
        };
        if is_page_tree_node(referenced) {
            debug!(?id, "Dropping reference to a page that is not copied");
            return Object::Null;
        }

        let new_id = self.target.new_object_id();
        self.copied.insert(id, new_id);
        let cloned = self.clone_object(referenced);
        self.target.objects.insert(new_id, cloned);
        Object::Reference(new_id)
    }

    /// Install the page tree and catalog and serialise the document.
    fn finish(mut self) -> Result<Vec<u8>> {
        let count = self.kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => count,
        };
        self.target
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.target.trailer.set("Root", catalog_id);

        save_document(&mut self.target)
    }
}

/// Look up `key` on the page or, failing that, on its nearest ancestor.
fn inherited_attribute<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

fn is_page_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type"),
            Ok(Object::Name(name)) if name == b"Page" || name == b"Pages"
        ),
        _ => false,
    }
}

// -- Annotation helpers -------------------------------------------------------

/// The entries of a page's `/Annots` array, whether inline or indirect.
fn annotation_entries(doc: &Document, page_id: ObjectId) -> Vec<Object> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };
    match page.get(b"Annots") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// The `/Subtype` name of an annotation entry, if it has one.
fn annotation_subtype(doc: &Document, entry: &Object) -> Option<String> {
    let dict = match entry {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    match dict.get(b"Subtype") {
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn save_document(doc: &mut Document) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    doc.save_to(&mut output).map_err(|err| {
        PageSiftError::ExportFailure(format!("failed to serialise PDF: {}", err))
    })?;
    Ok(output)
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an N-page PDF whose page `n` draws the text "Page n".
    ///
    /// Resources and MediaBox live on the page tree root, so pages only have
    /// them by inheritance. Page 1 carries a Link (pointing back at the page),
    /// a Highlight, and an annotation without a subtype. The document has an
    /// Info dictionary and an XMP metadata stream.
    fn sample_pdf(page_count: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for number in 1..=page_count {
            let content = format!("BT /F1 24 Tf 72 720 Td (Page {number}) Tj ET");
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });

            if number == 1 {
                let link_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
                    "P" => page_id,
                });
                let highlight_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Highlight",
                    "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
                });
                let untyped_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
                });
                if let Ok(page) = doc.get_object_mut(page_id).and_then(Object::as_dict_mut) {
                    page.set(
                        "Annots",
                        vec![link_id.into(), highlight_id.into(), untyped_id.into()],
                    );
                }
            }
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let xmp_id = doc.add_object(Stream::new(
            dictionary! { "Type" => "Metadata", "Subtype" => "XML" },
            b"<x:xmpmeta>Secret Author</x:xmpmeta>".to_vec(),
        ));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "Metadata" => xmp_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal("Secret Title"),
            "Author" => Object::string_literal("Secret Author"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    /// The "Page n" label drawn on every page of `bytes`, in page order.
    fn page_labels(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = doc.get_page_content(page_id).unwrap();
                let text = String::from_utf8_lossy(&content).into_owned();
                let start = text.find('(').unwrap() + 1;
                let end = text.find(')').unwrap();
                text[start..end].to_string()
            })
            .collect()
    }

    fn annotation_subtypes(bytes: &[u8], page_number: u32) -> Vec<Option<String>> {
        let doc = Document::load_mem(bytes).unwrap();
        let page_id = doc.get_pages()[&page_number];
        annotation_entries(&doc, page_id)
            .iter()
            .map(|entry| annotation_subtype(&doc, entry))
            .collect()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn type_set(types: &[&str]) -> BTreeSet<String> {
        types.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn copy_pages_keeps_only_selected_pages_in_order() {
        let editor = PdfEditor::from_bytes(&sample_pdf(5)).unwrap();
        let output = editor.copy_pages(&[0, 2, 4]).unwrap();
        assert_eq!(page_labels(&output), vec!["Page 1", "Page 3", "Page 5"]);
    }

    #[test]
    fn copied_pages_carry_inherited_attributes() {
        let editor = PdfEditor::from_bytes(&sample_pdf(2)).unwrap();
        let output = editor.copy_pages(&[1]).unwrap();

        let doc = Document::load_mem(&output).unwrap();
        let page_id = doc.get_pages()[&1];
        let page = doc.get_dictionary(page_id).unwrap();
        assert!(page.has(b"MediaBox"));
        assert!(page.has(b"Resources"));
    }

    #[test]
    fn annotation_back_reference_points_at_the_copy() {
        let editor = PdfEditor::from_bytes(&sample_pdf(3)).unwrap();
        let output = editor.copy_pages(&[0]).unwrap();

        let doc = Document::load_mem(&output).unwrap();
        let page_id = doc.get_pages()[&1];
        let link = annotation_entries(&doc, page_id)
            .into_iter()
            .find(|entry| annotation_subtype(&doc, entry).as_deref() == Some("Link"))
            .unwrap();
        let link = doc.get_dictionary(link.as_reference().unwrap()).unwrap();
        assert_eq!(link.get(b"P").unwrap().as_reference().unwrap(), page_id);
    }

    #[test]
    fn copy_pages_does_not_modify_the_source() {
        let source = sample_pdf(3);
        let editor = PdfEditor::from_bytes(&source).unwrap();
        editor.copy_pages(&[1]).unwrap();
        assert_eq!(editor.page_count(), 3);
    }

    #[test]
    fn copy_pages_rejects_bad_selections() {
        let editor = PdfEditor::from_bytes(&sample_pdf(3)).unwrap();
        assert!(matches!(
            editor.copy_pages(&[]),
            Err(PageSiftError::ExportFailure(_))
        ));
        assert!(matches!(
            editor.copy_pages(&[3]),
            Err(PageSiftError::ExportFailure(_))
        ));
        assert!(matches!(
            editor.copy_pages(&[1, 1]),
            Err(PageSiftError::ExportFailure(_))
        ));
    }

    #[test]
    fn reverse_pages_reverses_order() {
        let editor = PdfEditor::from_bytes(&sample_pdf(4)).unwrap();
        let output = editor.reverse_pages().unwrap();
        assert_eq!(
            page_labels(&output),
            vec!["Page 4", "Page 3", "Page 2", "Page 1"]
        );
    }

    #[test]
    fn delete_pages_keeps_the_complement() {
        let editor = PdfEditor::from_bytes(&sample_pdf(6)).unwrap();
        let output = editor.delete_pages("2, 4-5, abc, 9").unwrap();
        assert_eq!(page_labels(&output), vec!["Page 1", "Page 3", "Page 6"]);
    }

    #[test]
    fn delete_pages_guards() {
        let editor = PdfEditor::from_bytes(&sample_pdf(3)).unwrap();
        assert!(matches!(
            editor.delete_pages("7, x"),
            Err(PageSiftError::NoPagesSelected)
        ));
        assert!(matches!(
            editor.delete_pages("1-3"),
            Err(PageSiftError::CannotDeleteAllPages)
        ));
    }

    #[test]
    fn remove_annotations_by_subtype() {
        let editor = PdfEditor::from_bytes(&sample_pdf(2)).unwrap();
        let output = editor
            .remove_annotations(&PageScope::All, &type_set(&["Link"]))
            .unwrap();
        assert_eq!(
            annotation_subtypes(&output, 1),
            vec![Some("Highlight".to_string()), None]
        );
    }

    #[test]
    fn remove_annotations_keeps_untyped_and_drops_empty_array() {
        let editor = PdfEditor::from_bytes(&sample_pdf(1)).unwrap();
        let output = editor
            .remove_annotations(&PageScope::All, &type_set(&["Link", "Highlight"]))
            .unwrap();
        assert_eq!(annotation_subtypes(&output, 1), vec![None]);

        // With the untyped annotation stripped by hand, removing both typed
        // ones leaves no /Annots entry at all.
        let mut doc = Document::load_mem(&sample_pdf(1)).unwrap();
        let page_id = doc.get_pages()[&1];
        let entries = annotation_entries(&doc, page_id);
        let typed: Vec<Object> = entries
            .into_iter()
            .filter(|entry| annotation_subtype(&doc, entry).is_some())
            .collect();
        doc.get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("Annots", typed);
        let bytes = save_document(&mut doc).unwrap();

        let output = PdfEditor::from_bytes(&bytes)
            .unwrap()
            .remove_annotations(&PageScope::All, &type_set(&["Link", "Highlight"]))
            .unwrap();
        let doc = Document::load_mem(&output).unwrap();
        let page = doc.get_dictionary(doc.get_pages()[&1]).unwrap();
        assert!(!page.has(b"Annots"));
    }

    #[test]
    fn remove_annotations_respects_scope() {
        let editor = PdfEditor::from_bytes(&sample_pdf(3)).unwrap();
        let output = editor
            .remove_annotations(&PageScope::Ranges("2-3".into()), &type_set(&["Link"]))
            .unwrap();
        // Page 1 is out of scope, so its Link survives.
        assert_eq!(annotation_subtypes(&output, 1).len(), 3);
    }

    #[test]
    fn remove_annotations_guards() {
        let editor = PdfEditor::from_bytes(&sample_pdf(2)).unwrap();
        assert!(matches!(
            editor.remove_annotations(&PageScope::Ranges("5-9".into()), &type_set(&["Link"])),
            Err(PageSiftError::NoPagesSelected)
        ));
        assert!(matches!(
            editor.remove_annotations(&PageScope::All, &BTreeSet::new()),
            Err(PageSiftError::NoAnnotationTypesSelected)
        ));
    }

    #[test]
    fn remove_metadata_drops_info_and_xmp() {
        let source = sample_pdf(1);
        assert!(contains(&source, b"Secret Title"));

        let output = PdfEditor::from_bytes(&source).unwrap().remove_metadata().unwrap();
        assert!(!contains(&output, b"Secret Title"));
        assert!(!contains(&output, b"Secret Author"));

        let doc = Document::load_mem(&output).unwrap();
        assert!(doc.trailer.get(b"Info").is_err());
        assert!(!doc.catalog().unwrap().has(b"Metadata"));
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn garbage_is_a_load_error() {
        assert!(matches!(
            PdfEditor::from_bytes(b"%PDF-nope"),
            Err(PageSiftError::Load(_))
        ));
    }
}
