use std::collections::HashSet;
use std::fs;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use super::names::{UniqueNames, decode_text_string};
use super::{ContainerParser, ParseConfig, ValidationMode};
use crate::core::{ExtractorError, Result};

/// Name trees deeper than this are treated as malformed (or cyclic).
const MAX_NAME_TREE_DEPTH: usize = 32;

/// lopdf-backed [`ContainerParser`] for PDF containers.
///
/// In strict mode only the declared attachment structures are walked:
/// the `Names > EmbeddedFiles` name tree, then the catalog `AF` array.
/// In relaxed mode every indirect file specification in the document is
/// considered and broken ones are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self {
        Self
    }
}

struct EmbeddedObject {
    name: Option<String>,
    data: Vec<u8>,
}

impl ContainerParser for PdfParser {
    fn extract_attachments(
        &self,
        container: &Path,
        dest: &Path,
        config: &ParseConfig,
    ) -> Result<usize> {
        let doc = Document::load(container)
            .map_err(|e| ExtractorError::Container(format!("failed to load PDF: {e}")))?;

        let objects = match config.validation {
            ValidationMode::Strict => collect_declared(&doc, config.decode_all_streams)
                .map_err(|e| ExtractorError::Container(format!("invalid attachment structure: {e}")))?,
            ValidationMode::Relaxed => collect_any(&doc, config.decode_all_streams),
        };

        let mut names = UniqueNames::default();
        for object in &objects {
            let file_name = names.claim(object.name.as_deref());
            fs::write(dest.join(&file_name), &object.data)?;
            debug!(name = %file_name, bytes = object.data.len(), "wrote embedded file");
        }
        Ok(objects.len())
    }
}

fn collect_declared(doc: &Document, decode_all: bool) -> Result<Vec<EmbeddedObject>, String> {
    let catalog = doc.catalog().map_err(|e| e.to_string())?;

    let mut entries: Vec<(Option<String>, &Object)> = Vec::new();
    if let Ok(names_obj) = catalog.get(b"Names") {
        let names_dict = resolve_dict(doc, names_obj)?;
        if let Ok(ef_obj) = names_dict.get(b"EmbeddedFiles") {
            let root = resolve_dict(doc, ef_obj)?;
            walk_name_tree(doc, root, 0, &mut entries)?;
        }
    }

    let mut seen: HashSet<ObjectId> = entries
        .iter()
        .filter_map(|(_, obj)| obj.as_reference().ok())
        .collect();

    if let Ok(af_obj) = catalog.get(b"AF") {
        let af_array = resolve_obj(doc, af_obj)?
            .as_array()
            .map_err(|e| e.to_string())?;
        for obj in af_array {
            if let Ok(id) = obj.as_reference() {
                if !seen.insert(id) {
                    continue;
                }
            }
            entries.push((None, obj));
        }
    }

    let mut objects = Vec::with_capacity(entries.len());
    for (tree_name, spec_obj) in entries {
        let fs_dict = resolve_dict(doc, spec_obj)?;
        let data = read_embedded_stream(doc, fs_dict, decode_all)?;
        objects.push(EmbeddedObject {
            name: filespec_name(doc, fs_dict).or(tree_name),
            data,
        });
    }
    Ok(objects)
}

fn walk_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    depth: usize,
    entries: &mut Vec<(Option<String>, &'a Object)>,
) -> Result<(), String> {
    if depth > MAX_NAME_TREE_DEPTH {
        return Err("EmbeddedFiles name tree too deep".to_string());
    }

    if let Ok(names_obj) = node.get(b"Names") {
        let names_array = resolve_obj(doc, names_obj)?
            .as_array()
            .map_err(|e| e.to_string())?;
        // Names array: [name1, ref1, name2, ref2, ...]
        if names_array.len() % 2 != 0 {
            return Err("odd number of entries in EmbeddedFiles Names array".to_string());
        }
        for pair in names_array.chunks_exact(2) {
            entries.push((obj_to_string(doc, &pair[0]), &pair[1]));
        }
    }

    if let Ok(kids_obj) = node.get(b"Kids") {
        let kids = resolve_obj(doc, kids_obj)?
            .as_array()
            .map_err(|e| e.to_string())?;
        for kid in kids {
            let kid_dict = resolve_dict(doc, kid)?;
            walk_name_tree(doc, kid_dict, depth + 1, entries)?;
        }
    }

    Ok(())
}

fn collect_any(doc: &Document, decode_all: bool) -> Vec<EmbeddedObject> {
    let mut objects = Vec::new();
    for (id, obj) in &doc.objects {
        let Ok(fs_dict) = obj.as_dict() else {
            continue;
        };
        if !fs_dict.has(b"EF") {
            continue;
        }
        match read_embedded_stream(doc, fs_dict, decode_all) {
            Ok(data) => objects.push(EmbeddedObject {
                name: filespec_name(doc, fs_dict),
                data,
            }),
            Err(e) => debug!(object = ?id, error = %e, "skipping unreadable file specification"),
        }
    }
    objects
}

fn read_embedded_stream(
    doc: &Document,
    fs_dict: &Dictionary,
    decode_all: bool,
) -> Result<Vec<u8>, String> {
    let ef_obj = fs_dict.get(b"EF").map_err(|e| e.to_string())?;
    let ef_dict = resolve_dict(doc, ef_obj)?;

    let f_obj = ef_dict
        .get(b"F")
        .or_else(|_| ef_dict.get(b"UF"))
        .map_err(|e| e.to_string())?;
    let stream = resolve_obj(doc, f_obj)?
        .as_stream()
        .map_err(|e| e.to_string())?;
    decode_stream(stream, decode_all)
}

fn decode_stream(stream: &Stream, decode_all: bool) -> Result<Vec<u8>, String> {
    // decompressed_content() fails when no Filter key exists, so unfiltered
    // streams are taken as stored.
    if stream.dict.get(b"Filter").is_err() {
        return Ok(stream.content.clone());
    }
    match stream.decompressed_content() {
        Ok(content) => Ok(content),
        Err(e) if decode_all => Err(format!("failed to decode embedded stream: {e}")),
        Err(_) => Ok(stream.content.clone()),
    }
}

fn filespec_name(doc: &Document, fs_dict: &Dictionary) -> Option<String> {
    let keys: [&[u8]; 2] = [b"UF", b"F"];
    keys.into_iter()
        .filter_map(|key| fs_dict.get(key).ok())
        .filter_map(|obj| obj_to_string(doc, obj))
        .find(|name| !name.trim().is_empty())
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Dictionary, String> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id).map_err(|e| e.to_string()),
        Object::Dictionary(d) => Ok(d),
        _ => Err("expected dictionary or reference".to_string()),
    }
}

fn resolve_obj<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, String> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).map_err(|e| e.to_string()),
        other => Ok(other),
    }
}

fn obj_to_string(doc: &Document, obj: &Object) -> Option<String> {
    match resolve_obj(doc, obj).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(bytes) => Some(decode_text_string(bytes)),
        _ => None,
    }
}
