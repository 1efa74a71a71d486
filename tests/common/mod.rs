//! PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

pub const FACTURX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rsm:CrossIndustryInvoice xmlns:rsm="urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100" xmlns:ram="urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100">
  <rsm:ExchangedDocumentContext>
    <ram:GuidelineSpecifiedDocumentContextParameter>
      <ram:ID>urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended</ram:ID>
    </ram:GuidelineSpecifiedDocumentContextParameter>
  </rsm:ExchangedDocumentContext>
  <rsm:ExchangedDocument>
    <ram:ID>RE-2024-001</ram:ID>
  </rsm:ExchangedDocument>
</rsm:CrossIndustryInvoice>"#;

pub const XRECHNUNG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rsm:CrossIndustryInvoice xmlns:rsm="urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100" xmlns:ram="urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100">
  <rsm:ExchangedDocumentContext>
    <ram:GuidelineSpecifiedDocumentContextParameter>
      <ram:ID>urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0</ram:ID>
    </ram:GuidelineSpecifiedDocumentContextParameter>
  </rsm:ExchangedDocumentContext>
</rsm:CrossIndustryInvoice>"#;

/// One embedded file of a fixture.
pub struct Embedded<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
    pub compress: bool,
}

impl<'a> Embedded<'a> {
    pub fn plain(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            compress: false,
        }
    }

    pub fn flate(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            compress: true,
        }
    }
}

/// A one-page PDF without any attachment.
pub fn minimal_document() -> (Document, ObjectId) {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    });
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        b"BT /F1 12 Tf 100 700 Td (Rechnung) Tj ET".to_vec(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Reference(resources_id),
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    (doc, catalog_id)
}

fn add_filespec(doc: &mut Document, file: &Embedded<'_>) -> ObjectId {
    let mut stream = Stream::new(
        dictionary! {
            "Type" => "EmbeddedFile",
            "Subtype" => Object::Name(b"text#2Fxml".to_vec()),
            "Params" => dictionary! {
                "Size" => Object::Integer(file.data.len() as i64),
            },
        },
        file.data.to_vec(),
    );
    if file.compress {
        stream.compress().unwrap();
    }
    let stream_id = doc.add_object(stream);

    doc.add_object(dictionary! {
        "Type" => "Filespec",
        "F" => Object::string_literal(file.name),
        "UF" => Object::string_literal(file.name),
        "EF" => dictionary! {
            "F" => Object::Reference(stream_id),
        },
    })
}

fn save(mut doc: Document, path: &Path) -> PathBuf {
    doc.save(path).unwrap();
    path.to_path_buf()
}

/// PDF with an `EmbeddedFiles` name tree and a matching catalog `AF` array.
pub fn pdf_with_attachments(path: &Path, files: &[Embedded<'_>]) -> PathBuf {
    let (mut doc, catalog_id) = minimal_document();

    let mut names = Vec::new();
    let mut af = Vec::new();
    for file in files {
        let spec_id = add_filespec(&mut doc, file);
        names.push(Object::string_literal(file.name));
        names.push(Object::Reference(spec_id));
        af.push(Object::Reference(spec_id));
    }

    let tree_id = doc.add_object(dictionary! { "Names" => names });
    let names_id = doc.add_object(dictionary! {
        "EmbeddedFiles" => Object::Reference(tree_id),
    });
    let catalog = doc.get_dictionary_mut(catalog_id).unwrap();
    catalog.set("Names", Object::Reference(names_id));
    catalog.set("AF", Object::Array(af));

    save(doc, path)
}

/// PDF whose name tree is malformed (odd `Names` array) while the file
/// specification itself is intact.
pub fn pdf_with_broken_name_tree(path: &Path, file: &Embedded<'_>) -> PathBuf {
    let (mut doc, catalog_id) = minimal_document();
    let spec_id = add_filespec(&mut doc, file);

    let tree_id = doc.add_object(dictionary! {
        "Names" => vec![
            Object::string_literal(file.name),
            Object::Reference(spec_id),
            Object::string_literal("dangling"),
        ],
    });
    let names_id = doc.add_object(dictionary! {
        "EmbeddedFiles" => Object::Reference(tree_id),
    });
    doc.get_dictionary_mut(catalog_id)
        .unwrap()
        .set("Names", Object::Reference(names_id));

    save(doc, path)
}

/// PDF without any embedded file.
pub fn pdf_without_attachments(path: &Path) -> PathBuf {
    let (doc, _) = minimal_document();
    save(doc, path)
}
