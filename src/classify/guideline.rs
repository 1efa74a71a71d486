use quick_xml::Reader;
use quick_xml::events::Event;

/// Read the profile URN from
/// `GuidelineSpecifiedDocumentContextParameter/ID`, whatever the prefix.
///
/// Returns `None` when the element is missing or the XML cannot be parsed
/// up to that point. Purely informational.
pub fn guideline_id(data: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_guideline = false;
    let mut in_id = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"GuidelineSpecifiedDocumentContextParameter" => in_guideline = true,
                b"ID" if in_guideline => in_id = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_id => {
                let text = e.unescape().ok()?.trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"GuidelineSpecifiedDocumentContextParameter" => return None,
                b"ID" => in_id = false,
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}
