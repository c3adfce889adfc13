//! PROPFIND multistatus parsing
//!
//! A PROPFIND response is a `DAV:` multistatus document with one `response`
//! element per entry. Only the properties the listing needs are pulled out;
//! everything else is skipped.

use ncup_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One `response` element of a multistatus document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DavResponse {
    /// Raw (still percent-encoded) href of the entry
    pub href: String,

    /// True when `resourcetype` contains `collection`
    pub is_collection: bool,

    /// `getcontentlength`, present for files
    pub content_length: Option<u64>,

    /// `quota-used-bytes`, present for collections
    pub quota_used_bytes: Option<u64>,

    /// `getlastmodified`, verbatim
    pub last_modified: String,
}

/// Parse a multistatus body into its responses, in document order.
pub fn parse_multistatus(body: &str) -> Result<Vec<DavResponse>> {
    let mut reader = Reader::from_str(body);
    let mut responses = Vec::new();
    let mut current: Option<DavResponse> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                match start.local_name().as_ref() {
                    b"response" => current = Some(DavResponse::default()),
                    b"href" => field = Some(Field::Href),
                    b"getcontentlength" => field = Some(Field::ContentLength),
                    b"quota-used-bytes" => field = Some(Field::QuotaUsedBytes),
                    b"getlastmodified" => field = Some(Field::LastModified),
                    b"collection" => {
                        if let Some(response) = current.as_mut() {
                            response.is_collection = true;
                        }
                        field = None;
                    }
                    _ => field = None,
                };
            }
            Ok(Event::Empty(empty)) => {
                if empty.local_name().as_ref() == b"collection" {
                    if let Some(response) = current.as_mut() {
                        response.is_collection = true;
                    }
                }
            }
            Ok(Event::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|e| Error::Protocol(format!("bad multistatus text: {e}")))?;
                if let (Some(response), Some(field)) = (current.as_mut(), field) {
                    field.assign(response, value.trim());
                }
            }
            Ok(Event::End(end)) => {
                field = None;
                if end.local_name().as_ref() == b"response" {
                    if let Some(response) = current.take() {
                        responses.push(response);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Protocol(format!("malformed multistatus: {e}")));
            }
        }
    }

    Ok(responses)
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Href,
    ContentLength,
    QuotaUsedBytes,
    LastModified,
}

impl Field {
    fn assign(self, response: &mut DavResponse, value: &str) {
        match self {
            Field::Href => response.href = value.to_string(),
            Field::ContentLength => response.content_length = value.parse().ok(),
            Field::QuotaUsedBytes => response.quota_used_bytes = value.parse().ok(),
            Field::LastModified => response.last_modified = value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns">
  <d:response>
    <d:href>/remote.php/dav/files/alice/Documents/</d:href>
    <d:propstat>
      <d:prop>
        <d:resourcetype><d:collection/></d:resourcetype>
        <d:getlastmodified>Tue, 06 Jan 2026 10:00:00 GMT</d:getlastmodified>
        <d:quota-used-bytes>5242880</d:quota-used-bytes>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/remote.php/dav/files/alice/Documents/shopping%20list.txt</d:href>
    <d:propstat>
      <d:prop>
        <d:resourcetype/>
        <d:getlastmodified>Mon, 05 Jan 2026 09:30:00 GMT</d:getlastmodified>
        <d:getcontentlength>1536</d:getcontentlength>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

    #[test]
    fn test_parse_listing() {
        let responses = parse_multistatus(LISTING).unwrap();
        assert_eq!(responses.len(), 2);

        let dir = &responses[0];
        assert_eq!(dir.href, "/remote.php/dav/files/alice/Documents/");
        assert!(dir.is_collection);
        assert_eq!(dir.quota_used_bytes, Some(5242880));
        assert_eq!(dir.content_length, None);
        assert_eq!(dir.last_modified, "Tue, 06 Jan 2026 10:00:00 GMT");

        let file = &responses[1];
        assert_eq!(
            file.href,
            "/remote.php/dav/files/alice/Documents/shopping%20list.txt"
        );
        assert!(!file.is_collection);
        assert_eq!(file.content_length, Some(1536));
        assert_eq!(file.quota_used_bytes, None);
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let responses = parse_multistatus(LISTING).unwrap();
        assert!(responses[0].is_collection);
        assert!(!responses[1].is_collection);
    }

    #[test]
    fn test_parse_missing_props() {
        let body = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:">
  <d:response>
    <d:href>/remote.php/dav/files/alice/empty.bin</d:href>
    <d:propstat>
      <d:prop><d:resourcetype/></d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

        let responses = parse_multistatus(body).unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].content_length, None);
        assert_eq!(responses[0].last_modified, "");
    }

    #[test]
    fn test_parse_malformed_document() {
        let result = parse_multistatus("<d:multistatus><d:response>");
        // Unclosed elements parse to EOF without responses completing.
        assert_eq!(result.unwrap().len(), 0);

        assert!(parse_multistatus("<a></b>").is_err());
    }
}
