// ABOUTME: Rebuilds message records from the line stream of an AT+CMGL listing response
// ABOUTME: Matches +CMGL header lines and folds the body lines that follow into each message

use crate::client::error::ModemResult;
use crate::client::types::{Message, SessionId};
use crate::datatypes::parse_timestamp;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// `+CMGL: <index>,"<status>","<number>",["<name>"],["<date>"]` followed by CR/LF.
///
/// Name and date may be missing or quoted-empty; both read as absent.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\+CMGL: (\d+),"(.+?)","(.+?)",(?:"(.*?)")?,(?:"(.*?)")?\r\n"#)
        .expect("+CMGL header pattern is valid")
});

/// Metadata from one `+CMGL:` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingHeader {
    pub index: u32,
    pub status: String,
    pub number: String,
    pub name: Option<String>,
    pub date: Option<String>,
}

impl ListingHeader {
    /// Match `line` against the header grammar.
    ///
    /// Anything that does not match, including an index too large for `u32`,
    /// is not a header.
    pub fn parse(line: &str) -> Option<ListingHeader> {
        let caps = HEADER.captures(line)?;
        let optional = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Some(ListingHeader {
            index: caps[1].parse().ok()?,
            status: caps[2].to_string(),
            number: caps[3].to_string(),
            name: optional(4),
            date: optional(5),
        })
    }
}

/// A message whose header has been seen and whose body is still being read.
struct Pending {
    header: ListingHeader,
    text: String,
}

impl Pending {
    fn new(header: ListingHeader) -> Self {
        Pending {
            header,
            text: String::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if line == "\r\n" {
            self.text.push('\n');
        } else {
            self.text.push_str(line.trim_end_matches(['\r', '\n']));
        }
    }

    fn finish(self, session: SessionId) -> ModemResult<Message> {
        let timestamp = self
            .header
            .date
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(Message::new(
            self.header.index,
            session,
            self.header.status,
            self.header.number,
            self.header.name,
            timestamp,
            self.text,
        ))
    }
}

/// Parse the lines of an `AT+CMGL` response into messages.
///
/// `lines` is the response without its final result code. Each header starts
/// a new message and the lines up to the next header are its body. Lines
/// before the first header are dropped. A header whose date cannot be read
/// fails the whole listing.
pub fn parse_listing<S: AsRef<str>>(lines: &[S], session: SessionId) -> ModemResult<Vec<Message>> {
    let mut messages = Vec::new();
    let mut pending: Option<Pending> = None;

    for line in lines {
        let line = line.as_ref();
        trace!(line = %line.escape_debug(), "listing line");

        if let Some(header) = ListingHeader::parse(line) {
            if let Some(done) = pending.take() {
                messages.push(done.finish(session)?);
            }
            pending = Some(Pending::new(header));
        } else if let Some(current) = pending.as_mut() {
            current.push_line(line);
        } else {
            debug!(line = %line.escape_debug(), "dropping line before first +CMGL header");
        }
    }

    // listings have no trailing header to flush the last message
    if let Some(done) = pending {
        messages.push(done.finish(session)?);
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::ModemError;

    fn session() -> SessionId {
        SessionId::next()
    }

    #[test]
    fn test_header_with_all_groups() {
        let header =
            ListingHeader::parse("+CMGL: 3,\"REC READ\",\"+15551234\",\"Alice\",\"21/05/01,14:30:00+08\"\r\n")
                .unwrap();
        assert_eq!(header.index, 3);
        assert_eq!(header.status, "REC READ");
        assert_eq!(header.number, "+15551234");
        assert_eq!(header.name.as_deref(), Some("Alice"));
        assert_eq!(header.date.as_deref(), Some("21/05/01,14:30:00+08"));
    }

    #[test]
    fn test_header_without_name_or_date() {
        let header = ListingHeader::parse("+CMGL: 1,\"REC UNREAD\",\"5551234\",,\r\n").unwrap();
        assert_eq!(header.index, 1);
        assert_eq!(header.name, None);
        assert_eq!(header.date, None);
    }

    #[test]
    fn test_header_with_quoted_empty_name() {
        let header =
            ListingHeader::parse("+CMGL: 2,\"REC READ\",\"5551234\",\"\",\"21/05/01,14:30:00+08\"\r\n")
                .unwrap();
        assert_eq!(header.name, None);
        assert_eq!(header.date.as_deref(), Some("21/05/01,14:30:00+08"));
    }

    #[test]
    fn test_non_headers() {
        assert!(ListingHeader::parse("Hello\r\n").is_none());
        assert!(ListingHeader::parse("+CMGL: x,\"REC READ\",\"1\",,\r\n").is_none());
        assert!(ListingHeader::parse("+CMGL: 99999999999,\"REC READ\",\"1\",,\r\n").is_none());
        // header grammar requires the CR/LF terminator
        assert!(ListingHeader::parse("+CMGL: 1,\"REC READ\",\"1\",,").is_none());
    }

    #[test]
    fn test_bodies_of_zero_one_and_many_lines() {
        let lines = [
            "+CMGL: 1,\"REC READ\",\"111\",,\"21/05/01,14:30:00+08\"\r\n",
            "+CMGL: 2,\"REC READ\",\"222\",,\"21/05/02,09:00:00+00\"\r\n",
            "single\r\n",
            "+CMGL: 3,\"REC UNREAD\",\"333\",,\"21/05/03,23:59:59-04\"\r\n",
            "first\r\n",
            "\r\n",
            "second\r\n",
        ];

        let messages = parse_listing(&lines, session()).unwrap();
        assert_eq!(messages.len(), 3);

        assert_eq!(messages[0].index, 1);
        assert_eq!(messages[0].number, "111");
        assert_eq!(messages[0].text, "");

        assert_eq!(messages[1].text, "single");
        assert_eq!(
            messages[1].timestamp.unwrap().to_string(),
            "2021-05-02 09:00:00"
        );

        assert_eq!(messages[2].status, "REC UNREAD");
        assert_eq!(messages[2].text, "first\nsecond");
    }

    #[test]
    fn test_lines_before_first_header_are_dropped() {
        let lines = ["AT+CMGL=\"ALL\"\r\n", "+CMGL: 5,\"REC READ\",\"555\",,\r\n", "hi\r\n"];
        let messages = parse_listing(&lines, session()).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].index, 5);
        assert_eq!(messages[0].timestamp, None);
        assert_eq!(messages[0].text, "hi");
    }

    #[test]
    fn test_empty_listing() {
        let lines: [&str; 0] = [];
        assert!(parse_listing(&lines, session()).unwrap().is_empty());
    }

    #[test]
    fn test_bad_date_fails_listing() {
        let lines = ["+CMGL: 1,\"REC READ\",\"111\",,\"yesterday+08\"\r\n"];
        let result = parse_listing(&lines, session());
        assert!(matches!(result, Err(ModemError::Timestamp(_))));
    }

    #[test]
    fn test_records_carry_session() {
        let id = session();
        let lines = ["+CMGL: 1,\"REC READ\",\"111\",,\r\n"];
        let messages = parse_listing(&lines, id).unwrap();
        assert_eq!(messages[0].session(), id);
    }
}
