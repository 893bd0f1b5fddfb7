//! Parsing of the control program's start report.
//!
//! The start operation prints one line per member:
//!
//! ```text
//! <http_uri> <member_uri> <member_path>
//! ```
//!
//! Fields are separated by exactly one space and there is no quoting, so a
//! path containing a space cannot be expressed. The grammar is kept this
//! strict to match what the control program emits; any deviation fails the
//! whole report.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::{ClusterMember, Error, Result};

/// Number of space separated fields on a member line.
const FIELDS_PER_LINE: usize = 3;

/// Parses the full output of a start invocation into the set of members.
///
/// Empty lines are skipped. Every other line must be well formed; there is
/// no best-effort mode. Duplicate (endpoint, path) pairs collapse into one
/// member, and a report that names no members is an error.
///
/// Endpoints are normalized by URL parsing. For schemes the URL standard
/// knows (`http`, `https`, ...) the host is lowercased, a default port is
/// dropped and an empty path becomes `/`, so `http://B:80` is reported as
/// `http://b/` and lines differing only in that way name the same member.
/// `bolt://` endpoints are kept as written.
pub fn parse_start_report(output: &str) -> Result<HashSet<ClusterMember>> {
    let mut members = HashSet::new();

    for line in output.lines().filter(|line| !line.is_empty()) {
        let member = parse_member_line(line)?;
        debug!(endpoint = %member.endpoint(), path = %member.path().display(), "parsed cluster member");
        members.insert(member);
    }

    if members.is_empty() {
        return Err(Error::EmptyTopology);
    }

    Ok(members)
}

fn parse_member_line(line: &str) -> Result<ClusterMember> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != FIELDS_PER_LINE {
        return Err(Error::MalformedTopology {
            line: line.to_string(),
        });
    }

    // The HTTP address is validated but not kept.
    parse_uri(line, fields[0])?;
    let endpoint = parse_uri(line, fields[1])?;
    let path = PathBuf::from(fields[2]);

    Ok(ClusterMember::new(endpoint, path))
}

fn parse_uri(line: &str, uri: &str) -> Result<Url> {
    Url::parse(uri).map_err(|source| Error::InvalidMemberUri {
        line: line.to_string(),
        uri: uri.to_string(),
        source,
    })
}
