//! Hand the triangles to a web viewer through the host's URL opener.
//! The launch is best effort: failures are logged, never returned.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::process::Command;

pub const GEOJSON_IO: &str = "https://geojson.io/#data=data:application/json,";

/// Same reserved set as JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `prefix` followed by `json`, percent-encoded as a URI component.
pub fn viewer_url(prefix: &str, json: &str) -> String {
    format!("{prefix}{}", utf8_percent_encode(json, URI_COMPONENT))
}

fn opener(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(url);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Launch the viewer; the outcome is only logged.
pub fn open(url: &str) {
    match opener(url).status() {
        Ok(status) if status.success() => tracing::info!(url_len = url.len(), "opened viewer"),
        Ok(status) => tracing::warn!(code = ?status.code(), "failed to launch browser"),
        Err(err) => tracing::warn!(%err, "failed to launch browser"),
    }
}
