//! CLI command implementations.

pub mod init;
pub mod parse;
pub mod up;

use comfy_table::{Table, presets::UTF8_FULL};
use testcluster::ClusterMember;

/// Renders members as a table, ordered by endpoint then path.
pub fn member_table<'a>(members: impl IntoIterator<Item = &'a ClusterMember>) -> Table {
    let mut members: Vec<_> = members.into_iter().collect();
    members.sort_by(|a, b| {
        a.endpoint()
            .cmp(b.endpoint())
            .then_with(|| a.path().cmp(b.path()))
    });

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Endpoint", "Address", "Path"]);
    for member in members {
        table.add_row(vec![
            member.endpoint().to_string(),
            member.address().unwrap_or_else(|| "-".to_string()),
            member.path().display().to_string(),
        ]);
    }
    table
}
