mod admin;
mod forge;
mod initdb;

pub use admin::cmd_admin;
pub use forge::cmd_forge;
pub use initdb::cmd_initdb;

use std::io::Write;

/// Print `label` and read one line from stdin, without the line ending.
pub(crate) fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
