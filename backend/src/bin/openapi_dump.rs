//! Print the Foodgram OpenAPI document as pretty JSON on stdout.

use std::io::Write;

use color_eyre::eyre::Result;
use foodgram::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi().to_pretty_json()?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{document}")?;
    Ok(())
}
