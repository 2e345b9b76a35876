use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::Handler;
use crate::http::context::Context;
use crate::http::headers::Header;
use crate::http::paths::http_path_for_filepath;
use crate::http::response::{Body, Status};
use crate::util::fs;

/// Serves a pre-rendered HTML listing of one directory.
///
/// The listing is built once at construction (directories first, then
/// files, each entry linking to its HTTP path) and reused on every request.
pub struct DirectoryHandler {
    html_page: String,
}

impl DirectoryHandler {
    /// `dir_path` is where the entries are read from; `rel_path` is the
    /// directory's path relative to the serving root, which the links are
    /// derived from.
    pub fn new(dir_path: &Path, rel_path: &Path) -> Result<Self> {
        let mut entries = fs::dirs_in_directory(dir_path)?;
        entries.extend(fs::files_in_directory(dir_path)?);

        let listing_path = http_path_for_filepath(&rel_path.to_string_lossy());
        let mut items = String::new();
        for name in &entries {
            let http_path = http_path_for_filepath(&rel_path.join(name).to_string_lossy());
            let _ = writeln!(items, "    <li><a href=\"{http_path}\">{name}</a></li>");
        }

        let html_page = format!(
            "<!DOCTYPE html>\n<html>\n<head><title>Index of {listing_path}</title></head>\n\
             <body>\n  <h1>Index of {listing_path}</h1>\n  <ul>\n{items}  </ul>\n</body>\n</html>\n"
        );
        Ok(Self { html_page })
    }
}

#[async_trait]
impl Handler for DirectoryHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        ctx.response.body = Body::Text(self.html_page.clone());
        ctx.response.status = Status::Ok;
        ctx.response.add_header(Header::new("Content-Type", "text/html"));
        Ok(())
    }
}
