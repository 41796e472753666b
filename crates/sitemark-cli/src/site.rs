//! Site generation: static file copying and page rendering.
//!
//! The output of a build is the static tree copied verbatim, plus one HTML
//! page for every markdown file under the content directory, at the same
//! relative path with an `.html` extension.

use std::fs;
use std::path::{Path, PathBuf};

use sitemark_core::compile_document;

use crate::error::SiteError;

/// Placeholder replaced by the page title.
pub(crate) const TITLE_PLACEHOLDER: &str = "{{ Title }}";
/// Placeholder replaced by the rendered page body.
pub(crate) const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Everything a build needs to know, resolved from the command line.
#[derive(Debug, Clone)]
pub(crate) struct SiteConfig {
    pub static_dir: PathBuf,
    pub content_dir: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub base_path: String,
}

/// Counts reported after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BuildSummary {
    pub static_files: usize,
    pub pages: usize,
}

/// Run a full build: reset the output directory, copy static files,
/// then generate every page.
pub(crate) fn build(config: &SiteConfig) -> Result<BuildSummary, SiteError> {
    let static_files = copy_tree(&config.static_dir, &config.output_dir)?;

    let template =
        fs::read_to_string(&config.template).map_err(SiteError::io(&config.template))?;

    let pages = generate_pages_recursive(
        &config.content_dir,
        &template,
        &config.output_dir,
        &config.base_path,
    )?;

    Ok(BuildSummary {
        static_files,
        pages,
    })
}

/// Replace `dst` with a copy of `src`, returning the number of files copied.
pub(crate) fn copy_tree(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    if dst.exists() {
        tracing::debug!(path = %dst.display(), "Removing previous output");
        fs::remove_dir_all(dst).map_err(SiteError::io(dst))?;
    }
    copy_dir(src, dst)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    fs::create_dir_all(dst).map_err(SiteError::io(dst))?;

    let mut copied = 0;
    for path in sorted_entries(src)? {
        let target = dst.join(path.file_name().unwrap_or_default());
        if path.is_dir() {
            copied += copy_dir(&path, &target)?;
        } else {
            tracing::debug!(from = %path.display(), to = %target.display(), "Copying file");
            fs::copy(&path, &target).map_err(SiteError::io(&path))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut paths = fs::read_dir(dir)
        .map_err(SiteError::io(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(SiteError::io(dir))?;
    paths.sort();
    Ok(paths)
}

/// Title of a page: the first line starting with `# `, trimmed.
pub(crate) fn extract_title(markdown: &str) -> Option<&str> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
}

/// Substitute title and content into a page template.
pub(crate) fn apply_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Prefix root-relative `href` and `src` attributes with `base_path`.
///
/// A base path of `/` leaves the page unchanged.
pub(crate) fn rewrite_base_path(html: &str, base_path: &str) -> String {
    let base = normalize_base_path(base_path);
    if base == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{}", base))
        .replace("src=\"/", &format!("src=\"{}", base))
}

fn normalize_base_path(base_path: &str) -> String {
    let mut base = String::with_capacity(base_path.len() + 2);
    if !base_path.starts_with('/') {
        base.push('/');
    }
    base.push_str(base_path);
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

/// Render one markdown file into `dest` through `template`.
pub(crate) fn generate_page(
    from: &Path,
    template: &str,
    dest: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    tracing::info!(from = %from.display(), to = %dest.display(), "Generating page");

    let markdown = fs::read_to_string(from).map_err(SiteError::io(from))?;

    let content = compile_document(&markdown)
        .and_then(|root| root.render())
        .map_err(|source| SiteError::Compile {
            path: from.to_path_buf(),
            source,
        })?;

    let title = extract_title(&markdown).ok_or_else(|| SiteError::MissingTitle {
        path: from.to_path_buf(),
    })?;

    let page = apply_template(template, title, &content);
    let page = rewrite_base_path(&page, base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    fs::write(dest, page).map_err(SiteError::io(dest))
}

/// Generate a page for every `.md` file below `content_dir`.
///
/// Returns the number of pages written.
pub(crate) fn generate_pages_recursive(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
) -> Result<usize, SiteError> {
    let mut pages = 0;
    for path in sorted_entries(content_dir)? {
        let target = dest_dir.join(path.file_name().unwrap_or_default());
        if path.is_dir() {
            pages += generate_pages_recursive(&path, template, &target, base_path)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            generate_page(&path, template, &target.with_extension("html"), base_path)?;
            pages += 1;
        } else {
            tracing::warn!(path = %path.display(), "Skipping non-markdown file");
        }
    }
    Ok(pages)
}
