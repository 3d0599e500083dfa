//! `create`: scaffold a formula definition from a source archive URL and
//! drop into the editor.

use crate::args::Args;
use crate::commands::{self, Context};
use crate::error::{Flow, Result, WortError};

const ARCHIVE_SUFFIXES: &[&str] = &[
    ".tar.gz", ".tar.bz2", ".tar.xz", ".tgz", ".tbz", ".tbz2", ".txz", ".zip", ".tar",
];

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let Some(url) = args.first() else {
        return Err(WortError::Usage);
    };

    let (name, _version) = parse_archive_url(url).ok_or_else(|| {
        WortError::Execution(format!("Couldn't derive a formula name from {url}"))
    })?;

    if ctx.config.existing_formula_path(&name).is_some() {
        return Err(WortError::Execution(format!(
            "{} already exists",
            ctx.config.formula_path(&name).display()
        )));
    }

    let path = ctx.config.formula_path(&name);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, template(&name, url))?;
    println!("Created {}", path.display());

    // Straight into the editor, the way a new formula always continues.
    commands::edit::run(ctx, &Args::split(&[name]))
}

/// Formula name and version from an archive URL's basename, with the archive
/// suffix stripped and the split at the last dash before a digit.
pub(crate) fn parse_archive_url(url: &str) -> Option<(String, String)> {
    let basename = url.rsplit('/').next()?;
    let stem = ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| basename.strip_suffix(suffix))
        .unwrap_or(basename);
    parse_name_version(stem)
}

/// Split `wget-1.21.4` into `("wget", "1.21.4")`. The version starts at the
/// last `-` whose next character is a digit, so `libfoo-bar-2.0` keeps its
/// dashed name.
pub(crate) fn parse_name_version(stem: &str) -> Option<(String, String)> {
    let split = stem
        .char_indices()
        .rev()
        .find(|(i, c)| {
            *c == '-'
                && stem[i + 1..]
                    .chars()
                    .next()
                    .is_some_and(|next| next.is_ascii_digit())
        })
        .map(|(i, _)| i)?;

    let name = &stem[..split];
    let version = &stem[split + 1..];
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name.to_string(), version.to_string()))
}

fn class_name(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn template(name: &str, url: &str) -> String {
    format!(
        r#"class {class} < Formula
  desc ""
  homepage ""
  url "{url}"
  sha256 ""

  def install
    system "./configure", "--prefix=#{{prefix}}"
    system "make", "install"
  end
end
"#,
        class = class_name(name)
    )
}
