//! `list`: installed formulae, one keg's files, or unmanaged files.

use std::path::Path;

use walkdir::WalkDir;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result, WortError};
use crate::keg;
use crate::output;

/// Top-level prefix entries that are not user files: the Cellar itself, the
/// repository checkout under Library, and repository metadata.
const UNBREWED_SKIP: &[&str] = &["Cellar", "Library", ".git"];

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    if args.flag("--unbrewed") {
        return unbrewed(&ctx.config.prefix);
    }

    if args.is_empty() {
        return installed(&ctx.config.cellar);
    }

    for name in &args.named {
        let kegs = keg::installed_versions(&ctx.config.cellar, name)?;
        if kegs.is_empty() {
            return Err(WortError::Execution(format!(
                "No such keg: {}/{}",
                ctx.config.cellar.display(),
                name
            )));
        }
        for keg in kegs {
            for file in keg::keg_files(&keg) {
                println!("{}", file.display());
            }
        }
    }

    Ok(Flow::Done)
}

/// Installed formula names: columnar on a TTY, one per line when piped so
/// `wort list | xargs` behaves.
fn installed(cellar: &Path) -> Result<Flow> {
    let names = keg::installed_names(cellar)?;
    if names.is_empty() {
        return Ok(Flow::Done);
    }

    if output::stdout_is_tty() {
        print!("{}", output::format_columns(&names));
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(Flow::Done)
}

/// Regular files under the prefix that did not come from a keg. Symlinks are
/// skipped wholesale; the linked farm is all symlinks, so whatever remains
/// was put there by someone else.
fn unbrewed(prefix: &Path) -> Result<Flow> {
    if !prefix.exists() {
        return Ok(Flow::Done);
    }

    for entry in std::fs::read_dir(prefix)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !entry.path().is_dir() || UNBREWED_SKIP.contains(&name.as_str()) {
            continue;
        }

        for file in WalkDir::new(entry.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if file.file_name().to_string_lossy().eq_ignore_ascii_case(".ds_store") {
                continue;
            }
            println!("{}", file.path().display());
        }
    }

    Ok(Flow::Done)
}
