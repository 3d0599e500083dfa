//! `configure` (alias `diy`): print the install-prefix argument for building
//! the current directory's project straight into the cellar.

use std::path::Path;

use crate::args::Args;
use crate::commands::Context;
use crate::commands::create::parse_name_version;
use crate::error::{Flow, Result, WortError};

pub fn run(ctx: &Context, _args: &Args) -> Result<Flow> {
    let cwd = std::env::current_dir()?;
    print_configure_line(&cwd, &ctx.config.cellar)?;
    Ok(Flow::Done)
}

fn print_configure_line(cwd: &Path, cellar: &Path) -> Result<()> {
    let basename = cwd
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let (name, version) = parse_name_version(&basename).ok_or_else(|| {
        WortError::Execution(format!(
            "Couldn't determine a name and version from '{basename}'; \
             run this from a directory named like wget-1.21.4"
        ))
    })?;

    let prefix = cellar.join(&name).join(&version);
    if cwd.join("CMakeLists.txt").is_file() {
        println!("-DCMAKE_INSTALL_PREFIX={}", prefix.display());
    } else {
        println!("--prefix={}", prefix.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_directory_names_get_guidance() {
        let temp = tempfile::tempdir().unwrap();
        let project = temp.path().join("my-sources");
        std::fs::create_dir(&project).unwrap();

        let err = print_configure_line(&project, Path::new("/tmp/Cellar")).unwrap_err();
        match err {
            WortError::Execution(msg) => assert!(msg.contains("my-sources")),
            other => panic!("expected Execution, got {other:?}"),
        }
    }

    #[test]
    fn test_name_version_directories_parse() {
        let temp = tempfile::tempdir().unwrap();
        let project = temp.path().join("hello-2.12");
        std::fs::create_dir(&project).unwrap();
        // Output goes to stdout; only the parse outcome is asserted here
        assert!(print_configure_line(&project, Path::new("/tmp/Cellar")).is_ok());
    }
}
