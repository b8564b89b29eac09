use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::input::is_stdio;

/// Fail when `output` would overwrite one of `inputs`. `-` never clashes.
pub fn ensure_output_not_same(output: &Path, inputs: &[&Path]) -> Result<()> {
    if is_stdio(output) {
        return Ok(());
    }
    let target = resolve(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    for input in inputs.iter().copied().filter(|input| !is_stdio(input)) {
        let source = resolve(input)
            .with_context(|| format!("failed to resolve input path {}", input.display()))?;
        if source == target {
            bail!(
                "refusing to overwrite input file: output {} matches input {}",
                output.display(),
                input.display()
            );
        }
    }
    Ok(())
}

/// Absolute path with symlinks and `..` resolved as far as the disk allows.
///
/// A file that does not exist yet is resolved through its parent directory.
fn resolve(path: &Path) -> Result<PathBuf> {
    if let Ok(real) = path.canonicalize() {
        return Ok(real);
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to read current directory")?
            .join(path)
    };
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or(absolute),
        _ => absolute,
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{ensure_output_not_same, resolve};

    #[test]
    fn dot_dot_output_still_matches_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        let input = dir.path().join("nat.conf");
        fs::write(&input, "end\n").expect("write input");

        let output = dir.path().join("sub").join("..").join("nat.conf");
        let err = ensure_output_not_same(&output, &[&input]).expect_err("should refuse");
        assert!(err.to_string().contains("refusing to overwrite input file"));
    }

    #[test]
    fn new_file_resolves_through_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        let output = dir.path().join("sub").join("..").join("new.csv");

        let expected = dir.path().canonicalize().expect("canonical dir").join("new.csv");
        assert_eq!(resolve(&output).expect("resolve"), expected);
    }

    #[test]
    fn stdio_is_never_a_clash() {
        let stdio = Path::new("-");
        assert!(ensure_output_not_same(stdio, &[stdio]).is_ok());
    }
}
