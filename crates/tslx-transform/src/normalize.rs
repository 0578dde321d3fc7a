//! Output file name normalization

use std::path::{Path, PathBuf};
use tslx_transpiler::OutputFile;

/// `dir/foo.test.lua` -> `dir/foo-test.lua`. `None` for paths that are not
/// `.lua` files or have no dot to replace.
pub fn dashed_output_path(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(".lua")?;
    let dashed = stem.replace('.', "-");
    if dashed == stem {
        return None;
    }
    Some(path.with_file_name(format!("{}.lua", dashed)))
}

/// Rename every `.lua` output whose file name contains extra dots.
pub fn normalize_output_paths(files: &mut [OutputFile]) {
    for file in files {
        if let Some(renamed) = dashed_output_path(&file.output_path) {
            log::debug!("Renaming output {} -> {}", file.output_path.display(), renamed.display());
            file.output_path = renamed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashed_output_path() {
        assert_eq!(
            dashed_output_path(Path::new("/out/folder/bar.test.lua")),
            Some(PathBuf::from("/out/folder/bar-test.lua"))
        );
        assert_eq!(dashed_output_path(Path::new("/out/main.lua")), None);
        assert_eq!(dashed_output_path(Path::new("/out/data.test.json")), None);
        assert_eq!(dashed_output_path(Path::new("/out.dir/main.lua")), None);
    }

    #[test]
    fn test_normalize_only_touches_lua_names() {
        let mut files = vec![
            OutputFile {
                source_file: Some("/src/a.spec.ts".to_string()),
                output_path: PathBuf::from("/out/a.spec.lua"),
                code: String::new(),
            },
            OutputFile {
                source_file: None,
                output_path: PathBuf::from("/out/lualib_bundle.lua"),
                code: String::new(),
            },
        ];
        normalize_output_paths(&mut files);
        assert_eq!(files[0].output_path, PathBuf::from("/out/a-spec.lua"));
        assert_eq!(files[1].output_path, PathBuf::from("/out/lualib_bundle.lua"));
    }
}
