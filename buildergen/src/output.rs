//! Output sink for generated builders.
//!
//! The builder is written to a temporary sibling first and renamed over the
//! destination, so a failed run never leaves a truncated file behind.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;

use crate::emit::GeneratedSource;
use crate::error::BuildergenError;
use crate::fs_helpers::{ensure_dir, split_parent};

/// Writes `source` to `out_dir/file_name`, creating directories as needed.
///
/// `file_name` may itself contain directory components.
///
/// # Errors
///
/// Returns [`BuildergenError::Io`] when a directory cannot be created or
/// the file cannot be written.
pub fn write_generated(
    out_dir: &Utf8Path,
    file_name: &str,
    source: &GeneratedSource,
) -> Result<Utf8PathBuf, BuildergenError> {
    let target = out_dir.join(file_name);
    let (parent, name) = split_parent(&target)?;
    let dir = ensure_dir(&parent)?;
    let temp_name = format!(".{name}.buildergen-tmp");

    if let Err(err) = write_file(&dir, &temp_name, source.as_str()) {
        discard_temp(&dir, &temp_name);
        return Err(BuildergenError::Io {
            path: parent.join(&temp_name),
            source: err,
        });
    }
    dir.rename(&temp_name, &dir, name)
        .map_err(|io_err| {
            discard_temp(&dir, &temp_name);
            BuildergenError::Io {
                path: target.clone(),
                source: io_err,
            }
        })?;

    tracing::info!(path = %target, "wrote builder");
    Ok(target)
}

fn write_file(dir: &Dir, name: &str, content: &str) -> std::io::Result<()> {
    let mut file = dir.open_with(
        name,
        OpenOptions::new().write(true).create(true).truncate(true),
    )?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

fn discard_temp(dir: &Dir, name: &str) {
    if let Err(err) = dir.remove_file(name) {
        tracing::debug!(%name, %err, "temporary builder file was not removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{BuilderPlan, ResolvedImports, emit_builder};
    use crate::fields::FieldDescriptor;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn source() -> GeneratedSource {
        let fields = vec![FieldDescriptor {
            name: "id".to_owned(),
            type_text: "int".to_owned(),
        }];
        let imports = ResolvedImports::default();
        emit_builder(&BuilderPlan {
            package: "model",
            type_name: "Item",
            fields: &fields,
            imports: &imports,
        })
    }

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    #[rstest]
    fn creates_missing_directories(source: GeneratedSource) {
        let temp = tempfile::tempdir().expect("temp dir");
        let out_dir = utf8(&temp).join("nested").join("model");

        let path = write_generated(&out_dir, "builder.go", &source).expect("write builder");

        assert_eq!(path, out_dir.join("builder.go"));
        let written = std::fs::read_to_string(&path).expect("read builder");
        assert_eq!(written, source.as_str());
    }

    #[rstest]
    fn truncates_existing_file(source: GeneratedSource) {
        let temp = tempfile::tempdir().expect("temp dir");
        let out_dir = utf8(&temp);
        std::fs::write(out_dir.join("builder.go"), "x".repeat(4096)).expect("seed file");

        write_generated(&out_dir, "builder.go", &source).expect("write builder");

        let written = std::fs::read_to_string(out_dir.join("builder.go")).expect("read builder");
        assert_eq!(written, source.as_str());
    }

    #[rstest]
    fn leaves_no_temporary_files(source: GeneratedSource) {
        let temp = tempfile::tempdir().expect("temp dir");
        let out_dir = utf8(&temp);

        write_generated(&out_dir, "item_builder.go", &source).expect("write builder");

        let names: Vec<_> = std::fs::read_dir(&out_dir)
            .expect("list dir")
            .map(|entry| entry.expect("dir entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("item_builder.go")]);
    }

    #[rstest]
    fn output_name_may_contain_subdirectories(source: GeneratedSource) {
        let temp = tempfile::tempdir().expect("temp dir");
        let out_dir = utf8(&temp);

        let path = write_generated(&out_dir, "gen/item_builder.go", &source).expect("write builder");

        assert_eq!(path, out_dir.join("gen/item_builder.go"));
        assert!(path.is_file());
    }
}
