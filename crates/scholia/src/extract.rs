//! Corpus extraction: flattening annotation directories into record sets.
//!
//! Extraction walks a directory of AI2D annotation files and turns every
//! relationship into a [`RelationRecord`] ready for rhetorical annotation.
//! Files are visited in path order and relationships keep their file order,
//! so repeated runs over the same corpus produce the same record set.
//!
//! `arrowHeadTail` relationships pair an arrow with its head and carry no
//! rhetorical content; [`ExtractConfig`](crate::config::ExtractConfig) can
//! drop them up front.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};

use scholia_parser::ai2d::Annotation;

use crate::{config::ExtractConfig, error::ScholiaError, record::RelationRecord};

/// Walk `root` recursively and flatten every annotation file into records.
///
/// Only files with a `.json` extension are read; anything else in the
/// directory tree is ignored. A file that fails to parse aborts the run.
///
/// # Examples
///
/// ```no_run
/// use scholia::config::ExtractConfig;
/// use scholia::extract::extract_records;
///
/// let config = ExtractConfig::default();
/// let records = extract_records("ai2d/annotations", &config)?;
/// println!("{} records", records.len());
/// # Ok::<(), scholia::error::ScholiaError>(())
/// ```
pub fn extract_records(
    root: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<Vec<RelationRecord>, ScholiaError> {
    let root = root.as_ref();
    let mut paths = Vec::new();
    collect_annotation_paths(root, &mut paths)?;
    paths.sort();

    let mut records = Vec::new();
    for path in &paths {
        let annotation = Annotation::from_path(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let flattened = flatten_annotation(&file_name, &annotation, config);
        debug!(file = file_name, records = flattened.len(); "Flattened annotation file");
        records.extend(flattened);
    }

    info!(
        path = root.display().to_string(),
        files = paths.len(),
        records = records.len();
        "Extracted relation records"
    );
    Ok(records)
}

/// Flatten the relationships of one annotation file, in file order.
pub fn flatten_annotation(
    file_name: &str,
    annotation: &Annotation,
    config: &ExtractConfig,
) -> Vec<RelationRecord> {
    annotation
        .relationships()
        .values()
        .filter(|relationship| {
            !(config.skip_arrow_head_tail() && relationship.category().is_arrow_head_tail())
        })
        .map(|relationship| RelationRecord::from_relationship(file_name, relationship, annotation))
        .collect()
}

fn collect_annotation_paths(dir: &Path, paths: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_annotation_paths(&path, paths)?;
        } else if path.extension().is_some_and(|extension| extension == "json") {
            paths.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use scholia_core::identifier::Id;

    use super::*;

    const FIRST: &str = r#"{
        "blobs": {"B0": {"id": "B0", "polygon": [[0, 0], [8, 0], [4, 6]]}},
        "text": {"T0": {"id": "T0", "rectangle": [[10, 0], [16, 2]], "value": "stem"}},
        "arrows": {"A0": {"id": "A0", "polygon": [[1, 8], [2, 12]]}},
        "arrowHeads": {"AH0": {"id": "AH0", "rectangle": [[2, 12], [3, 13]]}},
        "relationships": {
            "R0": {"id": "R0", "category": "arrowHeadTail",
                   "origin": "A0", "destination": "AH0"},
            "R1": {"id": "R1", "category": "intraObjectLabel",
                   "origin": "T0", "destination": "B0"}
        }
    }"#;

    const SECOND: &str = r#"{
        "blobs": {
            "B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]},
            "B1": {"id": "B1", "polygon": [[6, 0], [10, 0], [8, 3]]}
        },
        "arrows": {"A0": {"id": "A0", "polygon": [[4, 1], [6, 1]]}},
        "relationships": {
            "R0": {"id": "R0", "category": "interObjectLinkage",
                   "origin": "B0", "destination": "B1", "connector": "A0",
                   "hasDirectionality": true}
        }
    }"#;

    fn write_corpus(dir: &Path) {
        let nested = dir.join("batch");
        fs::create_dir(&nested).unwrap();

        let mut a = fs::File::create(dir.join("2.png.json")).unwrap();
        a.write_all(SECOND.as_bytes()).unwrap();
        let mut b = fs::File::create(nested.join("1.png.json")).unwrap();
        b.write_all(FIRST.as_bytes()).unwrap();
        // Non-annotation files are ignored
        fs::write(dir.join("notes.txt"), "scratch").unwrap();
    }

    #[test]
    fn test_extract_visits_files_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let records = extract_records(dir.path(), &ExtractConfig::default()).unwrap();

        let files: Vec<&str> = records.iter().map(RelationRecord::file_name).collect();
        // "2.png.json" sits at the root, "1.png.json" under batch/; paths
        // sort component-wise, so the root file comes first.
        assert_eq!(files, ["2.png.json", "1.png.json", "1.png.json"]);
    }

    #[test]
    fn test_extract_flattens_relationship_fields() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let records = extract_records(dir.path(), &ExtractConfig::default()).unwrap();

        let linkage = &records[0];
        assert_eq!(linkage.relation_id(), Id::from("R0"));
        assert_eq!(linkage.connector(), Some("A0".into()));
        assert!(linkage.has_directionality());
        assert_eq!(linkage.outlines().len(), 3);

        let label = records
            .iter()
            .find(|record| record.relation_id() == Id::from("R1"))
            .unwrap();
        assert_eq!(label.origin(), Id::from("T0"));
        assert_eq!(label.destination(), Id::from("B0"));
        assert!(label.connector().is_none());
    }

    #[test]
    fn test_extract_skips_arrow_head_tail_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let all = extract_records(dir.path(), &ExtractConfig::default()).unwrap();
        assert_eq!(all.len(), 3);

        let kept = extract_records(dir.path(), &ExtractConfig::new(true)).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(
            kept.iter()
                .all(|record| !record.category().is_arrow_head_tail())
        );
    }

    #[test]
    fn test_extract_fails_on_malformed_annotation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.png.json"), "{\"blobs\": [").unwrap();

        let result = extract_records(dir.path(), &ExtractConfig::default());
        assert!(matches!(result, Err(ScholiaError::Ai2d(_))));
    }

    #[test]
    fn test_extract_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let result = extract_records(&missing, &ExtractConfig::default());
        assert!(matches!(result, Err(ScholiaError::Io(_))));
    }
}
