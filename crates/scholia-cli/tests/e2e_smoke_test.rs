use std::fs;

use tempfile::tempdir;

use scholia_cli::{Args, Command, RunOutcome, run};

const ANNOTATION: &str = r#"{
    "blobs": {
        "B0": {"id": "B0", "polygon": [[10, 10], [60, 12], [40, 50]]},
        "B1": {"id": "B1", "polygon": [[100, 100], [160, 110], [140, 150]]}
    },
    "text": {
        "T0": {"id": "T0", "rectangle": [[70, 14], [120, 30]], "value": "stratus"}
    },
    "arrows": {
        "A0": {"id": "A0", "polygon": [[60, 40], [95, 95]]}
    },
    "arrowHeads": {
        "AH0": {"id": "AH0", "rectangle": [[92, 92], [100, 100]]}
    },
    "relationships": {
        "R0": {"id": "R0", "category": "arrowHeadTail",
               "origin": "A0", "destination": "AH0"},
        "R1": {"id": "R1", "category": "intraObjectLabel",
               "origin": "T0", "destination": "B0"},
        "R2": {"id": "R2", "category": "interObjectLinkage",
               "origin": "B0", "destination": "B1", "connector": "A0",
               "hasDirectionality": true}
    }
}"#;

const SCHEME: &str = "\
# Annotation scheme

## Semantic relations

| Relation | Roles assigned | Notes |
| --- | --- | --- |
| restatement | both elements = nucleus | symmetric equivalence |
| identification | satellite = identifying label; nucleus = identified element | asymmetric |
| effect | satellite = cause; nucleus = affected element | asymmetric |
| sequence | both elements = nucleus | temporal/spatial ordering, symmetric roles |
| property-ascription | satellite = property source; nucleus = described element | asymmetric |
| title | satellite = title; nucleus = titled diagram/part | asymmetric |
| none | unassigned / flags invalid pair | excluded from final corpus |
";

const RECORDS_CLEAN: &str = concat!(
    r#"{"file_name":"0.png.json","relation_id":"R1","category":"intraObjectLabel","origin":"T0","destination":"B0"}"#,
    "\n",
    r#"{"file_name":"0.png.json","relation_id":"R2","category":"interObjectLinkage","origin":"B0","destination":"B1","connector":"A0","directionality":true,"judgement":{"relation":"identification","origin_role":"satellite","destination_role":"nucleus"}}"#,
    "\n",
);

const RECORDS_VIOLATING: &str = concat!(
    r#"{"file_name":"0.png.json","relation_id":"R1","category":"intraObjectLabel","origin":"T0","destination":"B0","judgement":{"relation":"sequence","origin_role":"satellite","destination_role":"nucleus"}}"#,
    "\n",
);

fn args(command: Command) -> Args {
    Args {
        command,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_extract_writes_record_set() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let annotations = temp_dir.path().join("annotations");
    fs::create_dir(&annotations).unwrap();
    fs::write(annotations.join("0.png.json"), ANNOTATION).unwrap();

    let output = temp_dir.path().join("records.jsonl");
    let args = args(Command::Extract {
        annotations: annotations.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);

    // One record per relationship, arrowHeadTail included by default
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(written.contains(r#""category":"arrowHeadTail""#));
}

#[test]
fn e2e_extract_respects_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let annotations = temp_dir.path().join("annotations");
    fs::create_dir(&annotations).unwrap();
    fs::write(annotations.join("0.png.json"), ANNOTATION).unwrap();

    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[extract]\nskip_arrow_head_tail = true\n").unwrap();

    let output = temp_dir.path().join("records.jsonl");
    let args = Args {
        command: Command::Extract {
            annotations: annotations.to_string_lossy().to_string(),
            output: output.to_string_lossy().to_string(),
        },
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    };

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(!written.contains(r#""category":"arrowHeadTail""#));
}

#[test]
fn e2e_extract_missing_directory_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let args = args(Command::Extract {
        annotations: temp_dir
            .path()
            .join("no-such-dir")
            .to_string_lossy()
            .to_string(),
        output: temp_dir
            .path()
            .join("records.jsonl")
            .to_string_lossy()
            .to_string(),
    });

    assert!(run(&args).is_err());
}

#[test]
fn e2e_missing_config_file_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let args = Args {
        command: Command::Stats {
            records: temp_dir
                .path()
                .join("records.jsonl")
                .to_string_lossy()
                .to_string(),
        },
        config: Some(
            temp_dir
                .path()
                .join("no-such-config.toml")
                .to_string_lossy()
                .to_string(),
        ),
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err());
}

#[test]
fn e2e_graph_writes_dot() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("0.png.json");
    fs::write(&input, ANNOTATION).unwrap();

    let output = temp_dir.path().join("out.dot");
    let args = args(Command::Graph {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        arrowheads: false,
        no_edges: false,
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);

    let dot = fs::read_to_string(&output).unwrap();
    assert!(dot.starts_with("graph elements {"));
    assert!(dot.contains(r#""B0" [label="B0", fillcolor="orangered"];"#));
    assert!(dot.contains(r#""T0" -- "B0";"#));
    // The interObjectLinkage edge routes through its connector arrow and
    // lands on the arrow's paired head, which re-enters the graph even
    // though arrowheads are off.
    assert!(dot.contains(r#""B0" -- "A0";"#));
    assert!(dot.contains(r#""AH0" -- "B1";"#));
    assert!(dot.contains(r#""AH0" [label="AH0", fillcolor="darkorange"];"#));
}

#[test]
fn e2e_graph_arrowheads_flag() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("0.png.json");
    fs::write(&input, ANNOTATION).unwrap();

    let output = temp_dir.path().join("out.dot");
    let args = args(Command::Graph {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        arrowheads: true,
        no_edges: true,
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);

    // With edges suppressed, only the flag can bring the head in.
    let dot = fs::read_to_string(&output).unwrap();
    assert!(dot.contains(r#""AH0" [label="AH0", fillcolor="darkorange"];"#));
}

#[test]
fn e2e_graph_no_edges_flag() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("0.png.json");
    fs::write(&input, ANNOTATION).unwrap();

    let output = temp_dir.path().join("out.dot");
    let args = args(Command::Graph {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        arrowheads: false,
        no_edges: true,
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);

    let dot = fs::read_to_string(&output).unwrap();
    assert!(dot.contains(r#""B0" [label="B0", fillcolor="orangered"];"#));
    assert!(!dot.contains("--"));
    // No edges means nothing pulls the excluded arrowhead back in.
    assert!(!dot.contains("AH0"));
}

#[test]
fn e2e_graph_rejects_malformed_annotation() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.json");
    fs::write(&input, "{ not valid json").unwrap();

    let args = args(Command::Graph {
        input: input.to_string_lossy().to_string(),
        output: temp_dir.path().join("out.dot").to_string_lossy().to_string(),
        arrowheads: false,
        no_edges: false,
    });

    assert!(run(&args).is_err());
}

#[test]
fn e2e_check_accepts_consistent_document() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let doc = temp_dir.path().join("scheme.md");
    fs::write(&doc, SCHEME).unwrap();

    let args = args(Command::Check {
        documents: vec![doc.to_string_lossy().to_string()],
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);
}

#[test]
fn e2e_check_reports_unknown_label() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let doc = temp_dir.path().join("scheme.md");
    fs::write(
        &doc,
        "| Relation | Roles assigned |\n\
         | --- | --- |\n\
         | elaboration | satellite = detail; nucleus = claim |\n",
    )
    .unwrap();

    let args = args(Command::Check {
        documents: vec![doc.to_string_lossy().to_string()],
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::FindingsReported);
}

#[test]
fn e2e_check_reports_divergent_copies() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let first = temp_dir.path().join("scheme.md");
    let second = temp_dir.path().join("copy.md");
    fs::write(&first, SCHEME).unwrap();
    fs::write(
        &second,
        SCHEME.replace("satellite = title", "satellite = caption"),
    )
    .unwrap();

    let args = args(Command::Check {
        documents: vec![
            first.to_string_lossy().to_string(),
            second.to_string_lossy().to_string(),
        ],
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::FindingsReported);
}

#[test]
fn e2e_check_missing_document_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let args = args(Command::Check {
        documents: vec![
            temp_dir
                .path()
                .join("no-such-scheme.md")
                .to_string_lossy()
                .to_string(),
        ],
    });

    assert!(run(&args).is_err());
}

#[test]
fn e2e_validate_clean_records() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let records = temp_dir.path().join("records.jsonl");
    fs::write(&records, RECORDS_CLEAN).unwrap();

    let args = args(Command::Validate {
        records: records.to_string_lossy().to_string(),
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);
}

#[test]
fn e2e_validate_reports_role_violations() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let records = temp_dir.path().join("records.jsonl");
    fs::write(&records, RECORDS_VIOLATING).unwrap();

    let args = args(Command::Validate {
        records: records.to_string_lossy().to_string(),
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::FindingsReported);
}

#[test]
fn e2e_validate_rejects_malformed_record_set() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let records = temp_dir.path().join("records.jsonl");
    fs::write(&records, "not a record\n").unwrap();

    let args = args(Command::Validate {
        records: records.to_string_lossy().to_string(),
    });

    assert!(run(&args).is_err());
}

#[test]
fn e2e_stats_summarises_records() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let records = temp_dir.path().join("records.jsonl");
    fs::write(&records, RECORDS_CLEAN).unwrap();

    let args = args(Command::Stats {
        records: records.to_string_lossy().to_string(),
    });

    assert_eq!(run(&args).unwrap(), RunOutcome::Clean);
}

#[test]
fn e2e_extract_then_validate_round_trip() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let annotations = temp_dir.path().join("annotations");
    fs::create_dir(&annotations).unwrap();
    fs::write(annotations.join("0.png.json"), ANNOTATION).unwrap();
    fs::write(annotations.join("1.png.json"), ANNOTATION).unwrap();

    let output = temp_dir.path().join("records.jsonl");
    let extract = args(Command::Extract {
        annotations: annotations.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
    });
    assert_eq!(run(&extract).unwrap(), RunOutcome::Clean);

    // Freshly extracted records carry no judgements yet, so validation
    // has nothing to flag
    let validate = args(Command::Validate {
        records: output.to_string_lossy().to_string(),
    });
    assert_eq!(run(&validate).unwrap(), RunOutcome::Clean);

    let stats = args(Command::Stats {
        records: output.to_string_lossy().to_string(),
    });
    assert_eq!(run(&stats).unwrap(), RunOutcome::Clean);
}
