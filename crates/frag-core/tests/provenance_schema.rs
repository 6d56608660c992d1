use frag_core::{RunProvenance, SchemaVersion};

#[test]
fn schema_versions_print_dotted() {
    assert_eq!(SchemaVersion::default().to_string(), "1.0.0");
    assert_eq!(SchemaVersion::new(2, 3, 1).to_string(), "2.3.1");
}

#[test]
fn readers_accept_older_minor_versions_only() {
    let reader = SchemaVersion::new(1, 2, 0);
    assert!(reader.reads(&SchemaVersion::new(1, 0, 4)));
    assert!(reader.reads(&SchemaVersion::new(1, 2, 9)));
    assert!(!reader.reads(&SchemaVersion::new(1, 3, 0)));
    assert!(!reader.reads(&SchemaVersion::new(2, 0, 0)));
}

#[test]
fn provenance_collects_tool_versions() {
    let provenance = RunProvenance::new("abc", 9, "toy-string")
        .with_tool("frag-ana", "0.1.0")
        .with_tool("frag-gen", "0.1.0");
    assert_eq!(provenance.seed, 9);
    assert_eq!(provenance.tool_versions.len(), 2);
    let json = serde_json::to_string(&provenance).expect("json");
    let decoded: RunProvenance = serde_json::from_str(&json).expect("decode");
    assert_eq!(decoded, provenance);
}
