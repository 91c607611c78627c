use std::io::Write;
use std::path::Path;

use fab_core::manifest::FabManifest;
use fab_resolver::graph::DependencyTree;
use fab_resolver::imports::{collect_imports, render_header, ImportClause};
use fab_resolver::index::DependencyIndex;
use fab_resolver::resolver::PackageResolver;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_jar(path: &Path, entries: &[(&str, &str)]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut jar = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
    for (name, content) in entries {
        jar.start_file(*name, SimpleFileOptions::default()).unwrap();
        jar.write_all(content.as_bytes()).unwrap();
    }
    jar.finish().unwrap();
}

const DESCRIPTOR: &str = r#"
[project]
coordinate = "com.example:app:1.0.0"
packages = ["com.example.app"]

[instructions]
"FAB-Version-Range-Digits" = "2"
"FAB-Include-Optional-Dependency" = "org.forced:*"

[[dependency]]
coordinate = "org.acme:acme-bundle:3.0.0"
jar = "lib/acme-bundle.jar"

[[dependency]]
coordinate = "org.acme:acme-plain:1.8.2"
jar = "lib/acme-plain.jar"
optional = true

[[dependency]]
coordinate = "org.acme:acme-transitive:0.4"
parent = "org.acme:acme-plain"
packages = ["com.acme.transitive"]

[[dependency]]
coordinate = "org.forced:forced:2.2.2"
optional = true
packages = ["com.forced"]

[[dependency]]
coordinate = "org.inline:inline:1.0"
shared = false
packages = ["com.inline"]

[[dependency]]
coordinate = "org.broken:broken:1.0"
jar = "lib/missing.jar"
"#;

fn project() -> (TempDir, FabManifest, DependencyTree) {
    let tmp = TempDir::new().unwrap();
    write_jar(
        &tmp.path().join("lib/acme-bundle.jar"),
        &[
            (
                "META-INF/MANIFEST.MF",
                "Manifest-Version: 1.0\r\nBundle-SymbolicName: org.acme.bundle\r\nExport-Package: com.acme.api;version=\"2.7.1\"\r\n",
            ),
            ("com/acme/api/Api.class", ""),
            ("com/acme/impl/Impl.class", ""),
        ],
    );
    write_jar(
        &tmp.path().join("lib/acme-plain.jar"),
        &[("com/acme/plain/Plain.class", "")],
    );
    let manifest = FabManifest::parse_toml(DESCRIPTOR).unwrap();
    let tree = DependencyTree::from_manifest(&manifest, tmp.path()).unwrap();
    (tmp, manifest, tree)
}

#[test]
fn tree_is_built_from_descriptor() {
    let (_tmp, _manifest, tree) = project();
    assert_eq!(tree.len(), 6);

    let bundle = tree.node(tree.find("acme-bundle").unwrap());
    assert!(bundle.is_bundle());
    let plain = tree.node(tree.find("org.acme:acme-plain").unwrap());
    assert!(!plain.is_bundle());

    let transitive = tree.node(tree.find("acme-transitive").unwrap());
    assert!(transitive.is_this_or_ancestor_optional());

    let shared: Vec<String> = tree
        .shared_dependencies()
        .iter()
        .map(|n| n.coordinate().artifact_id.clone())
        .collect();
    assert!(!shared.contains(&"inline".to_string()));
    assert_eq!(shared.len(), 5);
}

#[test]
fn resolves_against_jars_and_instructions() {
    let (_tmp, manifest, tree) = project();
    let instructions = manifest.instructions();
    let index = DependencyIndex::from_tree(
        &tree,
        instructions.optional_dependency_filter().unwrap(),
    );
    let resolver = PackageResolver::from_instructions(&index, &instructions);

    // bundle export version, two digits
    assert_eq!(
        resolver.resolve_import_package_version("com.acme.api").unwrap(),
        Some("[2.7.0,2.8.0)".to_string())
    );
    // bundle package without export entry falls back to the bundle version
    assert_eq!(
        resolver.resolve_import_package_version("com.acme.impl").unwrap(),
        Some("[3.0.0,3.1.0)".to_string())
    );
    assert_eq!(
        resolver.resolve_import_package_version("com.acme.plain").unwrap(),
        Some("[1.8.0,1.9.0)".to_string())
    );
    // inline dependencies are not import candidates
    assert_eq!(resolver.resolve_import_package_version("com.inline").unwrap(), None);

    assert!(resolver.is_package_optional("com.acme.plain"));
    assert!(resolver.is_package_optional("com.acme.transitive"));
    assert!(!resolver.is_package_optional("com.forced"));
    assert!(!resolver.is_package_optional("com.acme.api"));
}

#[test]
fn import_clauses_for_a_bundle() {
    let (_tmp, manifest, tree) = project();
    let instructions = manifest.instructions();
    let index = DependencyIndex::from_tree(
        &tree,
        instructions.optional_dependency_filter().unwrap(),
    );
    let resolver = PackageResolver::from_instructions(&index, &instructions);

    let clauses = collect_imports(
        &resolver,
        ["com.acme.api", "com.acme.plain", "com.acme.api", "javax.unknown"],
    )
    .unwrap();
    assert_eq!(clauses.len(), 3);
    assert_eq!(
        clauses[2],
        ImportClause {
            package: "javax.unknown".to_string(),
            version: None,
            optional: true,
        }
    );
    assert_eq!(
        render_header(&clauses),
        "com.acme.api;version=\"[2.7.0,2.8.0)\",com.acme.plain;version=\"[1.8.0,1.9.0)\";resolution:=optional,javax.unknown;resolution:=optional"
    );

    let json = serde_json::to_value(&clauses[0]).unwrap();
    assert_eq!(json["package"], "com.acme.api");
    assert_eq!(json["version"], "[2.7.0,2.8.0)");
    assert_eq!(json["optional"], false);
}

#[test]
fn split_packages_are_reported() {
    let (_tmp, manifest, _tree) = project();
    let mut manifest = manifest;
    let mut dup = manifest.dependencies[3].clone();
    dup.artifact.coordinate = "org.fork:forked:9.0".to_string();
    dup.optional = false;
    manifest.dependencies.push(dup);

    let tmp = TempDir::new().unwrap();
    let tree = DependencyTree::from_manifest(&manifest, tmp.path()).unwrap();
    let index = DependencyIndex::from_tree(&tree, Default::default());
    let report = index.split_packages();
    assert_eq!(report.len(), 1);
    assert_eq!(report.packages[0].package, "com.forced");
    assert_eq!(report.packages[0].winner, "org.forced:forced:2.2.2");
    assert_eq!(report.packages[0].shadowed, vec!["org.fork:forked:9.0"]);
}

#[test]
fn bad_parent_reference_is_rejected() {
    let manifest = FabManifest::parse_toml(
        r#"
[project]
coordinate = "com.example:app:1.0.0"

[[dependency]]
coordinate = "org.a:a:1.0"
parent = "org.b:b"

[[dependency]]
coordinate = "org.b:b:1.0"
"#,
    )
    .unwrap();
    let tmp = TempDir::new().unwrap();
    assert!(DependencyTree::from_manifest(&manifest, tmp.path()).is_err());
}

#[test]
fn bad_coordinate_is_rejected() {
    let manifest = FabManifest::parse_toml(
        r#"
[project]
coordinate = "not-a-coordinate"
"#,
    )
    .unwrap();
    let tmp = TempDir::new().unwrap();
    let err = DependencyTree::from_manifest(&manifest, tmp.path()).unwrap_err();
    assert!(err.to_string().contains("not-a-coordinate"), "got: {err}");
}
