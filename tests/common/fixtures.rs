//! Artifact zips and API payloads

use artifact_dl::targets::ExpectedArtifact;
use std::io::{Cursor, Write};

/// Version used for destination filenames in the tests
pub const TEST_VERSION: &str = "3.0.2";

/// Build a zip with the given entries in order, stored uncompressed
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// An entry name that the artifact's pattern accepts
pub fn matching_entry(artifact: &ExpectedArtifact) -> String {
    artifact.pattern.replace(".*", "3.0.2-1")
}

/// Package contents unique to the artifact, so mixups show up
pub fn package_content(artifact: &ExpectedArtifact) -> Vec<u8> {
    format!("package for {}", artifact.name).into_bytes()
}

/// The zip a healthy build job uploads: a log, then the package
pub fn package_zip(artifact: &ExpectedArtifact) -> Vec<u8> {
    let entry = matching_entry(artifact);
    let content = package_content(artifact);
    zip_bytes(&[("build.log", b"ok"), (entry.as_str(), content.as_slice())])
}

/// Artifact listing body as returned by the GitHub API
pub fn artifact_listing(artifacts: &[(&str, String)]) -> serde_json::Value {
    let items: Vec<_> = artifacts
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            serde_json::json!({
                "id": i + 1,
                "name": name,
                "size_in_bytes": 1024,
                "archive_download_url": url,
                "expired": false,
            })
        })
        .collect();
    serde_json::json!({
        "total_count": items.len(),
        "artifacts": items,
    })
}
