//! Integration test: full recovery runs over a temp-dir corpus
//!
//! Exercises the pipeline end to end with a scripted operator: precondition
//! checking, digest loading, bound derivation, brute force, and the
//! accept/reject assignment loop, asserting on exit classification and
//! artifact contents only.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use pixleak_core::config::PixleakConfig;
use pixleak_core::{digest_header, PixleakError};
use pixleak_recover::{pipeline, ScriptedOperator};

struct Corpus {
    _tmp: TempDir,
    input: PathBuf,
    digest_file: PathBuf,
    output: PathBuf,
}

/// Lay out an input directory of ciphertext files and a digest list built
/// from the given true headers.
fn make_corpus(files: &[(&str, &[u8])], headers: &[&[u8]]) -> Corpus {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input");
    let output = tmp.path().join("output");
    std::fs::create_dir(&input).unwrap();

    for (name, content) in files {
        std::fs::write(input.join(name), content).unwrap();
    }

    let digest_file = tmp.path().join("digests.txt");
    let lines: Vec<String> = headers
        .iter()
        .map(|h| digest_header(h).to_string())
        .collect();
    std::fs::write(&digest_file, lines.join("\n") + "\n").unwrap();

    Corpus {
        _tmp: tmp,
        input,
        digest_file,
        output,
    }
}

fn artifact_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn end_to_end_accept_first_reject_rest() {
    // a.enc is 36 bytes -> bound = ceil(sqrt(36/3)) * 2 = 8, above both
    // true widths/heights
    let a_body = [0xAAu8; 36];
    let b_body = [0xBBu8; 30];
    let corpus = make_corpus(
        &[("a.enc", &a_body), ("b.enc", &b_body)],
        &[b"P6 4 3 255", b"P6 5 2 255"],
    );

    // accept the first candidate shown for a.enc, reject everything after
    let mut operator = ScriptedOperator::new([true, false, false]);
    let summary = pipeline::run(
        &corpus.input,
        &corpus.digest_file,
        &corpus.output,
        &PixleakConfig::default(),
        &mut operator,
        None,
    )
    .unwrap();

    assert_eq!(summary.files, 2);
    assert_eq!(summary.recovered, 2);
    assert_eq!(summary.accepted.len(), 1);
    assert_eq!(summary.unresolved.len(), 1);
    assert!(!summary.unresolved.contains(&summary.accepted[0].digest));

    // exactly one artifact, belonging to a.enc
    let names = artifact_names(&corpus.output);
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("a.enc."));

    // artifact = recovered header + single space + untouched ciphertext
    let artifact = std::fs::read(&summary.accepted[0].artifact).unwrap();
    assert!(artifact.ends_with(&a_body));
    let header = &artifact[..artifact.len() - a_body.len() - 1];
    assert_eq!(artifact[header.len()], b' ');
    assert_eq!(
        digest_header(header),
        summary.accepted[0].digest,
        "persisted header must hash back to the accepted digest"
    );
}

#[test]
fn reject_everything_is_a_clean_run() {
    let corpus = make_corpus(&[("a.enc", &[0u8; 27])], &[b"P6 3 3 255"]);

    let mut operator = ScriptedOperator::new([]);
    let summary = pipeline::run(
        &corpus.input,
        &corpus.digest_file,
        &corpus.output,
        &PixleakConfig::default(),
        &mut operator,
        None,
    )
    .unwrap();

    // unresolved files and digests are expected outcomes, not errors
    assert!(summary.accepted.is_empty());
    assert_eq!(summary.unresolved.len(), 1);
    assert_eq!(artifact_names(&corpus.output).len(), 0);
}

#[test]
fn count_mismatch_is_a_precondition_failure() {
    let corpus = make_corpus(
        &[("a.enc", &[0u8; 27]), ("b.enc", &[0u8; 27])],
        &[b"P6 3 3 255"],
    );

    let mut operator = ScriptedOperator::new([]);
    let err = pipeline::run(
        &corpus.input,
        &corpus.digest_file,
        &corpus.output,
        &PixleakConfig::default(),
        &mut operator,
        None,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PixleakError>(),
        Some(PixleakError::Precondition(_))
    ));
    // failed before any artifact work
    assert!(!corpus.output.exists());
}

#[test]
fn exhausted_search_is_not_found() {
    let corpus = make_corpus(&[("a.enc", &[0u8; 27])], &[b"P6 50 50 255"]);

    let mut config = PixleakConfig::default();
    config.search.bound = Some(5);

    let mut operator = ScriptedOperator::new([]);
    let err = pipeline::run(
        &corpus.input,
        &corpus.digest_file,
        &corpus.output,
        &config,
        &mut operator,
        None,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PixleakError>(),
        Some(PixleakError::NotFound)
    ));
}

#[test]
fn matched_counts_with_duplicate_digests_still_run() {
    // two images with identical headers publish identical digest lines;
    // they collapse into one pending digest but the counts still match
    let corpus = make_corpus(
        &[("a.enc", &[1u8; 27]), ("b.enc", &[2u8; 27])],
        &[b"P6 3 3 255", b"P6 3 3 255"],
    );

    let mut operator = ScriptedOperator::new([true]);
    let summary = pipeline::run(
        &corpus.input,
        &corpus.digest_file,
        &corpus.output,
        &PixleakConfig::default(),
        &mut operator,
        None,
    )
    .unwrap();

    // the collapsed digest can only resolve one of the two files
    assert_eq!(summary.accepted.len(), 1);
    assert!(summary.unresolved.is_empty());
}
