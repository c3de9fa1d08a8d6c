//! Integration tests for delazy


use harness::{APP_WITH_LEFTOVER, SAMPLE_LAZY_COMPONENTS, TestRepo, run_delazy, sample_app};
use std::fs;

#[test]
fn test_default_path_rewritten_in_place() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", &sample_app());

    let (stdout, stderr, success) = run_delazy(repo.path(), &[]);
    assert!(success, "delazy should succeed: {}", stderr);
    assert!(
        stdout.starts_with("Rewrote 11 lazy import(s) in src/App.tsx"),
        "unexpected summary: {}",
        stdout
    );

    let text = fs::read_to_string(&app).unwrap();
    for (binding, module, export) in SAMPLE_LAZY_COMPONENTS {
        let expected = if binding == export {
            format!("import {{ {} }} from '{}';", export, module)
        } else {
            format!("import {{ {} as {} }} from '{}';", export, binding, module)
        };
        assert!(text.contains(&expected), "missing `{}` in:\n{}", expected, text);
    }
    assert!(!text.contains("lazy"), "loader should be gone:\n{}", text);
    assert!(text.starts_with("import { useState, useEffect, Suspense } from 'react';\n"));
}

#[test]
fn test_duplicate_import_removed() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", &sample_app());

    let (stdout, _stderr, success) = run_delazy(repo.path(), &[]);
    assert!(success);
    assert!(stdout.contains("Removed 1 duplicate import(s)"), "{}", stdout);

    let text = fs::read_to_string(&app).unwrap();
    assert_eq!(
        text.matches("import { AccessDenied } from './components/AccessDenied';")
            .count(),
        1
    );
}

#[test]
fn test_explicit_path_and_output() {
    let repo = TestRepo::new();
    let app = repo.add_file("web/Root.tsx", &sample_app());

    let (_stdout, stderr, success) =
        run_delazy(repo.path(), &["web/Root.tsx", "-o", "web/Root.eager.tsx"]);
    assert!(success, "{}", stderr);
    assert_eq!(fs::read_to_string(&app).unwrap(), sample_app());

    let eager = fs::read_to_string(repo.path().join("web/Root.eager.tsx")).unwrap();
    assert!(eager.contains("import { Analytics } from './components/Analytics';"));
}

#[test]
fn test_second_run_is_a_no_op() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", &sample_app());

    let (_stdout, _stderr, success) = run_delazy(repo.path(), &[]);
    assert!(success);
    let first = fs::read_to_string(&app).unwrap();

    let (stdout, _stderr, success) = run_delazy(repo.path(), &[]);
    assert!(success);
    assert!(stdout.contains("No lazy imports found"), "{}", stdout);
    assert_eq!(fs::read_to_string(&app).unwrap(), first);
}

#[test]
fn test_dry_run() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", &sample_app());

    let (stdout, _stderr, success) = run_delazy(repo.path(), &["--dry-run"]);
    assert!(success);
    assert!(stdout.starts_with("Would rewrite 11 lazy import(s)"), "{}", stdout);
    assert_eq!(fs::read_to_string(&app).unwrap(), sample_app());
}

#[test]
fn test_stdout_mode() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", &sample_app());

    let (stdout, stderr, success) = run_delazy(repo.path(), &["--stdout"]);
    assert!(success);
    assert!(stdout.starts_with("import { useState, useEffect, Suspense } from 'react';"));
    assert!(stderr.contains("Rewrote 11 lazy import(s) from"), "{}", stderr);
    assert_eq!(fs::read_to_string(&app).unwrap(), sample_app());
}

#[test]
fn test_json_report() {
    let repo = TestRepo::new();
    repo.add_file("src/App.tsx", &sample_app());

    let (stdout, _stderr, success) = run_delazy(repo.path(), &["--json"]);
    assert!(success);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(report["converted"].as_array().unwrap().len(), 11);
    assert_eq!(report["converted"][0]["binding"], "EstimateManager");
    assert_eq!(report["source"], "working-tree");
    assert_eq!(report["loader_import_pruned"], true);
    assert_eq!(report["written"], true);
}

#[test]
fn test_custom_loader_names() {
    let repo = TestRepo::new();
    let app = repo.add_file(
        "src/App.tsx",
        "import { lazyLoad, Suspense } from 'framework';\n\
const Foo = lazyLoad(() => importModule('./components/Foo').then(m => ({ default: m.Foo })));\n",
    );

    let (_stdout, stderr, success) = run_delazy(
        repo.path(),
        &["--loader", "lazyLoad", "--importer", "importModule"],
    );
    assert!(success, "{}", stderr);
    assert_eq!(
        fs::read_to_string(&app).unwrap(),
        "import { Suspense } from 'framework';\n\
import { Foo } from './components/Foo';\n"
    );
}

#[test]
fn test_keep_flags() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", &sample_app());

    let (_stdout, _stderr, success) = run_delazy(
        repo.path(),
        &["--keep-duplicates", "--keep-loader-import", "--keep-comments"],
    );
    assert!(success);

    let text = fs::read_to_string(&app).unwrap();
    assert!(text.starts_with("import { useState, useEffect, lazy, Suspense } from 'react';"));
    assert!(text.contains("// Lazy loading for heavy components"));
    assert_eq!(
        text.matches("import { AccessDenied } from './components/AccessDenied';")
            .count(),
        2
    );
}

#[test]
fn test_leftovers_refuse_write() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", APP_WITH_LEFTOVER);

    let (_stdout, stderr, success) = run_delazy(repo.path(), &[]);
    assert!(!success, "leftover loader calls should fail the run");
    assert!(
        stderr.contains("delazy: warning: line 3 still calls `lazy`"),
        "{}",
        stderr
    );
    assert!(stderr.contains("--force"), "{}", stderr);
    assert_eq!(fs::read_to_string(&app).unwrap(), APP_WITH_LEFTOVER);
}

#[test]
fn test_force_writes_with_warnings() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", APP_WITH_LEFTOVER);

    let (_stdout, stderr, success) = run_delazy(repo.path(), &["--force"]);
    assert!(success, "{}", stderr);
    assert!(stderr.contains("line 3 still calls `lazy`"), "{}", stderr);

    let text = fs::read_to_string(&app).unwrap();
    assert!(text.contains("import Foo from './Foo';"));
    // Still used on line 3, so the loader import stays
    assert!(text.starts_with("import { lazy, Suspense } from 'react';"));
}

#[test]
fn test_from_git_revision() {
    let repo = TestRepo::with_git();
    let app = repo.add_file("src/App.tsx", &sample_app());
    repo.commit("add lazy app");
    fs::write(&app, "half-edited working copy\n").unwrap();

    let (stdout, stderr, success) = run_delazy(repo.path(), &["--rev", "HEAD"]);
    assert!(success, "{}", stderr);
    assert!(stdout.contains("as of HEAD"), "{}", stdout);

    let text = fs::read_to_string(&app).unwrap();
    assert!(text.contains("import { EstimateManager } from './components/EstimateManager';"));
    assert!(!text.contains("half-edited"));
}

#[test]
fn test_bom_dropped_on_write() {
    let repo = TestRepo::new();
    let app = repo.add_file("src/App.tsx", &format!("\u{FEFF}{}", sample_app()));

    let (_stdout, _stderr, success) = run_delazy(repo.path(), &[]);
    assert!(success);
    let bytes = fs::read(&app).unwrap();
    assert!(bytes.starts_with(b"import "), "BOM should be gone");
}
