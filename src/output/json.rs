//! JSON output formatting

use std::io;

use crate::fix::RewriteReport;

/// Print the report as pretty-printed JSON to stdout.
pub fn print_json(report: &RewriteReport) -> io::Result<()> {
    let json = to_json(report)?;
    println!("{}", json);
    Ok(())
}

pub fn to_json(report: &RewriteReport) -> io::Result<String> {
    serde_json::to_string_pretty(report).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Leftover;
    use crate::fix::InputSource;
    use crate::rewrite::LazyImport;
    use std::path::PathBuf;

    fn report(source: InputSource) -> RewriteReport {
        RewriteReport {
            path: PathBuf::from("src/App.tsx"),
            source,
            output: PathBuf::from("src/App.tsx"),
            loader: "lazy".to_string(),
            converted: vec![LazyImport {
                line: 14,
                binding: "Templates".to_string(),
                module: "./components/Templates".to_string(),
                export: Some("TemplatesManager".to_string()),
                quote: '\'',
                exported: false,
                indent: String::new(),
                comment: None,
            }],
            duplicates_removed: vec![29],
            loader_import_pruned: true,
            leftovers: vec![Leftover {
                line: 40,
                content: "lazy(load)".to_string(),
            }],
            written: false,
            blocked: true,
        }
    }

    #[test]
    fn test_report_fields() {
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&report(InputSource::WorkingTree)).unwrap()).unwrap();

        assert_eq!(value["path"], "src/App.tsx");
        assert_eq!(value["source"], "working-tree");
        assert_eq!(value["converted"][0]["line"], 14);
        assert_eq!(value["converted"][0]["binding"], "Templates");
        assert_eq!(value["converted"][0]["export"], "TemplatesManager");
        assert!(value["converted"][0].get("quote").is_none());
        assert_eq!(value["duplicates_removed"][0], 29);
        assert_eq!(value["leftovers"][0]["line"], 40);
        assert_eq!(value["written"], false);
        assert!(value.get("blocked").is_none());
    }

    #[test]
    fn test_revision_source() {
        let value: serde_json::Value = serde_json::from_str(
            &to_json(&report(InputSource::Revision("HEAD~2".to_string()))).unwrap(),
        )
        .unwrap();
        assert_eq!(value["source"]["revision"], "HEAD~2");
    }
}
