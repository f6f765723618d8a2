use std::fs;
use std::path::{Path, PathBuf};

use crate::dot_renderer::{self, DotOptions};
use crate::error::Error;
use crate::policy_ast::PolicyGraph;

pub const GRAPH_JSON: &str = "graph.json";
pub const GRAPH_DOT: &str = "graph.dot";

/// Paths of the files written by [`write_graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFiles {
    pub json: PathBuf,
    pub dot: PathBuf,
}

/// Writes `graph.json` then `graph.dot` into `out_dir`, creating it first.
///
/// Existing files are overwritten. A failure on the DOT write leaves the JSON
/// file in place.
pub fn write_graph(
    graph: &PolicyGraph,
    out_dir: &Path,
    options: &DotOptions,
) -> Result<GraphFiles, Error> {
    fs::create_dir_all(out_dir).map_err(|source| Error::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let files = GraphFiles {
        json: out_dir.join(GRAPH_JSON),
        dot: out_dir.join(GRAPH_DOT),
    };

    write_file(&files.json, &graph.to_json()?)?;
    write_file(&files.dot, &dot_renderer::render_with_options(graph, options))?;

    tracing::info!(
        json = %files.json.display(),
        dot = %files.dot.display(),
        "graph written"
    );
    Ok(files)
}

fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    tracing::debug!(path = %path.display(), bytes = contents.len(), "writing");
    fs::write(path, contents).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy_parser::parse_policy;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("a").join("b");
        let graph = parse_policy("# A\n- b\n");

        let files = write_graph(&graph, &out, &DotOptions::default()).unwrap();

        assert_eq!(files.json, out.join("graph.json"));
        assert_eq!(files.dot, out.join("graph.dot"));
        assert!(files.json.is_file());
        assert!(files.dot.is_file());
    }

    #[test]
    fn write_overwrites_existing_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(GRAPH_DOT), "stale").unwrap();
        fs::write(tmp.path().join(GRAPH_JSON), "stale").unwrap();

        let graph = parse_policy("- only\n");
        let files = write_graph(&graph, tmp.path(), &DotOptions::default()).unwrap();

        let dot = fs::read_to_string(&files.dot).unwrap();
        assert_eq!(dot, dot_renderer::render(&graph));
        let json = fs::read_to_string(&files.json).unwrap();
        assert_eq!(PolicyGraph::from_json(&json).unwrap(), graph);
    }

    #[test]
    fn write_fails_when_out_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = write_graph(&PolicyGraph::default(), &blocker, &DotOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }), "got: {err}");
    }

    #[test]
    fn write_fails_when_target_is_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join(GRAPH_DOT)).unwrap();

        let err = write_graph(&PolicyGraph::default(), tmp.path(), &DotOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::WriteFile { ref path, .. } if path.ends_with(GRAPH_DOT)));
        assert!(tmp.path().join(GRAPH_JSON).is_file(), "json written before dot failed");
    }
}
