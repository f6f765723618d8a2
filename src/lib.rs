pub mod dot_renderer;
pub mod error;
pub mod output;
pub mod policy_ast;
pub mod policy_parser;

use std::path::Path;

pub use dot_renderer::DotOptions;
pub use error::Error;
pub use output::GraphFiles;
pub use policy_ast::PolicyGraph;

pub fn compile(input: &str) -> PolicyGraph {
    policy_parser::parse_policy(input)
}

/// Reads a policy document from disk and parses it.
pub fn read_policy(path: &Path) -> Result<PolicyGraph, Error> {
    let input = std::fs::read_to_string(path).map_err(|source| Error::ReadPolicy {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(compile(&input))
}

/// Full pipeline: read `policy`, parse it, write `graph.json` and `graph.dot`
/// into `out_dir`.
pub fn compile_file(
    policy: &Path,
    out_dir: &Path,
    options: &DotOptions,
) -> Result<GraphFiles, Error> {
    let graph = read_policy(policy)?;
    output::write_graph(&graph, out_dir, options)
}
