//! Graphviz export
//!
//! Renders a [`Graph`] as a DOT digraph, laid out left to right. Rendering to
//! an image is left to the external `dot` tool.

use crate::graph::Graph;
use log::debug;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

/// Display adapter producing DOT source for a graph
pub struct Dot<'g>(pub &'g Graph);

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph regex {{")?;
        writeln!(f, "  rankdir=\"LR\";")?;
        for state in self.0.accepting_states() {
            writeln!(f, "  s{} [shape=doublecircle];", state)?;
        }
        for (from, to, label) in self.0.edges() {
            writeln!(f, "  s{} -> s{} [label=\"{}\"];", from, to, escape(&label))?;
        }
        writeln!(f, "}}")
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// DOT source for `graph`
pub fn to_dot(graph: &Graph) -> String {
    Dot(graph).to_string()
}

/// Write the DOT source for `graph` to `path`
pub fn write_dot(graph: &Graph, path: &Path) -> io::Result<()> {
    fs::write(path, to_dot(graph))
}

/// Run `dot -Tsvg` on an existing DOT file
pub fn render_svg(dot_file: &Path, svg_file: &Path) -> io::Result<()> {
    debug!("rendering {} to {}", dot_file.display(), svg_file.display());
    let status = Command::new("dot")
        .arg("-Tsvg")
        .arg(dot_file)
        .arg("-o")
        .arg(svg_file)
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("dot exited with {}", status)))
    }
}
