//! Text exports for external collaborators.
//!
//! Two formats:
//!
//! ```text
//! PowerLawReport → tab-separated report (header, alpha, one row per bin)
//! GraphExport    → Graphviz DOT → `dot -Tpng`, or any DOT renderer
//! ```

use std::io::Write;

use crate::analysis::PowerLawReport;
use crate::graph::GraphExport;
use crate::Result;

/// Write the power-law report.
///
/// ```text
/// # Event Size Distribution
/// # Power-law exponent (alpha): 2.41
/// # Size	Frequency	PowerLawFit
/// 0.1	4	262.0
/// ```
pub fn write_power_law_report(report: &PowerLawReport, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "# Event Size Distribution")?;
    writeln!(writer, "# Power-law exponent (alpha): {}", report.exponent)?;
    writeln!(writer, "# Size\tFrequency\tPowerLawFit")?;
    for row in &report.rows {
        writeln!(writer, "{}\t{}\t{}", row.size, row.frequency, row.fit)?;
    }
    Ok(())
}

/// Write the relationship graph as a directed DOT graph.
///
/// Every edge carries its `eN` id as the label; repeated pairs stay
/// separate edges.
pub fn write_dot(graph: &GraphExport, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "digraph FractalNLPGraph {{")?;
    for node in &graph.nodes {
        writeln!(writer, "    {};", quote(node))?;
    }
    for edge in &graph.edges {
        writeln!(
            writer,
            "    {} -> {} [label={}];",
            quote(&edge.from),
            quote(&edge.to),
            quote(&edge.label()),
        )?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}

/// Format a string as a DOT quoted ID.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
