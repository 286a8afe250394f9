//! Human-readable listings of a clustering run.
//!
//! Each listing borrows a [`TableSplitter`] and implements `Display`; callers
//! decide where the text goes.

use core::fmt;

use crate::hierarchy::NodeContent;
use crate::participant::Participant;
use crate::splitter::TableSplitter;

/// Format a second count as `HH:MM:SS`. Hours do not wrap at 24.
pub fn format_seconds(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    format!(
        "{sign}{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

fn label(participants: &[Participant], id: usize) -> String {
    match participants.get(id) {
        Some(p) => p.name.clone(),
        None => format!("cluster {}", id - participants.len()),
    }
}

/// Every ordered pair with its raw signals and final distance.
#[derive(Debug, Clone, Copy)]
pub struct DistanceListing<'a>(pub &'a TableSplitter);

impl fmt::Display for DistanceListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players = self.0.participants();
        let m = self.0.distances();
        for (i, a) in players.iter().enumerate() {
            for (j, b) in players.iter().enumerate() {
                if i == j {
                    continue;
                }
                writeln!(
                    f,
                    "{} [{:.1}] and {} [{:.1}]: rating gap {:.1}, last contact {} ago, distance {:.4}",
                    a.name,
                    a.rating,
                    b.name,
                    b.rating,
                    m.skill_gap(i, j),
                    format_seconds(m.recency_secs(i, j) as i64),
                    m.get(i, j)
                )?;
            }
        }
        Ok(())
    }
}

/// Merge steps followed by their heights.
#[derive(Debug, Clone, Copy)]
pub struct MergeListing<'a>(pub &'a TableSplitter);

impl fmt::Display for MergeListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players = self.0.participants();
        let dendro = self.0.dendrogram();
        for (i, step) in dendro.merges().enumerate() {
            writeln!(
                f,
                "Step {}: merge {} and {} into cluster {}",
                i + 1,
                label(players, step.left),
                label(players, step.right),
                i
            )?;
        }
        for (i, height) in dendro.heights().iter().enumerate() {
            writeln!(f, "cluster {i} height: {height:.4}")?;
        }
        Ok(())
    }
}

/// Indented tree, higher child first at every level.
#[derive(Debug, Clone, Copy)]
pub struct TreeDump<'a>(pub &'a TableSplitter);

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players = self.0.participants();
        let tree = self.0.tree();
        let mut stack = vec![(tree.root(), String::new())];

        while let Some((id, indent)) = stack.pop() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            match node.content {
                NodeContent::Leaf(index) => {
                    writeln!(f, "{indent}└─── {} [{:.2}]", label(players, index), node.height)?;
                }
                NodeContent::Merge { cluster, .. } => {
                    writeln!(f, "{indent}└─── cluster {cluster} [{:.2}]", node.height)?;
                    if let Some((first, second)) = tree.ordered_children(id) {
                        stack.push((second, format!("{indent}      ")));
                        stack.push((first, format!("{indent}     |")));
                    }
                }
            }
        }
        Ok(())
    }
}
