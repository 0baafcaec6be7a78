//! Flat-file roadmap loading.
//!
//! Four whitespace-separated text files describe a search problem:
//!
//! - *Samples*: `nodeId f1 .. fk` per node. The line at index `nsamples`
//!   designates the start node; lines beyond it are goal nodes and carry
//!   one trailing integer, the target-pose hypothesis id.
//! - *Roadmap*: `n1 n2 cost [label..]` per undirected edge.
//! - *Label weights*: `labelId obstacleIdx probability` per label.
//! - *Most promising labels*: whitespace-separated label ids (reserved).
//!
//! Malformed files are fatal here; solvers assume a validated roadmap and
//! perform no defensive revalidation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use super::{Roadmap, RoadmapBuilder};
use crate::error::{PlannerError, Result};

/// Input file locations for one search problem.
#[derive(Clone, Debug)]
pub struct RoadmapFiles<'a> {
    pub samples: &'a Path,
    pub roadmap: &'a Path,
    pub label_weights: &'a Path,
    /// Optional; parsed into [`Roadmap::most_promising_labels`] when present.
    pub most_promising_labels: Option<&'a Path>,
}

/// Load a roadmap from its flat files.
///
/// `nsamples` is the declared number of free samples: the samples line at
/// that index is the start node, later lines are goals.
pub fn load_roadmap(files: &RoadmapFiles<'_>, nsamples: usize) -> Result<Roadmap> {
    let mut builder = RoadmapBuilder::new();

    read_samples(files.samples, nsamples, &mut builder)?;
    read_edges(files.roadmap, &mut builder)?;
    read_label_weights(files.label_weights, &mut builder)?;
    if let Some(path) = files.most_promising_labels {
        let labels = read_int_list(path)?;
        builder.set_most_promising_labels(labels);
    }

    let roadmap = builder.build()?;
    info!(
        "[Load] roadmap: {} nodes, {} edges, {} goals, start={}",
        roadmap.node_count(),
        roadmap.edge_count(),
        roadmap.goal_set().len(),
        roadmap.start()
    );
    Ok(roadmap)
}

fn parse_error(path: &Path, line: usize, what: &str) -> PlannerError {
    PlannerError::Parse(format!("{}:{}: {}", path.display(), line + 1, what))
}

fn open_lines(path: &Path) -> Result<impl Iterator<Item = std::io::Result<String>>> {
    let file = File::open(path).map_err(|e| {
        PlannerError::Parse(format!("cannot open {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file).lines())
}

fn read_samples(path: &Path, nsamples: usize, builder: &mut RoadmapBuilder) -> Result<()> {
    let mut state_dim: Option<usize> = None;

    for (lineno, line) in open_lines(path)?.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let node_id: usize = tokens
            .next()
            .ok_or_else(|| parse_error(path, lineno, "missing node id"))?
            .parse()
            .map_err(|_| parse_error(path, lineno, "invalid node id"))?;

        let values: Vec<f32> = tokens
            .map(|t| {
                t.parse::<f32>()
                    .map_err(|_| parse_error(path, lineno, "invalid state value"))
            })
            .collect::<Result<_>>()?;

        let dim = *state_dim.get_or_insert(values.len());

        if lineno <= nsamples {
            // Free sample; the line at exactly nsamples is the start node.
            builder.add_node(values);
            if lineno == nsamples {
                builder.set_start(node_id);
            }
        } else {
            // Goal line: state vector plus one trailing hypothesis id.
            if values.len() < dim + 1 {
                return Err(parse_error(path, lineno, "goal line missing target pose id"));
            }
            let pose = values[dim] as u32;
            builder.add_node(values[..dim].to_vec());
            builder.mark_goal(node_id, pose);
        }
    }

    debug!("[Load] samples read from {}", path.display());
    Ok(())
}

fn read_edges(path: &Path, builder: &mut RoadmapBuilder) -> Result<()> {
    for (lineno, line) in open_lines(path)?.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let a: usize = tokens
            .next()
            .ok_or_else(|| parse_error(path, lineno, "missing first endpoint"))?
            .parse()
            .map_err(|_| parse_error(path, lineno, "invalid first endpoint"))?;
        let b: usize = tokens
            .next()
            .ok_or_else(|| parse_error(path, lineno, "missing second endpoint"))?
            .parse()
            .map_err(|_| parse_error(path, lineno, "invalid second endpoint"))?;
        let cost: f32 = tokens
            .next()
            .ok_or_else(|| parse_error(path, lineno, "missing edge cost"))?
            .parse()
            .map_err(|_| parse_error(path, lineno, "invalid edge cost"))?;

        let labels: Vec<u32> = tokens
            .map(|t| {
                t.parse::<u32>()
                    .map_err(|_| parse_error(path, lineno, "invalid edge label"))
            })
            .collect::<Result<_>>()?;

        builder.add_edge(a, b, cost, &labels);
    }

    debug!("[Load] edges read from {}", path.display());
    Ok(())
}

fn read_label_weights(path: &Path, builder: &mut RoadmapBuilder) -> Result<()> {
    for (lineno, line) in open_lines(path)?.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let label: u32 = tokens
            .next()
            .ok_or_else(|| parse_error(path, lineno, "missing label id"))?
            .parse()
            .map_err(|_| parse_error(path, lineno, "invalid label id"))?;
        let obstacle: usize = tokens
            .next()
            .ok_or_else(|| parse_error(path, lineno, "missing obstacle index"))?
            .parse()
            .map_err(|_| parse_error(path, lineno, "invalid obstacle index"))?;
        let weight: f32 = tokens
            .next()
            .ok_or_else(|| parse_error(path, lineno, "missing probability"))?
            .parse()
            .map_err(|_| parse_error(path, lineno, "invalid probability"))?;

        builder.set_label_weight(label, obstacle, weight);
    }

    debug!("[Load] label weights read from {}", path.display());
    Ok(())
}

fn read_int_list(path: &Path) -> Result<Vec<u32>> {
    let mut values = Vec::new();
    for (lineno, line) in open_lines(path)?.enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let v: u32 = token
                .parse()
                .map_err(|_| parse_error(path, lineno, "invalid label id"))?;
            values.push(v);
        }
    }
    Ok(values)
}
