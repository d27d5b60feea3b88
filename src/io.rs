//! Weighted edge-list input.
//!
//! One record per line, three whitespace-separated integers `i j value`:
//! - `i == j` sets the bias of node `i`,
//! - otherwise it sets the coupling of the unordered edge `(i, j)`.
//!
//! Blank lines and lines starting with `#` are skipped. A later record for the
//! same bias or the same unordered edge replaces the earlier one. The node
//! count is one past the largest id mentioned anywhere.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{IsingError, Result};
use crate::model::{edge_key, IsingModel};

/// Parsed edge list, before tree validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeList {
    pub node_count: usize,
    pub biases: HashMap<usize, i64>,
    /// Keys normalized to `(min, max)`.
    pub couplings: HashMap<(usize, usize), i64>,
}

impl EdgeList {
    /// Validate ids and build the model.
    pub fn into_model(self) -> Result<IsingModel> {
        IsingModel::from_maps(self.node_count, &self.biases, &self.couplings)
    }
}

/// Parse edge-list text.
pub fn parse_edge_list(text: &str) -> Result<EdgeList> {
    let mut list = EdgeList::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(IsingError::Parse {
                line,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        let i = parse_node(fields[0], line)?;
        let j = parse_node(fields[1], line)?;
        let value = fields[2].parse::<i64>().map_err(|e| IsingError::Parse {
            line,
            message: format!("invalid weight '{}': {e}", fields[2]),
        })?;

        let span = i.max(j).checked_add(1).ok_or_else(|| IsingError::Parse {
            line,
            message: "node id too large".to_string(),
        })?;
        list.node_count = list.node_count.max(span);
        if i == j {
            list.biases.insert(i, value);
        } else {
            list.couplings.insert(edge_key(i, j), value);
        }
    }
    Ok(list)
}

/// Read and parse an edge-list file.
pub fn read_edge_list(path: impl AsRef<Path>) -> Result<EdgeList> {
    let text = fs::read_to_string(path)?;
    parse_edge_list(&text)
}

fn parse_node(field: &str, line: usize) -> Result<usize> {
    field.parse::<usize>().map_err(|e| IsingError::Parse {
        line,
        message: format!("invalid node id '{field}': {e}"),
    })
}
