/*!
# Line Protocol Parser

Parses the whitespace-delimited text protocol spoken by clients. The command
token is case-insensitive; numeric arguments are positive integers. Vertex
ids on the wire are 1-based; the parsed [`Command`] keeps the wire values
and the dispatch layer converts to the internal 0-based ids.
*/

use crate::core::error::{Result, SpantreeError};

/// A parsed client command. Vertex ids carry the 1-based wire values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `newgraph n m`: replace the session's graph with `n` fresh vertices,
    /// then read `m` edge lines.
    NewGraph { vertices: usize, edges: usize },
    /// `newedge u v w`: add an edge.
    NewEdge { u: usize, v: usize, weight: usize },
    /// `removeedge u v`: remove an edge.
    RemoveEdge { u: usize, v: usize },
    /// `mst strat`: compute an MST with the named strategy.
    Mst { strategy: String },
}

fn parse_number(token: &str) -> Result<usize> {
    token
        .parse::<usize>()
        .map_err(|_| SpantreeError::NotANumber(token.to_string()))
}

fn parse_vertex_id(token: &str) -> Result<usize> {
    let id = parse_number(token)?;
    if id == 0 {
        return Err(SpantreeError::bad_arguments("vertex ids are 1-based"));
    }
    Ok(id)
}

fn parse_weight(token: &str) -> Result<usize> {
    let weight = parse_number(token)?;
    if weight == 0 {
        return Err(SpantreeError::bad_arguments("weight must be positive"));
    }
    Ok(weight)
}

/// Parses one command line.
pub fn parse_command(line: &str) -> Result<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Err(SpantreeError::EmptyMessage);
    };

    match first.to_lowercase().as_str() {
        "newgraph" => {
            if tokens.len() != 3 {
                return Err(SpantreeError::bad_arguments("usage: newgraph n m"));
            }
            let vertices = parse_number(tokens[1])?;
            if vertices == 0 {
                return Err(SpantreeError::bad_arguments(
                    "a graph needs at least one vertex",
                ));
            }
            let edges = parse_number(tokens[2])?;
            Ok(Command::NewGraph { vertices, edges })
        }
        "newedge" => {
            if tokens.len() != 4 {
                return Err(SpantreeError::bad_arguments("usage: newedge u v w"));
            }
            Ok(Command::NewEdge {
                u: parse_vertex_id(tokens[1])?,
                v: parse_vertex_id(tokens[2])?,
                weight: parse_weight(tokens[3])?,
            })
        }
        "removeedge" => {
            if tokens.len() != 3 {
                return Err(SpantreeError::bad_arguments("usage: removeedge u v"));
            }
            Ok(Command::RemoveEdge {
                u: parse_vertex_id(tokens[1])?,
                v: parse_vertex_id(tokens[2])?,
            })
        }
        "mst" => {
            if tokens.len() != 2 {
                return Err(SpantreeError::bad_arguments("usage: mst <strategy>"));
            }
            Ok(Command::Mst {
                strategy: tokens[1].to_lowercase(),
            })
        }
        other => Err(SpantreeError::UnknownCommand(other.to_string())),
    }
}

/// Parses one `u v w` edge-seed line, as consumed after `newgraph`.
pub fn parse_edge_line(line: &str) -> Result<(usize, usize, usize)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(SpantreeError::bad_arguments("expected: u v w"));
    }
    Ok((
        parse_vertex_id(tokens[0])?,
        parse_vertex_id(tokens[1])?,
        parse_weight(tokens[2])?,
    ))
}
