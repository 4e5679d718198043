use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use serde_json::json;
use skein::{kruskal, AdjacencyGraph, Edge};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "skein",
    about = "Run depth-first search, Kruskal's spanning tree or a topological sort on a graph given as edges."
)]
struct Cli {
    /// Print the result as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Depth-first visitation order from a start node.
    Dfs {
        /// Directed edge, repeatable. Without edges a built-in example is used.
        #[arg(long = "edge", value_name = "U:V", value_parser = parse_arc)]
        edges: Vec<(String, String)>,
        /// Node to start from.
        #[arg(long, default_value = "A")]
        start: String,
        /// Use the recursive traversal instead of the iterative one.
        #[arg(long)]
        recursive: bool,
    },
    /// Minimum spanning tree (or forest) with Kruskal's algorithm.
    Mst {
        /// Number of vertices (defaults to the largest endpoint + 1).
        #[arg(long, value_name = "N")]
        vertices: Option<usize>,
        /// Undirected weighted edge, repeatable. Without edges a built-in example is used.
        #[arg(long = "edge", value_name = "U:V:W", value_parser = parse_weighted)]
        edges: Vec<Edge<usize, f64>>,
    },
    /// Topological order of a directed acyclic graph.
    Topo {
        /// Directed edge, repeatable. Without edges a built-in example is used.
        #[arg(long = "edge", value_name = "U:V", value_parser = parse_arc)]
        edges: Vec<(String, String)>,
        /// Declare a node with no outgoing edges, repeatable.
        #[arg(long = "node", value_name = "NODE")]
        nodes: Vec<String>,
        #[arg(long, value_enum, default_value_t = Strategy::Both)]
        strategy: Strategy,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    Kahn,
    Dfs,
    Both,
}

fn parse_arc(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((u, v)) if !u.is_empty() && !v.is_empty() => Ok((u.to_owned(), v.to_owned())),
        _ => Err(format!("expected U:V, got {s:?}")),
    }
}

fn parse_weighted(s: &str) -> Result<Edge<usize, f64>, String> {
    let Some((u, v, w)) = s.split(':').collect_tuple() else {
        return Err(format!("expected U:V:W, got {s:?}"));
    };
    let vertex = |x: &str| {
        x.parse::<usize>()
            .map_err(|e| format!("invalid vertex {x:?}: {e}"))
    };
    let weight = w
        .parse::<f64>()
        .map_err(|e| format!("invalid weight {w:?}: {e}"))?;
    Ok(Edge::new(vertex(u)?, vertex(v)?, weight))
}

/// Smallest vertex count that covers every endpoint.
fn vertices_needed(edges: &[Edge<usize, f64>]) -> Result<usize> {
    let largest = edges.iter().map(|e| e.u.max(e.v)).max();
    match largest {
        Some(v) => v
            .checked_add(1)
            .with_context(|| format!("vertex {v} is too large to count")),
        None => Ok(0),
    }
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(u, v)| (u.to_string(), v.to_string()))
        .collect()
}

fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "skein=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Dfs {
            edges,
            start,
            recursive,
        } => {
            let edges = if edges.is_empty() {
                owned(&[
                    ("A", "B"),
                    ("A", "C"),
                    ("B", "D"),
                    ("B", "E"),
                    ("C", "F"),
                    ("E", "F"),
                    ("F", "G"),
                ])
            } else {
                edges
            };
            let graph: AdjacencyGraph<String> = edges.into_iter().collect();
            let order = if recursive {
                graph.dfs_recursive(&start)
            } else {
                graph.dfs_iterative(&start)
            };
            info!(nodes = order.len(), recursive, "dfs finished");

            if cli.json {
                println!("{}", json!({ "start": start, "order": order }));
            } else {
                println!("Adjacency list:");
                for (node, successors) in graph.as_map() {
                    println!("  {node}: [{}]", successors.iter().join(", "));
                }
                println!("DFS order: {}", order.iter().join(" "));
            }
        }
        Command::Mst { vertices, edges } => {
            let (vertices, edges) = if edges.is_empty() {
                let example: [(usize, usize, f64); 5] =
                    [(0, 1, 10.0), (0, 2, 6.0), (0, 3, 5.0), (1, 3, 15.0), (2, 3, 4.0)];
                (
                    vertices.unwrap_or(4),
                    example.into_iter().map(Edge::from).collect(),
                )
            } else {
                let needed = vertices_needed(&edges)?;
                let vertices = vertices.unwrap_or(needed);
                ensure!(
                    vertices >= needed,
                    "an edge endpoint needs at least {needed} vertices, got {vertices}"
                );
                (vertices, edges)
            };
            let forest = kruskal(vertices, &edges).context("Kruskal's algorithm failed")?;
            let spanning = forest.is_spanning_tree(vertices);

            if cli.json {
                let selected = forest
                    .edges
                    .iter()
                    .map(|e| json!([e.u, e.v, e.weight]))
                    .collect_vec();
                println!(
                    "{}",
                    json!({
                        "edges": selected,
                        "total_weight": forest.total_weight,
                        "spanning_tree": spanning,
                    })
                );
            } else {
                println!("Edges in MST:");
                for e in &forest.edges {
                    println!("  {} -- {}  (weight {})", e.u, e.v, e.weight);
                }
                println!("Total weight of MST: {}", forest.total_weight);
                if !spanning {
                    println!(
                        "Graph is disconnected: {} components",
                        forest.components(vertices)
                    );
                }
            }
        }
        Command::Topo {
            edges,
            nodes,
            strategy,
        } => {
            let graph: AdjacencyGraph<String> = if edges.is_empty() && nodes.is_empty() {
                AdjacencyGraph::from_adjacency(
                    [
                        ("5", vec!["2", "0"]),
                        ("4", vec!["0", "1"]),
                        ("2", vec!["3"]),
                        ("3", vec!["1"]),
                        ("0", vec![]),
                        ("1", vec![]),
                    ]
                    .map(|(u, vs)| (u.to_string(), vs.into_iter().map(str::to_string))),
                )
            } else {
                let mut graph: AdjacencyGraph<String> = edges.into_iter().collect();
                for node in nodes {
                    graph.add_node(node);
                }
                graph
            };
            if graph.is_empty() {
                bail!("the graph has no nodes");
            }

            let kahn = match strategy {
                Strategy::Kahn | Strategy::Both => Some(
                    graph
                        .topo_sort_kahn()
                        .context("Kahn's algorithm found no topological order")?,
                ),
                Strategy::Dfs => None,
            };
            let dfs = match strategy {
                Strategy::Dfs | Strategy::Both => Some(
                    graph
                        .topo_sort_dfs()
                        .context("depth-first sort found no topological order")?,
                ),
                Strategy::Kahn => None,
            };

            if cli.json {
                println!("{}", json!({ "kahn": kahn, "dfs": dfs }));
            } else {
                if let Some(order) = kahn {
                    println!("Kahn's order: {}", order.iter().join(" "));
                }
                if let Some(order) = dfs {
                    println!("DFS order:    {}", order.iter().join(" "));
                }
            }
        }
    }
    Ok(())
}
