//! an executable for contracting a node attributed training graph
//! example usage:
//! contract --nodes "cora_nodes.csv" --edges "cora_edges.csv" --nbfeatures 1433 --nbclasses 7 --steps 1000,500 --out cora_small
//! contract --nodes "ppi_nodes.csv" --edges "ppi_edges.csv" --nbfeatures 50 --nbclasses 121 --multilabel --centrality BC --nbcluster 50 --gamma 0.3 --steps 5000 --out ppi_small
//!
//! centrality is one of BC, DC, PR, EC, CC, RAND. Default is EC.
//! The contracted graph is dumped in prefix_nodes.csv and prefix_edges.csv, see module io::csv for the format.

use anyhow::anyhow;
use clap::{Arg, ArgMatches, Command};

use graphcontract::prelude::*;

fn parse_value<T>(matches: &ArgMatches, name: &str) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
{
    match matches.value_of(name) {
        Some(str) => str
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow!("error parsing {}", name)),
        None => Err(anyhow!("missing {}", name)),
    }
} // end of parse_value

fn parse_steps(matches: &ArgMatches) -> Result<Vec<usize>, anyhow::Error> {
    let steps_str = match matches.value_of("steps") {
        Some(str) => str,
        None => return Ok(Vec::new()),
    };
    let mut steps = Vec::<usize>::new();
    for s in steps_str.split(',').filter(|s| !s.trim().is_empty()) {
        match s.trim().parse::<usize>() {
            Ok(budget) => steps.push(budget),
            _ => return Err(anyhow!("could not parse step budget {}", s)),
        }
    }
    Ok(steps)
} // end of parse_steps

fn parse_params(matches: &ArgMatches) -> Result<ContractionParams, anyhow::Error> {
    log::debug!("in parse_params");
    let num_features = parse_value::<usize>(matches, "nbfeatures")?;
    let num_classes = parse_value::<usize>(matches, "nbclasses")?;
    let centrality = parse_value::<Centrality>(matches, "centrality")?;
    let constraint = parse_value::<Constraint>(matches, "constraint")?;
    let nb_cluster = parse_value::<usize>(matches, "nbcluster")?;
    let gamma = parse_value::<f64>(matches, "gamma")?;
    let steps = parse_steps(matches)?;
    let multilabel = matches.is_present("multilabel");
    let seed = parse_value::<u64>(matches, "seed")?;
    //
    let mut params = ContractionParams::new(
        num_features,
        num_classes,
        centrality,
        constraint,
        nb_cluster,
        gamma,
        steps,
        multilabel,
    );
    params.set_seed(seed);
    Ok(params)
} // end of parse_params

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let params = parse_params(matches)?;
    let delim = match matches.value_of("delim") {
        Some(str) if str.len() == 1 => str.as_bytes()[0],
        Some("\\t") | Some("tab") => b'\t',
        _ => return Err(anyhow!("delimiter must be a single character")),
    };
    let nodes_path = std::path::PathBuf::from(parse_value::<String>(matches, "nodes")?);
    let edges_path = std::path::PathBuf::from(parse_value::<String>(matches, "edges")?);
    let out = parse_value::<String>(matches, "out")?;
    //
    log::info!("loading nodes {:?}, edges {:?}", nodes_path, edges_path);
    let (graph, _) = load_graph(&nodes_path, &edges_path, &params, delim)?;
    let contracted = contract_graph(graph, params)?;
    //
    let out_nodes = std::path::PathBuf::from(format!("{}_nodes.csv", out));
    let out_edges = std::path::PathBuf::from(format!("{}_edges.csv", out));
    dump_graph(&contracted, &out_nodes, &out_edges, delim)?;
    log::info!("contracted graph dumped in {:?} and {:?}", out_nodes, out_edges);
    Ok(())
} // end of run

pub fn main() {
    //
    let _ = env_logger::builder().try_init();
    log::info!("logger initialized");
    //
    let matches = Command::new("contract")
        .arg_required_else_help(true)
        .arg(Arg::new("nodes")
            .long("nodes")
            .takes_value(true)
            .required(true)
            .help("csv file of nodes : id, train, features, labels"))
        .arg(Arg::new("edges")
            .long("edges")
            .takes_value(true)
            .required(true)
            .help("csv file of edges : source, target"))
        .arg(Arg::new("nbfeatures")
            .long("nbfeatures")
            .takes_value(true)
            .required(true)
            .help("dimension of node features"))
        .arg(Arg::new("nbclasses")
            .long("nbclasses")
            .takes_value(true)
            .required(true)
            .help("number of classes"))
        .arg(Arg::new("centrality")
            .long("centrality")
            .takes_value(true)
            .default_value("EC")
            .help("BC, DC, PR, EC, CC or RAND"))
        .arg(Arg::new("constraint")
            .long("constraint")
            .takes_value(true)
            .default_value("FL")
            .help("only FL (feature label preserving) is supported"))
        .arg(Arg::new("nbcluster")
            .long("nbcluster")
            .takes_value(true)
            .default_value("100")
            .help("number of k-means clusters"))
        .arg(Arg::new("gamma")
            .long("gamma")
            .takes_value(true)
            .default_value("0.5")
            .help("weight of features versus labels, between 0. and 1."))
        .arg(Arg::new("steps")
            .long("steps")
            .takes_value(true)
            .help("comma separated training node budgets, ex: 1000,500"))
        .arg(Arg::new("multilabel")
            .long("multilabel")
            .takes_value(false)
            .help("labels are num_classes indicators, default is one categorical label"))
        .arg(Arg::new("seed")
            .long("seed")
            .takes_value(true)
            .default_value("42")
            .help("seed of random generator"))
        .arg(Arg::new("delim")
            .long("delim")
            .takes_value(true)
            .default_value(",")
            .help("csv delimiter"))
        .arg(Arg::new("out")
            .long("out")
            .takes_value(true)
            .required(true)
            .help("prefix of output files"))
    .get_matches();
    //
    if let Err(e) = run(&matches) {
        log::error!("contraction failed : {:?}", e);
        std::process::exit(1);
    }
}  // end of main
