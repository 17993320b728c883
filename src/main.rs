//! Process entry point: parse flags, load hierarchical configuration,
//! initialize logging and the MPI world, load both graphs, then
//! dispatch to the query type named on the command line (§6, §10).

use clap::Parser;
use graphmatch::apair::{format_match_line, run_rank};
use graphmatch::cli::{Cli, QueryType};
use graphmatch::config::Config;
use graphmatch::context::MatchContext;
use graphmatch::error::LookupError;
use graphmatch::spair::SPair;
use graphmatch::vpair::vpair;
use mpi::traits::*;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use std::io::Write;

fn main() {
    if let Err(e) = run() {
        tracing::error!(error = %e, "graphmatch failed");
        eprintln!("graphmatch: {e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    let config = Config::load()?.merge_cli(&cli);
    graphmatch::logging::init(&config.logging.level, config.logging.format);

    let universe = mpi::initialize().ok_or_else(|| anyhow::anyhow!("failed to initialize MPI environment"))?;
    let world = universe.world();
    let rank = world.rank();
    let size = world.size();

    let ctx = MatchContext::load(&cli, &config.matching)?;
    let m = &config.matching;

    match cli.query_type {
        QueryType::Spair => run_spair(&ctx, &cli, m.sigma, m.delta, m.k)?,
        QueryType::SpairBenchmark => run_spair_benchmark(&ctx, m.sigma, m.delta, m.k, m.n_iter),
        QueryType::Vpair => run_vpair(&ctx, &cli, m.sigma, m.delta, m.k)?,
        QueryType::VpairBenchmark => run_vpair_benchmark(&ctx, &cli, m.sigma, m.delta, m.k, m.n_iter)?,
        QueryType::Apair => run_apair(&ctx, &cli, &config, &world, rank, size)?,
    }

    Ok(())
}

fn run_spair(ctx: &MatchContext, cli: &Cli, sigma: f64, delta: f64, k: usize) -> anyhow::Result<()> {
    let u_oid = cli.vertex_u.expect("validated by Cli::validate");
    let v_oid = cli.vertex_v.expect("validated by Cli::validate");
    let u = ctx
        .gd
        .get_internal(u_oid)
        .ok_or(LookupError::UnknownVertex { graph: "gd", oid: u_oid })?;
    let v = ctx
        .g
        .get_internal(v_oid)
        .ok_or(LookupError::UnknownVertex { graph: "g", oid: v_oid })?;

    let mut spair = SPair::new(&ctx.gd, &ctx.g, &ctx.similarity, sigma, delta, k);
    let matched = spair.query(u, v);
    tracing::info!(u = u_oid, v = v_oid, matched, "Query: ({u_oid}, {v_oid}) = {matched}");
    println!("Query: ({u_oid}, {v_oid}) = {}", if matched { "True" } else { "False" });
    Ok(())
}

fn run_spair_benchmark(ctx: &MatchContext, sigma: f64, delta: f64, k: usize, n_iter: u32) {
    let mut rng = SmallRng::seed_from_u64(0);
    let gd_n = ctx.gd.vertex_count();
    let g_n = ctx.g.vertex_count();
    let mut spair = SPair::new(&ctx.gd, &ctx.g, &ctx.similarity, sigma, delta, k);

    let start = std::time::Instant::now();
    for _ in 0..n_iter.max(1) {
        let u = rng.gen_range(0..gd_n as u32);
        let v = rng.gen_range(0..g_n as u32);
        spair.query(u, v);
    }
    let elapsed = start.elapsed();
    tracing::info!(
        n_iter,
        avg_latency_us = elapsed.as_micros() as f64 / f64::from(n_iter.max(1)),
        "spair_benchmark finished"
    );
}

fn run_vpair(ctx: &MatchContext, cli: &Cli, sigma: f64, delta: f64, k: usize) -> anyhow::Result<()> {
    let u_oid = cli.vertex_u.expect("validated by Cli::validate");
    let u = ctx
        .gd
        .get_internal(u_oid)
        .ok_or(LookupError::UnknownVertex { graph: "gd", oid: u_oid })?;

    let matches = vpair(&ctx.gd, &ctx.g, &ctx.similarity, u, sigma, delta, k);
    for v in matches {
        let line = format!("{}|{}", ctx.g.get_external(v), ctx.g.label(v));
        tracing::info!("{line}");
        println!("{line}");
    }
    Ok(())
}

fn run_vpair_benchmark(ctx: &MatchContext, cli: &Cli, sigma: f64, delta: f64, k: usize, n_iter: u32) -> anyhow::Result<()> {
    let sources: Vec<i64> = match &cli.vpair_sources_file {
        Some(path) => {
            let reader = graphmatch::io::open_flagged("vpair-sources-file", path)?;
            let mut ids = Vec::new();
            for line in graphmatch::io::significant_lines(reader) {
                let (_, line) = line?;
                ids.push(line.trim().parse::<i64>()?);
            }
            ids
        }
        None => {
            let mut rng = SmallRng::seed_from_u64(0);
            let gd_n = ctx.gd.vertex_count() as u32;
            (0..n_iter.max(1)).map(|_| ctx.gd.get_external(rng.gen_range(0..gd_n))).collect()
        }
    };

    let start = std::time::Instant::now();
    let mut total_matches = 0usize;
    for oid in &sources {
        let Some(u) = ctx.gd.get_internal(*oid) else { continue };
        total_matches += vpair(&ctx.gd, &ctx.g, &ctx.similarity, u, sigma, delta, k).len();
    }
    let elapsed = start.elapsed();
    tracing::info!(
        n_sources = sources.len(),
        total_matches,
        avg_latency_us = elapsed.as_micros() as f64 / sources.len().max(1) as f64,
        "vpair_benchmark finished"
    );
    Ok(())
}

fn run_apair(
    ctx: &MatchContext,
    cli: &Cli,
    config: &Config,
    world: &mpi::topology::SystemCommunicator,
    rank: mpi::topology::Rank,
    size: mpi::topology::Rank,
) -> anyhow::Result<()> {
    let out_prefix = cli.out_prefix.as_deref().expect("validated by Cli::validate");

    // Rank 0 computes the seed-0 shuffle of G_D's vertices and
    // broadcasts it so every rank sees the identical assignment (§4.5).
    let mut shuffled: Vec<u32> = ctx.gd.vertices().collect();
    if rank == 0 {
        shuffled = graphmatch::apair::deterministic_shuffle(shuffled);
    }
    let root = world.process_at_rank(0);
    let mut len = shuffled.len() as i32;
    root.broadcast_into(&mut len);
    if rank != 0 {
        shuffled = vec![0u32; len as usize];
    }
    root.broadcast_into(&mut shuffled[..]);
    world.barrier();

    let local_ranks = 1usize; // one rank per process in this harness.
    let parallelism = config.resolve_parallelism(local_ranks);

    let matches = run_rank(
        &ctx.gd,
        &ctx.g,
        &ctx.similarity,
        &ctx.index,
        &ctx.gd_source_labels,
        &ctx.g_source_labels,
        &shuffled,
        rank as usize,
        size as usize,
        parallelism,
        config.matching.sigma,
        config.matching.delta,
        config.matching.k,
    );

    std::fs::create_dir_all(out_prefix)?;
    let out_path = std::path::Path::new(out_prefix).join(format!("apair_{rank}"));
    let mut file = std::fs::File::create(&out_path)?;
    for m in &matches {
        writeln!(file, "{}", format_match_line(m))?;
    }

    tracing::info!(rank, size, matches = matches.len(), out = %out_path.display(), "apair rank finished");
    Ok(())
}
