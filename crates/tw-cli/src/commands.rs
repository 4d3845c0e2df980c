use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;
use validator::Validate;

use tw_core::config::AppConfig;
use tw_core::traits::{Identifiable, Record};
use tw_models::{
    load_records, CountySummary, Investigation, MockGenerator, PublicReport, RiskDistribution,
    Supplier, Tender,
};
use tw_queries::{
    county_summaries, entity_summaries, presets, risk_distribution, Filter, QueryBuilder,
    QueryEngine, SortOrder,
};

use crate::cli::{Cli, Commands, Kind, PagerArgs, QueryArgs};
use crate::output::{print_json, print_page, Listing};

pub fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let engine = QueryEngine::new(config.query.clone());

    match cli.command {
        Commands::Generate {
            kind,
            count,
            seed,
            output,
        } => generate(kind, count, seed, output.as_deref()),
        Commands::Query { kind, args } => match kind {
            Kind::Tenders => query::<Tender>(&engine, presets::tenders(), &args, cli.json),
            Kind::Suppliers => query::<Supplier>(&engine, presets::suppliers(), &args, cli.json),
            Kind::Investigations => {
                query::<Investigation>(&engine, presets::investigations(), &args, cli.json)
            }
            Kind::Reports => query::<PublicReport>(&engine, presets::reports(), &args, cli.json),
        },
        Commands::Entities {
            file,
            search,
            county,
            pager,
        } => entities(&engine, &file, search, &county, &pager, cli.json),
        Commands::Stats { file } => stats(&file, cli.json),
    }
}

fn generate(kind: Kind, count: usize, seed: u64, output: Option<&Path>) -> anyhow::Result<()> {
    let mut generator = MockGenerator::new(seed);
    let json = match kind {
        Kind::Tenders => serde_json::to_string_pretty(&generator.tenders(count))?,
        Kind::Suppliers => serde_json::to_string_pretty(&generator.suppliers(count))?,
        Kind::Investigations => serde_json::to_string_pretty(&generator.investigations(count))?,
        Kind::Reports => serde_json::to_string_pretty(&generator.reports(count))?,
    };

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(?kind, count, seed, path = %path.display(), "wrote mock records");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn load<T>(path: &Path) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned + Validate + Identifiable,
{
    let records =
        load_records(path).with_context(|| format!("loading records from {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

fn apply_pager(builder: QueryBuilder, pager: &PagerArgs) -> QueryBuilder {
    let builder = match pager.page {
        Some(page) => builder.page(page),
        None => builder,
    };
    match pager.page_size {
        Some(size) => builder.page_size(size),
        None => builder,
    }
}

fn query<T>(
    engine: &QueryEngine,
    preset: QueryBuilder,
    args: &QueryArgs,
    json: bool,
) -> anyhow::Result<()>
where
    T: Record + DeserializeOwned + Validate + Identifiable + Serialize + Listing,
{
    let records: Vec<T> = load(&args.file)?;

    let mut builder = preset;
    if let Some(text) = &args.search {
        builder = builder.search(text.as_str());
    }
    for raw in &args.filters {
        builder = builder.filter(Filter::parse(raw).with_context(|| format!("--filter {}", raw))?);
    }
    if let Some(raw) = &args.sort {
        builder = builder.sort(SortOrder::parse(raw).with_context(|| format!("--sort {}", raw))?);
    }
    let query = apply_pager(builder, &args.pager).build();

    let page = engine.execute(&records, &query)?;
    print_page(json, &page)
}

fn entities(
    engine: &QueryEngine,
    file: &Path,
    search: Option<String>,
    county: &str,
    pager: &PagerArgs,
    json: bool,
) -> anyhow::Result<()> {
    let tenders: Vec<Tender> = load(file)?;
    let summaries = entity_summaries(&tenders);

    let mut builder = presets::entities().county(county);
    if let Some(text) = search {
        builder = builder.search(text);
    }
    let query = apply_pager(builder, pager).build();

    let page = engine.execute(&summaries, &query)?;
    print_page(json, &page)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    total_tenders: usize,
    flagged_tenders: usize,
    total_value: f64,
    average_risk: f64,
    risk: RiskDistribution,
    counties: Vec<CountySummary>,
}

fn stats(file: &Path, json: bool) -> anyhow::Result<()> {
    let tenders: Vec<Tender> = load(file)?;
    let counties = county_summaries(&tenders);
    let total_value: f64 = tenders.iter().map(|t| t.amount).sum();
    let average_risk = if tenders.is_empty() {
        0.0
    } else {
        tenders.iter().map(|t| f64::from(t.risk_score)).sum::<f64>() / tenders.len() as f64
    };

    let stats = Stats {
        total_tenders: tenders.len(),
        flagged_tenders: tenders.iter().filter(|t| t.is_flagged).count(),
        total_value,
        average_risk,
        risk: risk_distribution(&tenders),
        counties,
    };

    if json {
        return print_json(&stats);
    }

    println!("tenders: {}", stats.total_tenders);
    println!("flagged: {}", stats.flagged_tenders);
    println!("total value: {:.0}", stats.total_value);
    println!("average risk: {:.1}", stats.average_risk);
    println!(
        "risk: critical {} / high {} / medium {} / low {}",
        stats.risk.critical, stats.risk.high, stats.risk.medium, stats.risk.low
    );
    for county in &stats.counties {
        println!("{}", county.row());
    }
    Ok(())
}
