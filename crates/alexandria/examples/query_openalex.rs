//! Example: Query the OpenAlex API
//!
//! Usage:
//!   cargo run -p alexandria --example query_openalex -- \
//!     --entity authors \
//!     --filter has_orcid:true \
//!     --search "priem" \
//!     --limit 50
//!
//!   cargo run -p alexandria --example query_openalex -- --entity works --group-by is_oa
//!   cargo run -p alexandria --example query_openalex -- --entity publishers --id wikidata:Q746413

use alexandria::model::{Concept, Funder, Institution, Publisher, Source, Topic};
use alexandria::{Config, EntityKind, OpenAlex, Query, Record};

#[derive(Debug, Default)]
struct Args {
    entity: Option<EntityKind>,
    filters: Vec<(String, String)>,
    search: Option<String>,
    group_by: Vec<String>,
    id: Option<String>,
    limit: usize,
    email: Option<String>,
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args)?;

    alexandria_core::init_logging(false, args.debug);

    let mut config = Config::load()?;
    if let Some(email) = &args.email {
        config = config.with_email(email);
    }
    let client = OpenAlex::new(config)?;

    match args.entity.unwrap_or(EntityKind::Works) {
        EntityKind::Works => run(client.works(), &args),
        EntityKind::Authors => run(client.authors(), &args),
        EntityKind::Sources => run(client.query::<Source>(), &args),
        EntityKind::Institutions => run(client.query::<Institution>(), &args),
        EntityKind::Concepts => run(client.query::<Concept>(), &args),
        EntityKind::Publishers => run(client.query::<Publisher>(), &args),
        EntityKind::Funders => run(client.query::<Funder>(), &args),
        EntityKind::Topics => run(client.query::<Topic>(), &args),
    }
}

fn run<R: Record + std::fmt::Debug>(query: Query<'_, R>, args: &Args) -> anyhow::Result<()> {
    if let Some(id) = &args.id {
        let record = query.by_id(id)?;
        log::info!("{}: {:?}", id, record.short_id());
        println!("{record:#?}");
        return Ok(());
    }

    let mut query = query;
    for (key, value) in &args.filters {
        query = query.filter(key.as_str(), value.as_str());
    }
    if let Some(search) = &args.search {
        query = query.search(search.as_str());
    }

    if !args.group_by.is_empty() {
        let page = query.group_by(args.group_by.iter().cloned()).get()?;
        log::info!("{} groups over {} records", page.group_by.len(), page.meta.count);
        for group in &page.group_by {
            println!(
                "{:>10}  {}",
                group.count,
                group.key_display_name.as_deref().unwrap_or(&group.key)
            );
        }
        return Ok(());
    }

    let total = query.clone().count()?;
    log::info!("{total} matching {}", R::KIND);

    let mut shown = 0usize;
    for record in query.per_page(200).paginate().n_max(args.limit).records() {
        let record = record?;
        println!(
            "{}\t{}",
            record.short_id().unwrap_or("-"),
            record.canonical_external_id().unwrap_or("-")
        );
        shown += 1;
    }
    log::info!("Printed {shown} of {total}");
    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut parsed = Args {
        limit: 25,
        ..Args::default()
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || -> anyhow::Result<String> {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Missing value for {}", args[i - 1]))
        };
        match flag {
            "--entity" | "-e" => {
                let name = value()?;
                parsed.entity = Some(
                    EntityKind::from_name(&name)
                        .ok_or_else(|| anyhow::anyhow!("Unknown entity: {name}"))?,
                );
            }
            "--filter" | "-f" => {
                let raw = value()?;
                let (key, val) = raw
                    .split_once(':')
                    .ok_or_else(|| anyhow::anyhow!("Filter must be key:value, got {raw}"))?;
                parsed.filters.push((key.to_string(), val.to_string()));
            }
            "--search" | "-s" => parsed.search = Some(value()?),
            "--group-by" | "-g" => parsed.group_by.push(value()?),
            "--id" => parsed.id = Some(value()?),
            "--limit" | "-l" => parsed.limit = value()?.parse()?,
            "--email" => parsed.email = Some(value()?),
            "--debug" | "-d" => parsed.debug = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg => {
                anyhow::bail!("Unknown argument: {}", arg);
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn print_help() {
    println!(
        r#"Query the OpenAlex API

Usage: query_openalex [OPTIONS]

Options:
  -e, --entity <NAME>     Entity type: works, authors, sources, institutions,
                          concepts, publishers, funders, topics [default: works]
  -f, --filter <K:V>      Equality filter (repeatable)
  -s, --search <TERM>     Full-text search
  -g, --group-by <FIELD>  Group counts by field (at most twice)
      --id <ID>           Fetch one record by OpenAlex ID, DOI, ORCID, ROR, ...
  -l, --limit <N>         Maximum records to print [default: 25]
      --email <ADDR>      Contact address for the polite pool
  -d, --debug             Log every request
  -h, --help              Print help

Configuration is read from ./alexandria.toml or the user config directory."#
    );
}

