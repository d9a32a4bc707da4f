use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use santa_assign::config::{self, ConfigFile};
use santa_assign::data_type::DataType;
use santa_assign::history::{self, HistoryError};
use santa_players::clients::{FileClient, IClient};
use santa_rs::algorithm::{Assigner, Assignment, SolverKind};
use serde::Serialize;

/// An application to assign secret santas, optionally taking history into account.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    participants: Vec<String>,

    /// set config path (json or yaml)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// set the history path (to be loaded and written, json or yaml)
    #[arg(short = 'd', long = "data")]
    data: Option<PathBuf>,

    /// do not write in the history file
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// ignore the history when computing the new assignations
    #[arg(long = "ignore-history")]
    ignore_history: bool,

    /// do not randomize the assignations
    #[arg(long = "no-random")]
    no_random: bool,

    /// seed for reproducible randomization
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// do not output results
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// output format of the results
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    format: DataType,

    /// give an identifier for this christmas to write in the data
    #[arg(short = 'i', long = "id")]
    id: Option<String>,

    /// off, error, warn, info, debug or trace
    #[arg(long = "log-level")]
    log_level: Option<LevelFilter>,

    /// read participants and constraints from a csv roster
    #[arg(short = 'r', long = "roster")]
    roster: Option<PathBuf>,

    /// ex. --group member0/member1/member2
    #[arg(short = 'g', long = "group")]
    groups: Vec<String>,

    /// ex. --blacklist giver/receiver0/receiver1
    #[arg(short = 'b', long = "blacklist")]
    black_lists: Vec<String>,

    #[arg(long = "solver", value_enum)]
    solver: Option<SolverArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    BranchAndBound,
    Hungarian,
}

impl From<SolverArg> for SolverKind {
    fn from(value: SolverArg) -> Self {
        match value {
            SolverArg::BranchAndBound => SolverKind::BranchAndBound,
            SolverArg::Hungarian => SolverKind::Hungarian,
        }
    }
}

impl Args {
    // 指定されなかった引数は None にして設定ファイルの値を残す
    fn to_config(&self) -> ConfigFile {
        let flag = |x: bool| if x { Some(true) } else { None };
        ConfigFile {
            participants: (!self.participants.is_empty()).then(|| self.participants.clone()),
            exclusion_groups: (!self.groups.is_empty())
                .then(|| santa_assign::parse_groups(&self.groups)),
            black_lists: (!self.black_lists.is_empty())
                .then(|| santa_assign::parse_black_lists(&self.black_lists)),
            modifiers: None,
            data: self.data.clone(),
            dry_run: flag(self.dry_run),
            ignore_history: flag(self.ignore_history),
            quiet: flag(self.quiet),
            random: if self.no_random { Some(false) } else { None },
            seed: self.seed,
            id: self.id.clone(),
            solver: self.solver.map(SolverKind::from),
        }
    }
}

#[derive(Serialize)]
struct Output<'a> {
    santas: &'a Assignment,
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // 設定ファイルよりコマンドライン引数を優先する
    let file_config = match &args.config {
        Some(path) => config::load(path).await?,
        None => ConfigFile::default(),
    };
    let config = file_config.merge(args.to_config());

    // 履歴
    let mut past = match &config.data {
        Some(path) => history::load_history(path).await?,
        None => Vec::new(),
    };
    if config.data.is_some() {
        if config.ignores_history() {
            log::info!("{} past christmases will be ignored.", past.len());
        } else {
            log::info!("{} past christmases found.", past.len());
        }
    }

    if let Some(id) = &config.id {
        if history::does_id_exist(id, &past) {
            return Err(HistoryError::DuplicateId(id.clone()).into());
        }
    }

    let records = if config.ignores_history() {
        Vec::new()
    } else {
        past.iter().map(|entry| entry.santas.clone()).collect()
    };
    let mut options = config.to_options(records);

    // 名簿
    if let Some(path) = &args.roster {
        let data = FileClient::new(path).fetch()?;
        let roster = santa_players::deserialize(&data)?;
        roster.apply_to(&mut options);
    }

    log::info!("Calculating new christmas...");
    let assignment = Assigner::new().assign(&options)?;
    log::info!(
        "Total cost: {} ({})",
        assignment.total_cost(),
        assignment.statistics()
    );

    if !config.is_quiet() {
        let output = Output {
            santas: &assignment,
        };
        println!("{}", args.format.serialize(&output)?);
    }

    if let (false, Some(path)) = (config.is_dry_run(), &config.data) {
        past.push(history::new_entry(config.id.clone(), &assignment));
        history::save_history(path, &past).await?;
        log::info!("New data written in {}.", path.display());
    }

    Ok(())
}

// ex. santa_assign --data history.json --group alice/bob --group carol/dave alice bob carol dave erin
#[tokio::main]
async fn main() {
    let args = Args::parse();
    santa_assign::logger::build_logger(santa_assign::logger::resolve_level(
        args.log_level,
        args.quiet,
    ));

    if let Err(e) = run(args).await {
        log::error!("Error: {e}");
        std::process::exit(1);
    }
}
