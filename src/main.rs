use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use clap::error::ErrorKind;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use svnsteward::config::RunConfig;
use svnsteward::error::Error;
use svnsteward::store::{DataSource, SqliteStore, render_roles_table};
use svnsteward::svn::CommandSvnAdmin;
use svnsteward::sync;
use svnsteward::types::RolePolicy;

const OK_EXITCODE: i32 = 0;
const BAD_ARGUMENTS_EXITCODE: i32 = 1;
const DB_ERROR_EXITCODE: i32 = 3;

#[derive(Parser)]
#[command(name = "svnsteward", version)]
#[command(about = "Synchronizes SVN repository access control with a Redmine project database")]
struct Cli {
    /// Path to the Redmine SQLite database
    #[arg(long, short = 'd')]
    database: PathBuf,

    /// SVN repositories root
    #[arg(long, short = 's', default_value = "/svn")]
    svn_root: PathBuf,

    /// Generated AuthZ filename
    #[arg(long, default_value = "/svn/access.authZ")]
    output_file: PathBuf,

    /// Role ids that can read SVN: roleId1,roleId2,..
    #[arg(long, value_delimiter = ',', required_unless_present = "list_roles")]
    read_roles: Vec<i64>,

    /// Role ids that can read and write SVN: roleId1,roleId2,..
    #[arg(long, value_delimiter = ',', required_unless_present = "list_roles")]
    rw_roles: Vec<i64>,

    /// Create missing project repositories
    #[arg(long, short = 'c')]
    create_missing_repos: bool,

    /// Be verbose
    #[arg(long, short = 'v')]
    verbose: bool,

    /// List available user roles and exit
    #[arg(long, short = 'l')]
    list_roles: bool,

    /// With --list-roles, print the roles as JSON
    #[arg(long, requires = "list_roles")]
    json: bool,
}

#[derive(Serialize)]
struct RoleOutput {
    id: i64,
    name: String,
}

fn run_list_roles(store: &SqliteStore, json: bool) -> anyhow::Result<()> {
    let roles = store.list_roles()?;

    if json {
        let outputs: Vec<RoleOutput> = roles
            .into_iter()
            .map(|(id, name)| RoleOutput { id, name })
            .collect();
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        println!("Available roles list:");
        print!("{}", render_roles_table(&roles));
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let store = SqliteStore::open(&cli.database)?;

    if cli.list_roles {
        return run_list_roles(&store, cli.json);
    }

    let config = RunConfig {
        database: cli.database,
        svn_root: cli.svn_root,
        output_file: cli.output_file,
        policy: RolePolicy::new(cli.read_roles, cli.rw_roles),
        create_missing: cli.create_missing_repos,
        verbose: cli.verbose,
    };

    let report = sync::run(&config, &store, &CommandSvnAdmin)?;
    tracing::info!(
        "done: {} projects, {} repositories with access rules, {} created, {} blocked",
        report.projects,
        report.existing,
        report.created,
        report.blocked
    );

    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::Database(_)) => DB_ERROR_EXITCODE,
        _ => BAD_ARGUMENTS_EXITCODE,
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            exit(OK_EXITCODE);
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("Use the --help option to get help !");
            exit(BAD_ARGUMENTS_EXITCODE);
        }
    };

    let default_level = if cli.verbose {
        "svnsteward=info"
    } else {
        "svnsteward=warn"
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(default_level.parse().expect("static directive"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {err}");
        exit(exit_code_for(&err));
    }
}
