mod client;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use client::ApiClient;
use robotops_core::{DEFAULT_PAGE_LIMIT, MissionId, RobotId};
use robotops_protocol::{ListQuery, MissionFields, RobotFields};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "robotops", about = "Command-line client for the robotops API")]
struct Cli {
    #[arg(long, global = true, default_value = "http://127.0.0.1:8800")]
    api: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the service and its database answer.
    Ping,
    #[command(subcommand)]
    Robot(RobotCommand),
    #[command(subcommand)]
    Mission(MissionCommand),
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(long, default_value_t = 0)]
    skip: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: u32,
}

impl From<PageArgs> for ListQuery {
    fn from(args: PageArgs) -> Self {
        Self { skip: args.skip, limit: args.limit }
    }
}

#[derive(Debug, Args)]
struct RobotArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    model_name: String,
}

impl From<RobotArgs> for RobotFields {
    fn from(args: RobotArgs) -> Self {
        Self { name: args.name, model_name: args.model_name }
    }
}

#[derive(Debug, Args)]
struct MissionArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    robot_id: i64,
}

impl From<MissionArgs> for MissionFields {
    fn from(args: MissionArgs) -> Self {
        Self { name: args.name, description: args.description, robot_id: RobotId(args.robot_id) }
    }
}

#[derive(Debug, Subcommand)]
enum RobotCommand {
    List(PageArgs),
    Get {
        id: i64,
    },
    Create(RobotArgs),
    Update {
        id: i64,
        #[command(flatten)]
        fields: RobotArgs,
    },
    /// Missions assigned to a robot.
    Missions {
        id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
enum MissionCommand {
    List(PageArgs),
    Get {
        id: i64,
    },
    Create(MissionArgs),
    Update {
        id: i64,
        #[command(flatten)]
        fields: MissionArgs,
    },
    /// The robot a mission is assigned to.
    Robot {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(api = %cli.api, "using api");
    let client = ApiClient::new(&cli.api);

    match cli.command {
        Command::Ping => print_json(&client.health().await?)?,
        Command::Robot(command) => run_robot(&client, command).await?,
        Command::Mission(command) => run_mission(&client, command).await?,
    }

    Ok(())
}

async fn run_robot(client: &ApiClient, command: RobotCommand) -> Result<()> {
    match command {
        RobotCommand::List(page) => print_json(&client.list_robots(page.into()).await?),
        RobotCommand::Get { id } => print_json(&client.get_robot(RobotId(id)).await?),
        RobotCommand::Create(fields) => print_json(&client.create_robot(&fields.into()).await?),
        RobotCommand::Update { id, fields } => {
            print_json(&client.update_robot(RobotId(id), &fields.into()).await?)
        }
        RobotCommand::Missions { id, page } => {
            print_json(&client.list_robot_missions(RobotId(id), page.into()).await?)
        }
    }
}

async fn run_mission(client: &ApiClient, command: MissionCommand) -> Result<()> {
    match command {
        MissionCommand::List(page) => print_json(&client.list_missions(page.into()).await?),
        MissionCommand::Get { id } => print_json(&client.get_mission(MissionId(id)).await?),
        MissionCommand::Create(fields) => {
            print_json(&client.create_mission(&fields.into()).await?)
        }
        MissionCommand::Update { id, fields } => {
            print_json(&client.update_mission(MissionId(id), &fields.into()).await?)
        }
        MissionCommand::Robot { id } => {
            print_json(&client.get_mission_robot(MissionId(id)).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
