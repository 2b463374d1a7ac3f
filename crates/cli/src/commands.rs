//! Command-line surface and per-command dispatch.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use model::{MatchDecision, Outcome, RunningDistance};
use serde_json::json;
use usecase::UseCases;

use crate::output::{render_all, Report};

#[derive(Debug, Parser)]
#[command(name = "partyrun", about = "PartyRun command-line client", version)]
pub struct Cli {
    /// Configuration file. Without it `.partyrun/config.toml` is used when present.
    #[arg(long, value_name = "path", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Exchange a Google ID token for a PartyRun session.
    SignIn {
        #[arg(long, value_name = "token", env = "PARTYRUN_ID_TOKEN")]
        id_token: Option<String>,
    },
    /// Forget the stored session.
    SignOut,
    /// Print the cached profile, then the one fetched from the server.
    Profile,
    /// Print the cached profile without contacting the server.
    MyPage,
    /// Change the nickname (1 to 6 characters).
    Rename {
        #[arg(long)]
        nickname: String,
    },
    /// Upload a new profile image.
    UploadImage {
        #[arg(long, value_name = "path")]
        path: PathBuf,
        /// File name sent with the upload. Defaults to the name of `path`.
        #[arg(long)]
        file_name: Option<String>,
    },
    DeleteAccount,
    /// Print lifetime running totals.
    Record,
    /// Refresh solo and battle history concurrently and print both.
    History,
    #[command(subcommand)]
    Match(MatchCommand),
    /// Print the battle currently running for this member.
    BattleId,
    SaveBattleId {
        #[arg(long)]
        id: String,
    },
    SaveSingleId {
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum MatchCommand {
    /// Join the matching queue for a distance in meters.
    Register {
        #[arg(long, value_name = "meters", value_parser = parse_distance)]
        distance: RunningDistance,
    },
    Accept,
    Decline,
    Cancel,
}

fn parse_distance(raw: &str) -> Result<RunningDistance, String> {
    let meters: u32 = raw
        .trim()
        .parse()
        .map_err(|error| format!("not a whole number of meters: {error}"))?;
    RunningDistance::try_from(meters)
}

/// Runs `command` and builds what it prints.
pub async fn run(command: Command, use_cases: &UseCases) -> anyhow::Result<Report> {
    let report = match command {
        Command::SignIn { id_token } => {
            Report::single(use_cases.sign_in_with_google.execute(id_token).await)?
        }
        Command::SignOut => Report::single(use_cases.sign_out.execute().await)?,
        Command::Profile => {
            let outcomes: Vec<_> = use_cases.refresh_user_data.execute().collect().await;
            Report::sequence(outcomes)?
        }
        Command::MyPage => Report::single(use_cases.get_my_page_data.execute())?,
        Command::Rename { nickname } => {
            Report::single(use_cases.update_user_data.execute(&nickname).await)?
        }
        Command::UploadImage { path, file_name } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("cannot read image {}", path.display()))?;
            let file_name = file_name.or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            });
            Report::single(
                use_cases
                    .update_profile_image
                    .execute(bytes, file_name)
                    .await,
            )?
        }
        Command::DeleteAccount => Report::single(use_cases.delete_account.execute().await)?,
        Command::Record => {
            Report::single(use_cases.get_comprehensive_run_record.execute().await)?
        }
        Command::History => history(use_cases).await?,
        Command::Match(command) => {
            let outcome = match command {
                MatchCommand::Register { distance } => {
                    use_cases.register_match.execute(distance).await
                }
                MatchCommand::Accept => {
                    use_cases
                        .send_accept_match
                        .execute(MatchDecision::accept())
                        .await
                }
                MatchCommand::Decline => {
                    use_cases
                        .send_accept_match
                        .execute(MatchDecision::decline())
                        .await
                }
                MatchCommand::Cancel => use_cases.cancel_match.execute().await,
            };
            Report::single(outcome)?
        }
        Command::BattleId => Report::single(use_cases.get_battle_id.execute().await)?,
        Command::SaveBattleId { id } => {
            Report::single(use_cases.save_battle_id.execute(&id).await)?
        }
        Command::SaveSingleId { id } => {
            Report::single(use_cases.save_single_id.execute(&id).await)?
        }
    };
    Ok(report)
}

/// Both halves refresh concurrently; each reports its own outcome and the
/// aggregate shows whatever was applied.
async fn history(use_cases: &UseCases) -> anyhow::Result<Report> {
    let (single, battle) = tokio::join!(
        use_cases
            .update_single_running_history
            .execute()
            .collect::<Vec<_>>(),
        use_cases
            .update_battle_running_history
            .execute()
            .collect::<Vec<_>>(),
    );
    let failed = single.last().is_some_and(Outcome::is_failure)
        || battle.last().is_some_and(Outcome::is_failure);

    Ok(Report {
        body: json!({
            "single": render_all(single)?,
            "battle": render_all(battle)?,
            "aggregate": serde_json::to_value(use_cases.get_running_history.snapshot())?,
        }),
        failed,
    })
}
